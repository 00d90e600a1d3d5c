//! Render pipeline orchestration
//!
//! Sequences the two configuration merges and the manifest template passes.
//! The whole run is synchronous and aborts on the first failure; a failed
//! render leaves no guarantee about partial output, callers re-run from
//! scratch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::defaults::{AssetProvider, DEFAULT_CONFIG_KEY};
use crate::layers::Layer;
use crate::merge::{merge_layers, to_yaml};
use crate::params::{RenderContext, RenderParameters};
use crate::template;
use crate::{Error, Result};

/// Bootstrap manifest reserved for the scheduler, skippable by flag.
pub const SCHEDULER_POD_MANIFEST: &str = "kube-scheduler-pod.yaml";

/// Conventional override filename looked up inside the asset input dir.
pub const CONFIG_OVERRIDES_FILENAME: &str = "kube-controller-manager-config-overrides.yaml";

/// Manifest template subdirectories rendered 1:1 into the output tree.
const MANIFEST_DIRS: [&str; 2] = ["bootstrap-manifests", "manifests"];

/// Inputs driving one render run.
#[derive(Debug, Clone)]
pub struct RenderOpts {
    pub params: RenderParameters,

    /// Directory holding `config/`, `bootstrap-manifests/` and `manifests/`
    pub templates_dir: PathBuf,

    /// Directory with certificates and secrets referenced by the manifests
    pub asset_input_dir: PathBuf,

    /// Output root for the rendered manifest trees
    pub asset_output_dir: PathBuf,

    /// Output path for the merged bootstrap configuration
    pub config_output_file: PathBuf,

    /// Optional sparse user override; `None` contributes no layer
    pub config_override_file: Option<PathBuf>,

    /// Leave the scheduler bootstrap manifest out of the run entirely
    pub skip_scheduler_manifests: bool,
}

/// Run the full render: both configuration merges plus the manifest passes.
pub fn render(opts: &RenderOpts, provider: &dyn AssetProvider) -> Result<()> {
    let params_ctx = RenderContext::from_params(opts.params.clone());

    // Post-bootstrap configuration: default + generic overlay + override.
    // Manifest templates can embed it, so it is computed up front.
    let post_bootstrap = merged_config(
        opts,
        provider,
        &opts.templates_dir.join("config").join("config-overrides.yaml"),
        &params_ctx,
    )?;

    let skip = |path: &Path| {
        opts.skip_scheduler_manifests
            && path.file_name().is_some_and(|n| n == SCHEDULER_POD_MANIFEST)
    };

    // Gather certificates and secrets referenced by the manifests.
    let raw_assets = render_fs::load_files_recursively(&opts.asset_input_dir, &skip)?;
    tracing::debug!(count = raw_assets.len(), "Gathered input assets");
    let assets: BTreeMap<String, String> = raw_assets
        .into_iter()
        .map(|(key, bytes)| (key, String::from_utf8_lossy(&bytes).into_owned()))
        .collect();

    let ctx = RenderContext {
        params: opts.params.clone(),
        assets,
        post_bootstrap_config: String::from_utf8_lossy(&post_bootstrap).into_owned(),
    };

    for dir in MANIFEST_DIRS {
        let rendered = render_manifest_dir(&opts.templates_dir.join(dir), &ctx, &skip)?;
        render_fs::write_files(&opts.asset_output_dir.join(dir), &rendered)?;
        tracing::debug!(dir, count = rendered.len(), "Rendered manifest templates");
    }

    // Bootstrap configuration, persisted at the configured output path.
    let bootstrap = merged_config(
        opts,
        provider,
        &opts
            .templates_dir
            .join("config")
            .join("bootstrap-config-overrides.yaml"),
        &params_ctx,
    )?;
    render_fs::write_file(&opts.config_output_file, &bootstrap)?;

    Ok(())
}

/// Merge the compiled-in default, one built-in overlay template, and the
/// optional user override into a single serialized configuration.
fn merged_config(
    opts: &RenderOpts,
    provider: &dyn AssetProvider,
    overlay_path: &Path,
    ctx: &RenderContext,
) -> Result<Vec<u8>> {
    let default = provider
        .asset(DEFAULT_CONFIG_KEY)
        .ok_or_else(|| Error::MissingAsset {
            key: DEFAULT_CONFIG_KEY.to_string(),
        })?;

    let mut layers = vec![
        Layer::embedded("defaultconfig.yaml", default),
        Layer::from_template_file(overlay_path, ctx)?,
    ];
    match &opts.config_override_file {
        Some(path) => layers.push(Layer::from_template_file(path, ctx)?),
        None => tracing::debug!("No config override layer, skipping"),
    }

    let merged = merge_layers(&layers)?;
    to_yaml(&merged)
}

/// Render every YAML template under `dir` 1:1 into an in-memory tree.
fn render_manifest_dir<F>(
    dir: &Path,
    ctx: &RenderContext,
    skip: &F,
) -> Result<BTreeMap<String, Vec<u8>>>
where
    F: Fn(&Path) -> bool,
{
    let templates = render_fs::load_files_recursively(dir, |path: &Path| {
        skip(path) || !is_yaml(path)
    })?;

    let mut rendered = BTreeMap::new();
    for (rel, bytes) in &templates {
        let source = std::str::from_utf8(bytes).map_err(|_| Error::TemplateSyntax {
            name: rel.clone(),
            message: "template is not valid UTF-8".to_string(),
        })?;
        rendered.insert(rel.clone(), template::instantiate(rel, source, ctx)?);
    }

    Ok(rendered)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}
