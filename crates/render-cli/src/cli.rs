//! CLI argument parsing using clap derive

use std::path::{Path, PathBuf};

use clap::Parser;
use render_core::{CONFIG_OVERRIDES_FILENAME, RenderOpts, RenderParameters};

use crate::error::{CliError, Result};

/// Render controller manager bootstrap manifests, secrets and configuration
///
/// Reads a manifest template tree and a directory of certificates and
/// secrets, substitutes the manifest parameters into every template, and
/// writes the rendered trees plus the merged bootstrap configuration.
#[derive(Parser, Debug)]
#[command(name = "render")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target namespace for the controller manager pods
    #[arg(long = "manifest-namespace", default_value = "kube-controller-manager")]
    pub namespace: String,

    /// Image to use for the controller manager
    #[arg(
        long = "manifest-image",
        default_value = "registry.k8s.io/kube-controller-manager:latest"
    )]
    pub image: String,

    /// Image pull policy to use for the controller manager
    #[arg(long = "manifest-image-pull-policy", default_value = "IfNotPresent")]
    pub image_pull_policy: String,

    /// Host path mounted into the controller manager pods to hold a config file
    #[arg(
        long = "manifest-config-host-path",
        default_value = "/etc/kubernetes/bootstrap-configs"
    )]
    pub config_host_path: String,

    /// Host path mounted into the controller manager pods to hold secrets
    #[arg(
        long = "manifest-secrets-host-path",
        default_value = "/etc/kubernetes/bootstrap-secrets"
    )]
    pub secrets_host_path: String,

    /// The config file name inside the manifest-config-host-path
    #[arg(
        long = "manifest-config-file-name",
        default_value = "kube-controller-manager-config.yaml"
    )]
    pub config_file_name: String,

    /// Host path mounted into the controller manager pods to hold cloud provider configuration
    #[arg(
        long = "manifest-cloud-provider-host-path",
        default_value = "/etc/kubernetes/cloud"
    )]
    pub cloud_provider_host_path: String,

    /// A path to a directory with manifest templates
    #[arg(
        long = "templates-input-dir",
        default_value = "/usr/share/bootkube/manifests"
    )]
    pub templates_input_dir: String,

    /// A path to a directory with certificates and secrets
    #[arg(long = "asset-input-dir", default_value = "")]
    pub asset_input_dir: String,

    /// Output path for rendered manifests
    #[arg(long = "asset-output-dir", default_value = "")]
    pub asset_output_dir: String,

    /// A sparse config override file (default: kube-controller-manager-config-overrides.yaml in the asset-input-dir)
    #[arg(long = "config-override-file", default_value = "")]
    pub config_override_file: String,

    /// Output path for the merged configuration YAML file
    #[arg(long = "config-output-file", default_value = "")]
    pub config_output_file: String,

    /// Skip rendering the scheduler bootstrap manifest
    #[arg(long = "skip-scheduler")]
    pub skip_scheduler: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check every mandatory flag is non-empty, before any work begins.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("--manifest-namespace", &self.namespace),
            ("--manifest-image", &self.image),
            ("--manifest-image-pull-policy", &self.image_pull_policy),
            ("--manifest-config-host-path", &self.config_host_path),
            ("--manifest-secrets-host-path", &self.secrets_host_path),
            ("--manifest-config-file-name", &self.config_file_name),
            (
                "--manifest-cloud-provider-host-path",
                &self.cloud_provider_host_path,
            ),
            ("--templates-input-dir", &self.templates_input_dir),
            ("--asset-input-dir", &self.asset_input_dir),
            ("--asset-output-dir", &self.asset_output_dir),
            ("--config-output-file", &self.config_output_file),
        ];

        for (flag, value) in required {
            if value.is_empty() {
                return Err(CliError::Validation { flag });
            }
        }
        Ok(())
    }

    /// Resolve the optional override layer.
    ///
    /// An explicitly flagged path is mandatory and fails downstream when
    /// missing; the conventional location inside the asset input dir only
    /// contributes when the file exists.
    pub fn override_file(&self) -> Option<PathBuf> {
        if !self.config_override_file.is_empty() {
            return Some(PathBuf::from(&self.config_override_file));
        }
        let conventional = Path::new(&self.asset_input_dir).join(CONFIG_OVERRIDES_FILENAME);
        conventional.is_file().then_some(conventional)
    }

    /// Assemble the pipeline inputs from the parsed flags.
    pub fn to_render_opts(&self) -> RenderOpts {
        RenderOpts {
            params: RenderParameters {
                namespace: self.namespace.clone(),
                image: self.image.clone(),
                image_pull_policy: self.image_pull_policy.clone(),
                config_host_path: self.config_host_path.clone(),
                config_file_name: self.config_file_name.clone(),
                cloud_provider_host_path: self.cloud_provider_host_path.clone(),
                secrets_host_path: self.secrets_host_path.clone(),
            },
            templates_dir: PathBuf::from(&self.templates_input_dir),
            asset_input_dir: PathBuf::from(&self.asset_input_dir),
            asset_output_dir: PathBuf::from(&self.asset_output_dir),
            config_output_file: PathBuf::from(&self.config_output_file),
            config_override_file: self.override_file(),
            skip_scheduler_manifests: self.skip_scheduler,
        }
    }
}
