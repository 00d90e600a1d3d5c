//! Configuration layer loading

use std::fs;
use std::path::Path;

use crate::params::RenderContext;
use crate::template;
use crate::{Error, Result};

/// One named input to a configuration merge.
///
/// Layers are combined strictly in the order they are supplied; later layers
/// override earlier ones field by field. The name identifies the layer in
/// parse-error reports.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    content: Vec<u8>,
}

impl Layer {
    /// A compiled-in layer, used verbatim with no templating.
    pub fn embedded(name: impl Into<String>, content: &[u8]) -> Self {
        Self {
            name: name.into(),
            content: content.to_vec(),
        }
    }

    /// Read a layer template from disk and instantiate it.
    ///
    /// The path is mandatory here; skipping an absent optional layer is the
    /// caller's decision, made before this is called.
    pub fn from_template_file(path: &Path, ctx: &RenderContext) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::LayerRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let name = path.display().to_string();
        let content = template::instantiate(&name, &source, ctx)?;
        tracing::debug!(?path, bytes = content.len(), "Loaded config layer");

        Ok(Self { name, content })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}
