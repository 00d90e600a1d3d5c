//! Layered configuration merging and manifest rendering
//!
//! Produces two artifacts from a template tree and a stack of configuration
//! overlays: fully-substituted manifest files, and a single merged runtime
//! configuration document. Overlays are instantiated against render-time
//! parameters and folded left to right; later layers override earlier ones
//! field by field.

pub mod defaults;
pub mod error;
pub mod layers;
pub mod merge;
pub mod params;
pub mod pipeline;
pub mod template;

pub use defaults::{AssetProvider, DEFAULT_CONFIG_KEY, EmbeddedAssets};
pub use error::{Error, Result};
pub use layers::Layer;
pub use merge::{deep_merge, merge_layers, to_yaml};
pub use params::{RenderContext, RenderParameters};
pub use pipeline::{CONFIG_OVERRIDES_FILENAME, RenderOpts, SCHEDULER_POD_MANIFEST, render};
