//! Compiled-in default configuration assets

/// Versioned lookup key for the controller manager default configuration.
pub const DEFAULT_CONFIG_KEY: &str = "v1/kube-controller-manager/defaultconfig.yaml";

/// Read-only lookup of compiled-in assets by versioned key.
///
/// The pipeline depends on this seam rather than on any particular packaging
/// of the defaults. A missing key means a mis-packaged build; callers treat
/// it as fatal.
pub trait AssetProvider {
    fn asset(&self, key: &str) -> Option<&[u8]>;
}

/// Assets embedded into the binary at build time.
#[derive(Debug, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    pub fn new() -> Self {
        Self
    }
}

impl AssetProvider for EmbeddedAssets {
    fn asset(&self, key: &str) -> Option<&[u8]> {
        match key {
            DEFAULT_CONFIG_KEY => Some(include_bytes!(
                "../assets/v1/kube-controller-manager/defaultconfig.yaml"
            )),
            _ => None,
        }
    }
}
