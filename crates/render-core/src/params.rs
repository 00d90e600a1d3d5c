//! Render-time parameters and the template data bundle

use std::collections::BTreeMap;

use serde::Serialize;

/// Render-time values for manifest and overlay templates.
///
/// Supplied once at process start and read-only for the rest of the run.
/// Every field is addressable from a template by its snake_case name.
#[derive(Debug, Clone, Serialize)]
pub struct RenderParameters {
    /// Target namespace for the controller manager pods
    pub namespace: String,

    /// Controller manager image reference
    pub image: String,

    /// Image pull policy for the controller manager containers
    pub image_pull_policy: String,

    /// Host path mounted into the pods to hold the config file
    pub config_host_path: String,

    /// Config file name inside the config host path
    pub config_file_name: String,

    /// Host path holding cloud provider configuration
    pub cloud_provider_host_path: String,

    /// Host path holding bootstrap secrets
    pub secrets_host_path: String,
}

/// The full value bundle templates are rendered against.
///
/// Configuration overlays see only the parameter fields. Manifest templates
/// additionally see the runtime assets gathered from the asset input
/// directory and the serialized post-bootstrap configuration, so a manifest
/// can embed either.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    #[serde(flatten)]
    pub params: RenderParameters,

    /// Relative path to content for files gathered from the asset input dir
    pub assets: BTreeMap<String, String>,

    /// Serialized post-bootstrap configuration
    pub post_bootstrap_config: String,
}

impl RenderContext {
    /// Context for instantiating configuration overlays: parameters only,
    /// assets and the post-bootstrap document still empty.
    pub fn from_params(params: RenderParameters) -> Self {
        Self {
            params,
            assets: BTreeMap::new(),
            post_bootstrap_config: String::new(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_params() -> RenderParameters {
    RenderParameters {
        namespace: "kube-controller-manager".to_string(),
        image: "registry.k8s.io/kube-controller-manager:latest".to_string(),
        image_pull_policy: "IfNotPresent".to_string(),
        config_host_path: "/etc/kubernetes/bootstrap-configs".to_string(),
        config_file_name: "kube-controller-manager-config.yaml".to_string(),
        cloud_provider_host_path: "/etc/kubernetes/cloud".to_string(),
        secrets_host_path: "/etc/kubernetes/bootstrap-secrets".to_string(),
    }
}
