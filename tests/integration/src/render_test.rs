//! End-to-end test for the render binary
//!
//! Exercises the complete flow: template tree in, rendered manifest trees
//! and merged bootstrap configuration out.

use assert_cmd::Command;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Lay out a realistic template tree plus an asset input directory.
fn setup_render_dirs() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    let asset_input = temp.path().join("assets-in");

    fs::create_dir_all(templates.join("config")).unwrap();
    fs::create_dir_all(templates.join("bootstrap-manifests")).unwrap();
    fs::create_dir_all(templates.join("manifests")).unwrap();
    fs::create_dir_all(asset_input.join("tls")).unwrap();

    fs::write(
        templates.join("config/config-overrides.yaml"),
        "extendedArguments:\n  cluster-cidr:\n    - 10.128.0.0/14\n",
    )
    .unwrap();
    fs::write(
        templates.join("config/bootstrap-config-overrides.yaml"),
        "extendedArguments:\n  cloud-config:\n    - {{ cloud_provider_host_path }}/config\n",
    )
    .unwrap();
    fs::write(
        templates.join("bootstrap-manifests/kube-controller-manager-pod.yaml"),
        "apiVersion: v1\nkind: Pod\nmetadata:\n  name: bootstrap-kube-controller-manager\n  namespace: {{ namespace }}\nspec:\n  containers:\n    - name: kube-controller-manager\n      image: {{ image }}\n      imagePullPolicy: {{ image_pull_policy }}\n      volumeMounts:\n        - mountPath: {{ config_host_path }}\n          name: config\n",
    )
    .unwrap();
    fs::write(
        templates.join("bootstrap-manifests/kube-scheduler-pod.yaml"),
        "apiVersion: v1\nkind: Pod\nmetadata:\n  name: bootstrap-kube-scheduler\n  namespace: {{ namespace }}\n",
    )
    .unwrap();
    fs::write(
        templates.join("manifests/00_namespace.yaml"),
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: {{ namespace }}\n",
    )
    .unwrap();
    fs::write(asset_input.join("tls/service-account.pub"), "PUBKEY\n").unwrap();

    (temp, templates, asset_input)
}

fn render_cmd(
    temp: &TempDir,
    templates: &Path,
    asset_input: &Path,
    extra_args: &[&str],
) -> (Command, PathBuf, PathBuf) {
    let asset_output = temp.path().join("assets-out");
    let config_output = temp.path().join("bootstrap-config.yaml");

    let mut cmd = Command::cargo_bin("render").unwrap();
    cmd.arg(format!("--templates-input-dir={}", templates.display()))
        .arg(format!("--asset-input-dir={}", asset_input.display()))
        .arg(format!("--asset-output-dir={}", asset_output.display()))
        .arg(format!("--config-output-file={}", config_output.display()))
        .args(extra_args);

    (cmd, asset_output, config_output)
}

#[test]
fn test_render_writes_both_manifest_trees_and_the_config() {
    let (temp, templates, asset_input) = setup_render_dirs();
    let (mut cmd, asset_output, config_output) =
        render_cmd(&temp, &templates, &asset_input, &[]);

    cmd.assert().success();

    assert!(asset_output
        .join("bootstrap-manifests/kube-controller-manager-pod.yaml")
        .is_file());
    assert!(asset_output
        .join("bootstrap-manifests/kube-scheduler-pod.yaml")
        .is_file());
    assert!(asset_output.join("manifests/00_namespace.yaml").is_file());
    assert!(config_output.is_file());
}

#[test]
fn test_rendered_manifests_carry_substituted_parameters() {
    let (temp, templates, asset_input) = setup_render_dirs();
    let (mut cmd, asset_output, _) = render_cmd(
        &temp,
        &templates,
        &asset_input,
        &[
            "--manifest-namespace=control-plane",
            "--manifest-image=registry.k8s.io/kube-controller-manager:v1.30.0",
        ],
    );

    cmd.assert().success();

    let pod = fs::read_to_string(
        asset_output.join("bootstrap-manifests/kube-controller-manager-pod.yaml"),
    )
    .unwrap();
    assert!(pod.contains("namespace: control-plane"));
    assert!(pod.contains("image: registry.k8s.io/kube-controller-manager:v1.30.0"));
    assert!(pod.contains("mountPath: /etc/kubernetes/bootstrap-configs"));
}

#[test]
fn test_merged_config_layers_defaults_under_the_bootstrap_overlay() {
    let (temp, templates, asset_input) = setup_render_dirs();
    let (mut cmd, _, config_output) = render_cmd(&temp, &templates, &asset_input, &[]);

    cmd.assert().success();

    let merged: Value =
        serde_yaml::from_str(&fs::read_to_string(&config_output).unwrap()).unwrap();

    // Compiled-in defaults survive underneath.
    assert_eq!(
        merged["kind"],
        Value::String("KubeControllerManagerConfig".to_string())
    );
    assert_eq!(
        merged["extendedArguments"]["leader-elect"][0],
        Value::String("true".to_string())
    );
    // The bootstrap overlay contribution is instantiated and merged in.
    assert_eq!(
        merged["extendedArguments"]["cloud-config"][0],
        Value::String("/etc/kubernetes/cloud/config".to_string())
    );
    // The post-bootstrap overlay is not part of the bootstrap document.
    assert!(merged["extendedArguments"]["cluster-cidr"].is_null());
}

#[test]
fn test_conventional_override_file_is_picked_up_from_the_asset_input_dir() {
    let (temp, templates, asset_input) = setup_render_dirs();
    fs::write(
        asset_input.join("kube-controller-manager-config-overrides.yaml"),
        "extendedArguments:\n  leader-elect:\n    - \"false\"\n",
    )
    .unwrap();

    let (mut cmd, _, config_output) = render_cmd(&temp, &templates, &asset_input, &[]);
    cmd.assert().success();

    let merged: Value =
        serde_yaml::from_str(&fs::read_to_string(&config_output).unwrap()).unwrap();
    assert_eq!(
        merged["extendedArguments"]["leader-elect"][0],
        Value::String("false".to_string())
    );
}

#[test]
fn test_skip_scheduler_flag_omits_exactly_the_reserved_manifest() {
    let (temp, templates, asset_input) = setup_render_dirs();
    let (mut cmd, asset_output, _) =
        render_cmd(&temp, &templates, &asset_input, &["--skip-scheduler"]);

    cmd.assert().success();

    assert!(!asset_output
        .join("bootstrap-manifests/kube-scheduler-pod.yaml")
        .exists());
    assert!(asset_output
        .join("bootstrap-manifests/kube-controller-manager-pod.yaml")
        .is_file());
    assert!(asset_output.join("manifests/00_namespace.yaml").is_file());
}

#[test]
fn test_malformed_override_fails_naming_the_layer() {
    let (temp, templates, asset_input) = setup_render_dirs();
    fs::write(
        asset_input.join("kube-controller-manager-config-overrides.yaml"),
        "extendedArguments: [unclosed\n",
    )
    .unwrap();

    let (mut cmd, _, _) = render_cmd(&temp, &templates, &asset_input, &[]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to parse config layer"))
        .stderr(predicates::str::contains(
            "kube-controller-manager-config-overrides.yaml",
        ));
}

#[test]
fn test_undefined_overlay_placeholder_fails_loudly() {
    let (temp, templates, asset_input) = setup_render_dirs();
    fs::write(
        templates.join("config/bootstrap-config-overrides.yaml"),
        "extendedArguments:\n  cloud-config:\n    - {{ not_a_parameter }}\n",
    )
    .unwrap();

    let (mut cmd, _, _) = render_cmd(&temp, &templates, &asset_input, &[]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("failed to render"));
}
