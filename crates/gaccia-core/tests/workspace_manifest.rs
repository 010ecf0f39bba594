//! Workspace crates inherit package metadata from the root manifest.

use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("crate lives two levels below the workspace root")
        .to_path_buf()
}

fn manifest(path: &Path) -> toml::Value {
    let raw = std::fs::read_to_string(path.join("Cargo.toml"))
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    raw.parse().unwrap()
}

fn members() -> Vec<String> {
    manifest(&workspace_root())["workspace"]["members"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m.as_str().map(str::to_string))
        .collect()
}

#[test]
fn members_inherit_version_edition_and_license() {
    let root = workspace_root();
    let members = members();
    assert!(members.len() >= 3);

    for member in &members {
        let doc = manifest(&root.join(member));
        let package = &doc["package"];
        for key in ["version", "edition", "license"] {
            let inherited = package
                .get(key)
                .and_then(|v| v.get("workspace"))
                .and_then(|v| v.as_bool());
            assert_eq!(inherited, Some(true), "{member}: {key} should use .workspace = true");
        }
    }
}

#[test]
fn workspace_version_matches_cargo_pkg() {
    let doc = manifest(&workspace_root());
    let version = doc["workspace"]["package"]["version"].as_str().unwrap();
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
    assert_eq!(version, gaccia_core::VERSION);
}

#[test]
fn library_crates_use_tokio_for_tests_only() {
    let root = workspace_root();
    for member in ["crates/gaccia-core", "crates/gaccia-llm"] {
        let doc = manifest(&root.join(member));
        assert!(
            doc["dependencies"].get("tokio").is_none(),
            "{member}: tokio belongs in [dev-dependencies]"
        );
        assert!(doc["dev-dependencies"].get("tokio").is_some(), "{member}");
    }
}

#[test]
fn serde_json_round_trips_floats_exactly() {
    let doc = manifest(&workspace_root());
    let features = doc["workspace"]["dependencies"]["serde_json"]["features"]
        .as_array()
        .expect("serde_json declares features");
    assert!(features.iter().any(|f| f.as_str() == Some("float_roundtrip")));
}
