//! Layering guardrails for the core crate.
//!
//! `infragen_core` holds the IR and the lowering contract only. Encoders, CLI and logging belong to the root crate,
//! so the core manifest may list `serde` and nothing else in `[dependencies]`. Other crates are allowed as
//! dev-dependencies.

const ALLOWED_CORE_DEPENDENCIES: &[&str] = &["serde"];

/// Names listed in the `[dependencies]` table of a manifest.
fn main_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_depends_only_on_serde() {
    let manifest = include_str!("../crates/infragen_core/Cargo.toml");
    for name in main_dependencies(manifest) {
        assert!(
            ALLOWED_CORE_DEPENDENCIES.contains(&name.as_str()),
            "`{name}` must not appear in infragen_core [dependencies]; keep encoders and I/O in the root crate"
        );
    }
}

#[test]
fn root_depends_on_core() {
    let manifest = include_str!("../Cargo.toml");
    assert!(main_dependencies(manifest).iter().any(|name| name == "infragen_core"));
}
