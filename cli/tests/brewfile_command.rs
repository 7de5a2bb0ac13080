#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for `brewfile` and `install <path>`.

mod common;

use common::TestHomeBuilder;

#[test]
fn init_then_add_packages() {
    let home = TestHomeBuilder::new().build();
    home.run(&["brewfile", "init"]).unwrap();
    home.run(&["brewfile", "add", "jq"]).unwrap();
    home.run(&["brewfile", "add", "ripgrep"]).unwrap();
    home.run(&["brewfile", "add", "jq"]).unwrap();
    insta::assert_snapshot!(home.read("Brewfile"), @r#"
    # Brewfile - Add your packages here

    brew "jq"
    brew "ripgrep"
    "#);
}

#[test]
fn apply_requires_brewfile() {
    let home = TestHomeBuilder::new().with_program("brew").build();
    assert!(home.run(&["brewfile", "apply"]).is_err());
    assert!(home.executor.calls().is_empty());
}

#[test]
fn apply_runs_brew_bundle() {
    let home = TestHomeBuilder::new()
        .with_program("brew")
        .with_file("Brewfile", "brew \"jq\"\n")
        .build();
    home.run(&["brewfile", "apply"]).unwrap();
    assert_eq!(
        home.executor.calls(),
        vec![format!(
            "brew bundle install --file {}",
            home.file("Brewfile").display()
        )]
    );
}

#[test]
fn install_local_path_uses_brew_bundle() {
    let home = TestHomeBuilder::new()
        .with_program("brew")
        .with_file("bundles/dev.Brewfile", "brew \"git\"\n")
        .build();
    let path = home.file("bundles/dev.Brewfile");
    home.run(&["install", &path.to_string_lossy()]).unwrap();
    assert_eq!(home.executor.calls().len(), 1);
}

#[test]
fn install_missing_path_is_error() {
    let home = TestHomeBuilder::new().with_program("brew").build();
    let path = home.file("nope/Brewfile");
    let err = home.run(&["install", &path.to_string_lossy()]).unwrap_err();
    assert!(err.to_string().contains("Brewfile not found"));
}

#[test]
fn install_list_names_bundles() {
    let home = TestHomeBuilder::new().build();
    let out = home.run(&["install", "list"]).unwrap();
    for name in ["ai", "cli", "full-desktop", "k8s"] {
        assert!(out.lines().any(|l| l.trim_start().starts_with(name)), "{name}");
    }
}
