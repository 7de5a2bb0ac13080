#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for `motd toggle`, `motd config` and `motd show`.

mod common;

use common::TestHomeBuilder;

#[test]
fn toggle_defaults_to_all_on() {
    let home = TestHomeBuilder::new().build();
    home.run(&["motd", "toggle"]).unwrap();
    for rc in [".bashrc", ".zshrc", ".config/fish/config.fish"] {
        assert!(home.read(rc).contains("bluefin-cli motd show"), "{rc}");
    }
    assert!(
        home.file(".local/share/bluefin-cli/motd/tips/01-tip.md")
            .is_file()
    );
}

#[test]
fn shell_and_motd_blocks_are_independent() {
    let home = TestHomeBuilder::new().build();
    home.run(&["shell", "bash"]).unwrap();
    home.run(&["motd", "toggle", "bash", "on"]).unwrap();
    home.run(&["shell", "bash", "off"]).unwrap();

    let rc = home.read(".bashrc");
    assert!(!rc.contains("bluefin-cli init bash"));
    assert!(rc.contains("# >>> bluefin-cli motd >>>"));
}

#[test]
fn config_sets_theme() {
    let home = TestHomeBuilder::new().build();
    home.run(&["motd", "config", "tokyo-night"]).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&home.read(".local/share/bluefin-cli/motd/motd.json")).unwrap();
    assert_eq!(json["default-theme"], "tokyo-night");
}

#[test]
fn config_rejects_unknown_theme() {
    let home = TestHomeBuilder::new().build();
    let err = home.run(&["motd", "config", "solarized"]).unwrap_err();
    assert!(err.to_string().contains("solarized"));
}

#[test]
fn show_pipes_through_glow_when_present() {
    let home = TestHomeBuilder::new().with_program("glow").build();
    let out = home.run(&["motd", "show"]).unwrap();
    assert!(out.is_empty());
    assert_eq!(home.executor.calls(), vec!["glow -s dark -w 80 -"]);
}
