//! Build script: embeds the CLI version string.

use std::process::Command;

fn main() {
    // BLUEFIN_CLI_VERSION (set by release builds) wins over git describe.
    if let Ok(version) = std::env::var("BLUEFIN_CLI_VERSION") {
        println!("cargo:rustc-env=BLUEFIN_CLI_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=BLUEFIN_CLI_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/");
    println!("cargo:rerun-if-env-changed=BLUEFIN_CLI_VERSION");
}
