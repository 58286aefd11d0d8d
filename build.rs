//! Embeds build provenance for `thumbcard --version`.
//!
//! `BUILD_GIT_HASH` is the short commit hash (empty outside a git checkout) and
//! `BUILD_ON_TAG` is `true` when HEAD is exactly a release tag.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let on_tag = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    println!("cargo:rustc-env=BUILD_GIT_HASH={hash}");
    println!("cargo:rustc-env=BUILD_ON_TAG={on_tag}");
}
