//! Build script for inbox-cli.
//!
//! Embeds the commit and build date shown by `inbox --version`.
//!
//! - `INBOX_GIT_HASH` overrides the commit (for builds from a source archive).
//! - `SOURCE_DATE_EPOCH` pins the build date for reproducible builds.

use chrono::{DateTime, Utc};

fn git_hash() -> String {
    if let Ok(hash) = std::env::var("INBOX_GIT_HASH") {
        let hash = hash.trim();
        if !hash.is_empty() {
            return hash.to_string();
        }
    }

    std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_date() -> String {
    let pinned = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    match pinned {
        Some(when) => when.format("%Y-%m-%d").to_string(),
        None => Utc::now().format("%Y-%m-%d").to_string(),
    }
}

fn main() {
    println!("cargo:rustc-env=GIT_HASH={}", git_hash());
    println!("cargo:rustc-env=BUILD_DATE={}", build_date());

    println!("cargo:rerun-if-env-changed=INBOX_GIT_HASH");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/heads/");
}
