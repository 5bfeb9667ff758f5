//! Stamps the binary with its commit and build day for `battles --version`.
//!
//! `BUILD_COMMIT` / `BUILD_DATE` override the detected values. Without
//! `BUILD_DATE`, `SOURCE_DATE_EPOCH` pins the day for reproducible builds.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn short_commit() -> String {
    if let Ok(commit) = env::var("BUILD_COMMIT") {
        return commit;
    }
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_day() -> String {
    if let Ok(date) = env::var("BUILD_DATE") {
        return date;
    }
    let pinned = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| chrono::DateTime::<chrono::Utc>::from_timestamp(secs, 0));
    pinned
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y-%m-%d")
        .to_string()
}

fn main() {
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let stamp = format!(
        "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
        short_commit(),
        build_day()
    );
    fs::write(Path::new(&out_dir).join("build_info.rs"), stamp)
        .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    for var in ["BUILD_COMMIT", "BUILD_DATE", "SOURCE_DATE_EPOCH"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
}
