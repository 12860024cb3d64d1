//! Build metadata for the engine.
//!
//! The release version comes from the package manifest. The remaining
//! fields are read from optional compile-time environment variables set by
//! the release pipeline and render as `"None"` for local builds.

use std::fmt::Write as _;

use tracing::info;

const UNSET: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub release_version: &'static str,
    pub git_hash: &'static str,
    pub git_branch: &'static str,
    pub build_ts: &'static str,
    pub rustc_version: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            release_version: env!("CARGO_PKG_VERSION"),
            git_hash: or_unset(option_env!("DATAFLOW_GIT_HASH")),
            git_branch: or_unset(option_env!("DATAFLOW_GIT_BRANCH")),
            build_ts: or_unset(option_env!("DATAFLOW_BUILD_TS")),
            rustc_version: or_unset(option_env!("DATAFLOW_RUSTC_VERSION")),
        }
    }
}

const fn or_unset(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => UNSET,
    }
}

/// Emit the build metadata as a single structured log event.
pub fn log_version_info() {
    let build = BuildInfo::current();
    info!(
        release_version = build.release_version,
        git_hash = build.git_hash,
        git_branch = build.git_branch,
        utc_build_time = build.build_ts,
        rustc_version = build.rustc_version,
        "welcome to the dataflow engine"
    );
}

/// Multi-line `Key: value` rendering, one field per line.
pub fn raw_info() -> String {
    let build = BuildInfo::current();
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Release Version: {}", build.release_version);
    let _ = writeln!(out, "Git Commit Hash: {}", build.git_hash);
    let _ = writeln!(out, "Git Branch: {}", build.git_branch);
    let _ = writeln!(out, "UTC Build Time: {}", build.build_ts);
    let _ = writeln!(out, "Rust Version: {}", build.rustc_version);
    out
}
