//! Tracing subscriber setup shared by every engine process.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence; `default_filter` (usually `log.filter` from
/// the engine config) is used otherwise. Fails if a global subscriber is
/// already installed.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = build_filter(default_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;
    Ok(())
}

fn build_filter(default_filter: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter {default_filter:?}")),
    }
}
