//! Engine configuration parser.
//!
//! Reads a TOML file with `[scheduler]`, `[dispatch]` and `[log]` tables.
//! Every field is optional; missing values fall back to the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cool-down between interval-gated balance rounds.
pub const DEFAULT_CHECK_BALANCE_INTERVAL: &str = "60s";
/// Default number of moves a single balance round may produce.
pub const DEFAULT_MAX_TASK_CONCURRENCY: usize = 10;
/// Default control loop tick.
pub const DEFAULT_TICK_INTERVAL: &str = "1s";
/// Default wait between pre-dispatch attempts.
pub const DEFAULT_PRE_DISPATCH_RETRY_INTERVAL: &str = "1s";
/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid duration for `{field}`: {value:?}")]
    InvalidDuration { field: &'static str, value: String },

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub scheduler: SchedulerConfig,
    pub dispatch: DispatchConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Minimum time between two interval-gated balance rounds (e.g. "60s").
    pub check_balance_interval: String,
    /// Upper bound on the moves produced by one balance round.
    pub max_task_concurrency: usize,
    /// How often the control loop ticks the scheduler (e.g. "1s").
    pub tick_interval: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Wait between two pre-dispatch attempts (e.g. "1s", "500ms").
    pub pre_dispatch_retry_interval: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            check_balance_interval: DEFAULT_CHECK_BALANCE_INTERVAL.to_string(),
            max_task_concurrency: DEFAULT_MAX_TASK_CONCURRENCY,
            tick_interval: DEFAULT_TICK_INTERVAL.to_string(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            pre_dispatch_retry_interval: DEFAULT_PRE_DISPATCH_RETRY_INTERVAL.to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> ConfigResult<()> {
        self.scheduler.check_balance_interval()?;
        if self.scheduler.tick_interval()?.is_zero() {
            return Err(ConfigError::Invalid {
                field: "scheduler.tick_interval",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.scheduler.max_task_concurrency == 0 {
            return Err(ConfigError::Invalid {
                field: "scheduler.max_task_concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.dispatch.pre_dispatch_retry_interval()?.is_zero() {
            return Err(ConfigError::Invalid {
                field: "dispatch.pre_dispatch_retry_interval",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log.filter",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl SchedulerConfig {
    /// A zero interval means every tick may balance.
    pub fn check_balance_interval(&self) -> ConfigResult<Duration> {
        duration_field("scheduler.check_balance_interval", &self.check_balance_interval)
    }

    pub fn tick_interval(&self) -> ConfigResult<Duration> {
        duration_field("scheduler.tick_interval", &self.tick_interval)
    }
}

impl DispatchConfig {
    pub fn pre_dispatch_retry_interval(&self) -> ConfigResult<Duration> {
        duration_field(
            "dispatch.pre_dispatch_retry_interval",
            &self.pre_dispatch_retry_interval,
        )
    }
}

fn duration_field(field: &'static str, value: &str) -> ConfigResult<Duration> {
    parse_duration(value).ok_or_else(|| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
    })
}

/// Parse a human-readable duration such as "500ms", "5s", "2m" or a bare
/// number of seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}
