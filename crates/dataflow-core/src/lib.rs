pub mod config;
pub mod telemetry;
pub mod version;

pub use config::{ConfigError, ConfigResult, DispatchConfig, EngineConfig, LogConfig, SchedulerConfig};
pub use version::BuildInfo;
