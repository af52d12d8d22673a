use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;

/// The `[logging]` table of `configuration.toml`.
#[serde_inline_default]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Without it the host installs no logger at all.
    #[serde_inline_default(true)]
    pub enabled: bool,
    #[serde_inline_default(LevelFilter::Info)]
    pub level: LevelFilter,
    /// Let `RUST_LOG` override `level`
    #[serde_inline_default(false)]
    pub env: bool,
    /// Print the thread name next to each line.
    #[serde_inline_default(false)]
    pub threads: bool,
    #[serde_inline_default(true)]
    pub color: bool,
    #[serde_inline_default(true)]
    pub timestamp: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Info,
            env: false,
            threads: false,
            color: true,
            timestamp: true,
        }
    }
}

/// Mirror of [`log::LevelFilter`] that reads as a lower-case word in TOML.
#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LevelFilter {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LevelFilter> for log::LevelFilter {
    fn from(level: LevelFilter) -> Self {
        match level {
            LevelFilter::Off => Self::Off,
            LevelFilter::Error => Self::Error,
            LevelFilter::Warn => Self::Warn,
            LevelFilter::Info => Self::Info,
            LevelFilter::Debug => Self::Debug,
            LevelFilter::Trace => Self::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LevelFilter, LoggingConfig};

    #[test]
    fn partial_table_keeps_defaults() {
        let config: LoggingConfig = toml::from_str("level = \"debug\"\ncolor = false\n").unwrap();
        assert_eq!(config.level, LevelFilter::Debug);
        assert!(!config.color);
        assert!(config.enabled);
        assert!(config.timestamp);
        assert_eq!(log::LevelFilter::from(config.level), log::LevelFilter::Debug);
    }
}
