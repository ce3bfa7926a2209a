//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Application settings
    #[serde(default)]
    pub app: RawAppConfig,

    /// Engine rule overrides
    #[serde(default)]
    pub rules: RawRules,
}

/// Application-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAppConfig {
    /// Directory holding the state database
    pub data_dir: Option<PathBuf>,
}

/// Rule overrides. Anything left out keeps its default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRules {
    /// Length of a freeze, in hours (default 48)
    pub freeze_hours: Option<u32>,

    /// Days before the rotating cycle advances (default 3)
    pub cycle_length_days: Option<u32>,

    /// Failed outcomes that make a day "bad" (default 2)
    pub bad_day_failures: Option<u32>,

    /// Consecutive digital successes that grant the self-control bonus (default 7)
    pub digital_bonus_streak: Option<u32>,

    /// Self-control points granted by the bonus (default 5)
    pub digital_bonus: Option<u32>,

    /// Record each closed day into history before evaluating the freeze (default true)
    pub record_history: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [app]
            data_dir = "/var/lib/sistema"

            [rules]
            freeze_hours = 24
            cycle_length_days = 4
            record_history = false
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.data_dir, Some(PathBuf::from("/var/lib/sistema")));
        assert_eq!(config.rules.freeze_hours, Some(24));
        assert_eq!(config.rules.cycle_length_days, Some(4));
        assert_eq!(config.rules.record_history, Some(false));
        assert!(config.rules.bad_day_failures.is_none());
    }

    #[test]
    fn sections_are_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.app.data_dir.is_none());
        assert!(config.rules.freeze_hours.is_none());
    }
}
