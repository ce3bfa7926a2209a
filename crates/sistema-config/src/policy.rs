//! Validated policy structures

use crate::schema::{RawAppConfig, RawConfig, RawRules};
use sistema_util::default_data_dir;
use std::path::PathBuf;

/// Validated configuration ready for use by the engine
#[derive(Debug, Clone, Default)]
pub struct Policy {
    pub app: AppConfig,
    pub rules: Rules,
}

impl Policy {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            app: AppConfig::from_raw(raw.app),
            rules: Rules::from_raw(raw.rules),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    fn from_raw(raw: RawAppConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(default_data_dir),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Tunable constants of the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Length of a freeze in hours
    pub freeze_hours: u32,
    /// Elapsed days before the rotating cycle advances
    pub cycle_length_days: u32,
    /// Failed outcomes that make a closed day "bad"
    pub bad_day_failures: u32,
    /// Digital streak length that grants the self-control bonus
    pub digital_bonus_streak: u32,
    /// Self-control points granted by the bonus
    pub digital_bonus: u32,
    /// Append each closed day to history during the daily reset
    pub record_history: bool,
}

impl Rules {
    fn from_raw(raw: RawRules) -> Self {
        let defaults = Self::default();
        Self {
            freeze_hours: raw.freeze_hours.unwrap_or(defaults.freeze_hours),
            cycle_length_days: raw.cycle_length_days.unwrap_or(defaults.cycle_length_days),
            bad_day_failures: raw.bad_day_failures.unwrap_or(defaults.bad_day_failures),
            digital_bonus_streak: raw
                .digital_bonus_streak
                .unwrap_or(defaults.digital_bonus_streak),
            digital_bonus: raw.digital_bonus.unwrap_or(defaults.digital_bonus),
            record_history: raw.record_history.unwrap_or(defaults.record_history),
        }
    }

    pub fn freeze_duration(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.freeze_hours))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            freeze_hours: 48,
            cycle_length_days: 3,
            bad_day_failures: 2,
            digital_bonus_streak: 7,
            digital_bonus: 5,
            record_history: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = Rules::default();
        assert_eq!(rules.freeze_duration(), chrono::Duration::hours(48));
        assert_eq!(rules.cycle_length_days, 3);
        assert!(rules.record_history);
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let rules = Rules::from_raw(RawRules {
            freeze_hours: Some(12),
            ..Default::default()
        });
        assert_eq!(rules.freeze_hours, 12);
        assert_eq!(rules.bad_day_failures, 2);
        assert_eq!(rules.digital_bonus, 5);
    }

    #[test]
    fn test_explicit_data_dir() {
        let policy = Policy::from_raw(RawConfig {
            config_version: 1,
            app: RawAppConfig {
                data_dir: Some(PathBuf::from("/srv/sistema")),
            },
            rules: RawRules::default(),
        });
        assert_eq!(policy.app.data_dir, PathBuf::from("/srv/sistema"));
    }
}
