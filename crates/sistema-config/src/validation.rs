//! Configuration validation

use crate::schema::{RawConfig, RawRules};
use thiserror::Error;

/// Missions that can be recorded in one day: four daily plus two rotating
pub const MISSIONS_PER_DAY: u32 = 6;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Rule '{rule}': {message}")]
    RuleError { rule: &'static str, message: String },

    #[error("Global config error: {0}")]
    GlobalError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = validate_rules(&config.rules);

    if let Some(dir) = &config.app.data_dir {
        if dir.as_os_str().is_empty() {
            errors.push(ValidationError::GlobalError(
                "app.data_dir cannot be empty".into(),
            ));
        }
    }

    errors
}

fn validate_rules(rules: &RawRules) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if rules.freeze_hours == Some(0) {
        errors.push(rule_error("freeze_hours", "must be at least 1"));
    }

    if rules.cycle_length_days == Some(0) {
        errors.push(rule_error("cycle_length_days", "must be at least 1"));
    }

    if let Some(failures) = rules.bad_day_failures {
        if failures == 0 || failures > MISSIONS_PER_DAY {
            errors.push(rule_error(
                "bad_day_failures",
                format!("must be between 1 and {}", MISSIONS_PER_DAY),
            ));
        }
    }

    if rules.digital_bonus_streak == Some(0) {
        errors.push(rule_error("digital_bonus_streak", "must be at least 1"));
    }

    if let Some(bonus) = rules.digital_bonus {
        if bonus > 100 {
            errors.push(rule_error("digital_bonus", "cannot exceed 100"));
        }
    }

    errors
}

fn rule_error(rule: &'static str, message: impl Into<String>) -> ValidationError {
    ValidationError::RuleError {
        rule,
        message: message.into(),
    }
}
