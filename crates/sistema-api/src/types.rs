//! Shared presentation types

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a feedback message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSeverity {
    Success,
    Fail,
    Info,
}

/// Overall label derived from the weekly completion rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    AwaitingExecution,
    Insufficient,
    Regular,
    Good,
    Excellent,
}

impl SystemStatus {
    /// Classify a rounded completion percentage
    pub fn from_rate_percent(rate: u32) -> Self {
        if rate >= 90 {
            SystemStatus::Excellent
        } else if rate >= 80 {
            SystemStatus::Good
        } else if rate >= 60 {
            SystemStatus::Regular
        } else if rate > 0 {
            SystemStatus::Insufficient
        } else {
            SystemStatus::AwaitingExecution
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SystemStatus::AwaitingExecution => "AWAITING EXECUTION",
            SystemStatus::Insufficient => "INSUFFICIENT",
            SystemStatus::Regular => "REGULAR",
            SystemStatus::Good => "GOOD",
            SystemStatus::Excellent => "EXCELLENT",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds() {
        assert_eq!(SystemStatus::from_rate_percent(0), SystemStatus::AwaitingExecution);
        assert_eq!(SystemStatus::from_rate_percent(1), SystemStatus::Insufficient);
        assert_eq!(SystemStatus::from_rate_percent(59), SystemStatus::Insufficient);
        assert_eq!(SystemStatus::from_rate_percent(60), SystemStatus::Regular);
        assert_eq!(SystemStatus::from_rate_percent(80), SystemStatus::Good);
        assert_eq!(SystemStatus::from_rate_percent(90), SystemStatus::Excellent);
        assert_eq!(SystemStatus::from_rate_percent(100), SystemStatus::Excellent);
    }

    #[test]
    fn severity_serialization() {
        let json = serde_json::to_string(&FeedbackSeverity::Fail).unwrap();
        assert_eq!(json, "\"fail\"");
    }
}
