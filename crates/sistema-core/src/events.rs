//! Core events emitted by the engine

use chrono::{DateTime, Local, NaiveDate};
use sistema_api::{Cycle, FeedbackSeverity, MissionKey, MissionStatus};

/// Events emitted by the core engine
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// No usable stored document; started from the default state
    StateInitialized { discarded_malformed: bool },

    /// A closed day was appended to history
    HistoryRecorded { date: NaiveDate, failures: usize },

    /// Two consecutive bad days started a freeze
    FreezeStarted { until: DateTime<Local> },

    /// The rotating cycle advanced
    CycleAdvanced { from: Cycle, to: Cycle },

    /// A new week began; workout counters were zeroed
    WeeklyCountersReset,

    /// The daily missions were cleared for a new day
    DayRolledOver { closed: NaiveDate, opened: NaiveDate },

    /// The system is inside a freeze window
    FrozenNotice {
        until: DateTime<Local>,
        hours_left: i64,
    },

    /// A mission outcome was recorded
    MissionRecorded {
        key: MissionKey,
        status: MissionStatus,
    },

    /// The digital streak bonus was granted
    SelfControlIncreased { value: u8 },
}

impl CoreEvent {
    /// User-facing feedback for this event, if it warrants any
    pub fn feedback(&self) -> Option<(String, FeedbackSeverity)> {
        match self {
            CoreEvent::MissionRecorded {
                status: MissionStatus::Completed,
                ..
            } => Some(("Mission completed.".into(), FeedbackSeverity::Success)),
            CoreEvent::MissionRecorded {
                status: MissionStatus::Failed,
                ..
            } => Some(("Failure recorded.".into(), FeedbackSeverity::Fail)),
            CoreEvent::SelfControlIncreased { .. } => Some((
                "Self-control bar increased.".into(),
                FeedbackSeverity::Success,
            )),
            CoreEvent::FrozenNotice { hours_left, .. } => Some((
                format!(
                    "System frozen for {}h due to consecutive failures.",
                    hours_left
                ),
                FeedbackSeverity::Fail,
            )),
            CoreEvent::CycleAdvanced { to, .. } => {
                Some((format!("Cycle {} started.", to), FeedbackSeverity::Info))
            }
            CoreEvent::StateInitialized {
                discarded_malformed: true,
            } => Some((
                "Saved progress was unreadable and has been reset.".into(),
                FeedbackSeverity::Fail,
            )),
            _ => None,
        }
    }
}
