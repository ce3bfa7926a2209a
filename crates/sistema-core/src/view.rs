//! Read-only projection of the state onto a front-end

use chrono::{DateTime, Local};
use sistema_api::{
    Attributes, Cycle, FeedbackSeverity, MissionBoard, PersistedState, SystemStatus, WeeklyData,
};
use sistema_util::SistemaError;

use crate::{CoreEvent, freeze};

/// Weekly completion summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyStats {
    /// Completion rate rounded to the nearest percent
    pub rate_percent: u32,
    pub streak: u32,
    pub status: SystemStatus,
}

impl WeeklyStats {
    pub fn from_weekly(weekly: &WeeklyData) -> Self {
        let rate_percent = rounded_percent(weekly.completed_missions, weekly.total_missions);
        Self {
            rate_percent,
            streak: weekly.current_streak,
            status: SystemStatus::from_rate_percent(rate_percent),
        }
    }
}

/// `completed / total` as a percentage, halves rounded up
fn rounded_percent(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed);
    let total = u64::from(total);
    ((completed * 200 + total) / (total * 2)) as u32
}

/// Something that can display the system
pub trait Frontend {
    fn render_missions(&mut self, daily: &MissionBoard, rotating: &MissionBoard, cycle: Cycle);
    fn render_attributes(&mut self, attributes: &Attributes);
    fn render_weekly_stats(&mut self, stats: &WeeklyStats);
    fn show_feedback(&mut self, message: &str, severity: FeedbackSeverity);
    fn mark_frozen(&mut self, frozen: bool);
}

/// Feedback for an action the engine refused
pub fn rejection_feedback(err: &SistemaError) -> (String, FeedbackSeverity) {
    match err {
        SistemaError::Frozen { .. } => (
            "System frozen. Wait for the freeze to end.".into(),
            FeedbackSeverity::Fail,
        ),
        SistemaError::UnknownMission(key) => (
            format!("Mission '{}' is not active today.", key),
            FeedbackSeverity::Fail,
        ),
        other => (other.to_string(), FeedbackSeverity::Fail),
    }
}

/// Push a full projection of `state` to the front-end.
///
/// Events that carry feedback are shown in order after the boards.
pub fn render(
    frontend: &mut dyn Frontend,
    state: &PersistedState,
    events: &[CoreEvent],
    now: DateTime<Local>,
) {
    frontend.render_missions(
        &state.daily_missions,
        &state.rotating_missions,
        state.rotating_cycle,
    );
    frontend.render_attributes(&state.attributes);
    frontend.render_weekly_stats(&WeeklyStats::from_weekly(&state.weekly_data));
    frontend.mark_frozen(freeze::is_frozen(state, now));

    for (message, severity) in events.iter().filter_map(CoreEvent::feedback) {
        frontend.show_feedback(&message, severity);
    }
}
