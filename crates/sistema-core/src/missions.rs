//! Recording mission outcomes

use chrono::{DateTime, Local};
use sistema_api::{FeedbackSeverity, MissionKey, MissionStatus, PersistedState, WeeklyData};
use sistema_config::Rules;
use sistema_util::{calendar_day_key, previous_day_key, Result, SistemaError};
use tracing::{debug, info, warn};

use crate::{CoreEvent, attributes, freeze};

/// Which board a mission lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    Daily,
    Rotating,
}

/// Outcome of a recorded mission action
#[derive(Debug, Clone, PartialEq)]
pub struct MissionReport {
    pub key: MissionKey,
    pub status: MissionStatus,
    pub message: &'static str,
    pub severity: FeedbackSeverity,
    pub events: Vec<CoreEvent>,
}

/// Resolve a raw key against the current boards
pub fn classify(state: &PersistedState, key: &str) -> Result<(MissionKey, MissionKind)> {
    let mission: MissionKey = key
        .parse()
        .map_err(|_| SistemaError::unknown_mission(key))?;

    let (board, kind) = if mission.is_daily() {
        (&state.daily_missions, MissionKind::Daily)
    } else {
        (&state.rotating_missions, MissionKind::Rotating)
    };

    if board.contains(mission) {
        Ok((mission, kind))
    } else {
        Err(SistemaError::unknown_mission(key))
    }
}

/// Advance the completion streak for a success at `now`
pub fn update_streak(weekly: &mut WeeklyData, now: DateTime<Local>) {
    let today = calendar_day_key(&now);
    let yesterday = previous_day_key(&now);

    weekly.current_streak = match weekly.last_completion_date {
        None => 1,
        Some(last) if last == today => weekly.current_streak,
        Some(last) if last == yesterday => weekly.current_streak + 1,
        Some(_) => 1,
    };
    weekly.last_completion_date = Some(today);
}

/// Record a mission outcome.
///
/// Rejected actions (frozen system, key not on today's boards) leave the
/// state untouched.
pub fn complete_mission(
    state: &mut PersistedState,
    key: &str,
    success: bool,
    now: DateTime<Local>,
    rules: &Rules,
) -> Result<MissionReport> {
    if freeze::is_frozen(state, now) {
        let until = state.frozen_until.unwrap_or(now);
        warn!(mission = key, until = %until, "Action rejected, system frozen");
        return Err(SistemaError::Frozen { until });
    }

    let (mission, kind) = classify(state, key).inspect_err(|_| {
        warn!(mission = key, "Action rejected, mission not on today's boards");
    })?;

    let status = MissionStatus::from_outcome(success);
    match kind {
        MissionKind::Daily => state.daily_missions.set(mission, status),
        MissionKind::Rotating => state.rotating_missions.set(mission, status),
    };

    state.weekly_data.total_missions += 1;

    let mut events = vec![CoreEvent::MissionRecorded {
        key: mission,
        status,
    }];

    if success {
        state.weekly_data.completed_missions += 1;
        update_streak(&mut state.weekly_data, now);
        events.extend(attributes::apply_success(state, mission, now, rules));
    } else {
        state.weekly_data.current_streak = 0;
        if mission == MissionKey::Digital {
            state.digital_control_streak = 0;
            state.last_digital_fail = Some(now);
            debug!("Digital control streak broken");
        }
    }

    info!(
        mission = %mission,
        success,
        streak = state.weekly_data.current_streak,
        total = state.weekly_data.total_missions,
        completed = state.weekly_data.completed_missions,
        "Mission recorded"
    );

    let (message, severity) = if success {
        ("Mission completed.", FeedbackSeverity::Success)
    } else {
        ("Failure recorded.", FeedbackSeverity::Fail)
    };

    Ok(MissionReport {
        key: mission,
        status,
        message,
        severity,
        events,
    })
}
