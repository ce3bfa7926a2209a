//! Attribute effects of successful missions

use chrono::{DateTime, Local};
use sistema_api::{Attribute, MissionKey, PersistedState, WeeklyData};
use sistema_config::Rules;
use tracing::{debug, info};

use crate::CoreEvent;

/// Attribute gain for a successful mission that carries one
pub const MISSION_GAIN: i32 = 2;

/// Discipline change driven by the weekly completion rate.
///
/// Compared in integer percent space so 9/10 counts as exactly 90%.
pub fn discipline_adjustment(weekly: &WeeklyData) -> i32 {
    let completed = u64::from(weekly.completed_missions) * 100;
    let total = u64::from(weekly.total_missions);

    if total == 0 {
        return -2;
    }

    if completed >= total * 90 {
        3
    } else if completed >= total * 80 {
        1
    } else if completed < total * 60 {
        -2
    } else {
        0
    }
}

/// Apply the attribute effects of a successful mission.
///
/// Runs after the weekly counters were updated for this action.
pub fn apply_success(
    state: &mut PersistedState,
    key: MissionKey,
    now: DateTime<Local>,
    rules: &Rules,
) -> Vec<CoreEvent> {
    let mut events = Vec::new();
    let attributes = &mut state.attributes;

    match key {
        MissionKey::Movimento => {
            attributes.adjust(Attribute::Forca, MISSION_GAIN);
            state.strength_training.last_workout = Some(now);
            state.strength_training.weekly_count += 1;
        }
        MissionKey::Mental => {
            attributes.adjust(Attribute::Disciplina, MISSION_GAIN);
        }
        MissionKey::Digital => {
            state.digital_control_streak += 1;
            if state.digital_control_streak == rules.digital_bonus_streak {
                let bonus = i32::try_from(rules.digital_bonus).unwrap_or(i32::MAX);
                let value = attributes.adjust(Attribute::Autocontrole, bonus);
                info!(
                    streak = state.digital_control_streak,
                    autocontrole = value,
                    "Digital streak bonus granted"
                );
                events.push(CoreEvent::SelfControlIncreased { value });
            }
        }
        MissionKey::Alimentar => {
            attributes.adjust(Attribute::Disciplina, 1);
        }
        _ => {}
    }

    let delta = discipline_adjustment(&state.weekly_data);
    if delta != 0 {
        let value = state.attributes.adjust(Attribute::Disciplina, delta);
        debug!(delta, disciplina = value, "Weekly rate adjusted discipline");
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sistema_api::ATTRIBUTE_MAX;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 2, 12, 20, 0, 0).unwrap()
    }

    fn weekly(total: u32, completed: u32) -> WeeklyData {
        WeeklyData {
            total_missions: total,
            completed_missions: completed,
            ..WeeklyData::default()
        }
    }

    #[test]
    fn test_discipline_thresholds() {
        assert_eq!(discipline_adjustment(&weekly(10, 9)), 3);
        assert_eq!(discipline_adjustment(&weekly(11, 10)), 3);
        assert_eq!(discipline_adjustment(&weekly(10, 8)), 1);
        assert_eq!(discipline_adjustment(&weekly(10, 7)), 0);
        assert_eq!(discipline_adjustment(&weekly(10, 6)), 0);
        assert_eq!(discipline_adjustment(&weekly(10, 5)), -2);
        assert_eq!(discipline_adjustment(&weekly(0, 0)), -2);
    }

    #[test]
    fn test_high_rate_stacks_with_mission_gain() {
        let mut state = PersistedState::new(now());
        state.weekly_data = weekly(11, 10);

        apply_success(&mut state, MissionKey::Mental, now(), &Rules::default());
        assert_eq!(state.attributes.disciplina, 5);
    }

    #[test]
    fn test_movimento_logs_workout() {
        let mut state = PersistedState::new(now());
        state.weekly_data = weekly(1, 1);

        apply_success(&mut state, MissionKey::Movimento, now(), &Rules::default());
        assert_eq!(state.attributes.forca, 2);
        assert_eq!(state.strength_training.weekly_count, 1);
        assert_eq!(state.strength_training.last_workout, Some(now()));
        assert_eq!(state.cardio_training.weekly_count, 0);
    }

    #[test]
    fn test_low_rate_floors_at_zero() {
        let mut state = PersistedState::new(now());
        state.weekly_data = weekly(10, 1);

        apply_success(&mut state, MissionKey::Agua, now(), &Rules::default());
        assert_eq!(state.attributes.disciplina, 0);
    }

    #[test]
    fn test_gains_saturate_at_max() {
        let mut state = PersistedState::new(now());
        state.attributes.forca = ATTRIBUTE_MAX - 1;
        state.weekly_data = weekly(1, 1);

        apply_success(&mut state, MissionKey::Movimento, now(), &Rules::default());
        assert_eq!(state.attributes.forca, ATTRIBUTE_MAX);
    }

    #[test]
    fn test_digital_bonus_only_on_threshold() {
        let rules = Rules::default();
        let mut state = PersistedState::new(now());
        state.weekly_data = weekly(1, 1);
        state.digital_control_streak = 5;

        let events = apply_success(&mut state, MissionKey::Digital, now(), &rules);
        assert!(events.is_empty());
        assert_eq!(state.attributes.autocontrole, 0);

        let events = apply_success(&mut state, MissionKey::Digital, now(), &rules);
        assert_eq!(events, vec![CoreEvent::SelfControlIncreased { value: 5 }]);
        assert_eq!(state.digital_control_streak, 7);

        let events = apply_success(&mut state, MissionKey::Digital, now(), &rules);
        assert!(events.is_empty());
        assert_eq!(state.attributes.autocontrole, 5);
    }
}
