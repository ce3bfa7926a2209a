//! Daily rollover

use chrono::{DateTime, Local};
use sistema_api::{MissionBoard, PersistedState};
use sistema_config::Rules;
use sistema_util::{calendar_day_key, week_number, week_number_of_day};
use tracing::{debug, info};

use crate::{CoreEvent, cycle, freeze};

/// Whether the stored day differs from the calendar day of `now`
pub fn needs_reset(state: &PersistedState, now: DateTime<Local>) -> bool {
    state.last_reset_date != calendar_day_key(&now)
}

/// Close the stored day and open today.
///
/// Steps run in a fixed order: record the closing day, check for a freeze,
/// rotate the cycle, zero the weekly counters on a new week, then clear the
/// boards. Does nothing when the stored day is already today.
pub fn roll_over(state: &mut PersistedState, now: DateTime<Local>, rules: &Rules) -> Vec<CoreEvent> {
    let mut events = Vec::new();
    if !needs_reset(state, now) {
        return events;
    }

    let closing = state.last_reset_date;
    let today = calendar_day_key(&now);

    if rules.record_history && state.history_for(closing).is_none() {
        let entry = state.snapshot();
        let failures = entry.failures();
        debug!(date = %closing, outcomes = entry.missions.len(), failures, "Recording closed day");
        state.history.push(entry);
        events.push(CoreEvent::HistoryRecorded {
            date: closing,
            failures,
        });
    }

    if freeze::should_freeze(state, closing, rules) {
        events.push(freeze::start_freeze(state, now, rules));
    }

    if let Some(event) = cycle::rotate_if_due(state, now, rules) {
        events.push(event);
    }

    if week_number(&now) != week_number_of_day(closing) {
        state.strength_training.weekly_count = 0;
        state.cardio_training.weekly_count = 0;
        debug!("New week, training counters reset");
        events.push(CoreEvent::WeeklyCountersReset);
    }

    state.daily_missions = MissionBoard::daily();
    state.rotating_missions = MissionBoard::rotating(state.rotating_cycle);
    state.last_reset_date = today;

    info!(closed = %closing, opened = %today, "Day rolled over");
    events.push(CoreEvent::DayRolledOver {
        closed: closing,
        opened: today,
    });

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::missions::complete_mission;
    use chrono::{NaiveDate, TimeZone};
    use sistema_api::{Cycle, MissionKey, MissionStatus};

    fn at(day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut state = PersistedState::new(at(10, 8));
        state.daily_missions.set(MissionKey::Mental, MissionStatus::Completed);
        let before = state.clone();

        assert!(!needs_reset(&state, at(10, 23)));
        assert!(roll_over(&mut state, at(10, 23), &Rules::default()).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_rollover_clears_boards_and_keeps_progress() {
        let rules = Rules::default();
        let mut state = PersistedState::new(at(10, 8));
        complete_mission(&mut state, "mental", true, at(10, 9), &rules).unwrap();
        complete_mission(&mut state, "agua", false, at(10, 9), &rules).unwrap();
        let attributes = state.attributes;

        let events = roll_over(&mut state, at(11, 7), &rules);

        assert_eq!(state.last_reset_date, date(11));
        assert!(state.daily_missions.iter().all(|(_, s)| !s.is_set()));
        assert!(state.rotating_missions.iter().all(|(_, s)| !s.is_set()));
        assert_eq!(state.attributes, attributes);
        assert_eq!(state.weekly_data.total_missions, 2);
        assert_eq!(
            events.last(),
            Some(&CoreEvent::DayRolledOver {
                closed: date(10),
                opened: date(11)
            })
        );
    }

    #[test]
    fn test_rollover_records_history_once() {
        let rules = Rules::default();
        let mut state = PersistedState::new(at(10, 8));
        complete_mission(&mut state, "mental", true, at(10, 9), &rules).unwrap();
        complete_mission(&mut state, "digital", false, at(10, 9), &rules).unwrap();

        roll_over(&mut state, at(11, 7), &rules);

        assert_eq!(state.history.len(), 1);
        let entry = &state.history[0];
        assert_eq!(entry.date, date(10));
        assert_eq!(entry.missions.len(), 2);
        assert_eq!(entry.missions.get(&MissionKey::Mental), Some(&true));
        assert_eq!(entry.missions.get(&MissionKey::Digital), Some(&false));
    }

    #[test]
    fn test_history_disabled_leaves_history_alone() {
        let rules = Rules {
            record_history: false,
            ..Rules::default()
        };
        let mut state = PersistedState::new(at(10, 8));
        complete_mission(&mut state, "mental", false, at(10, 9), &rules).unwrap();
        complete_mission(&mut state, "digital", false, at(10, 9), &rules).unwrap();

        roll_over(&mut state, at(11, 7), &rules);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_two_bad_days_freeze_on_rollover() {
        let rules = Rules::default();
        let mut state = PersistedState::new(at(10, 8));

        complete_mission(&mut state, "mental", false, at(10, 9), &rules).unwrap();
        complete_mission(&mut state, "digital", false, at(10, 9), &rules).unwrap();
        let events = roll_over(&mut state, at(11, 7), &rules);
        assert!(!events.iter().any(|e| matches!(e, CoreEvent::FreezeStarted { .. })));
        assert!(state.frozen_until.is_none());

        complete_mission(&mut state, "movimento", false, at(11, 9), &rules).unwrap();
        complete_mission(&mut state, "alimentar", false, at(11, 9), &rules).unwrap();
        let events = roll_over(&mut state, at(12, 7), &rules);

        let until = at(12, 7) + chrono::Duration::hours(48);
        assert!(events.contains(&CoreEvent::FreezeStarted { until }));
        assert_eq!(state.frozen_until, Some(until));
    }

    #[test]
    fn test_bad_then_good_does_not_freeze() {
        let rules = Rules::default();
        let mut state = PersistedState::new(at(10, 8));

        complete_mission(&mut state, "mental", false, at(10, 9), &rules).unwrap();
        complete_mission(&mut state, "digital", false, at(10, 9), &rules).unwrap();
        roll_over(&mut state, at(11, 7), &rules);

        complete_mission(&mut state, "mental", true, at(11, 9), &rules).unwrap();
        complete_mission(&mut state, "digital", false, at(11, 9), &rules).unwrap();
        roll_over(&mut state, at(12, 7), &rules);

        assert!(state.frozen_until.is_none());
    }

    #[test]
    fn test_rollover_rotates_cycle_when_due() {
        let rules = Rules::default();
        let mut state = PersistedState::new(at(10, 8));

        let events = roll_over(&mut state, at(13, 9), &rules);

        assert_eq!(state.rotating_cycle, Cycle::B);
        assert!(events.contains(&CoreEvent::CycleAdvanced {
            from: Cycle::A,
            to: Cycle::B
        }));
        assert!(state.rotating_missions.contains(MissionKey::Acucar));
    }

    #[test]
    fn test_new_week_resets_training_counters() {
        let rules = Rules::default();
        // 2025-03-15 is a Saturday, 2025-03-16 a Sunday
        let mut state = PersistedState::new(at(15, 8));
        complete_mission(&mut state, "movimento", true, at(15, 9), &rules).unwrap();
        assert_eq!(state.strength_training.weekly_count, 1);

        let events = roll_over(&mut state, at(16, 9), &rules);
        assert!(events.contains(&CoreEvent::WeeklyCountersReset));
        assert_eq!(state.strength_training.weekly_count, 0);
        assert_eq!(state.cardio_training.weekly_count, 0);
    }

    #[test]
    fn test_same_week_keeps_training_counters() {
        let rules = Rules::default();
        // Tuesday to Wednesday
        let mut state = PersistedState::new(at(11, 8));
        complete_mission(&mut state, "movimento", true, at(11, 9), &rules).unwrap();

        let events = roll_over(&mut state, at(12, 9), &rules);
        assert!(!events.contains(&CoreEvent::WeeklyCountersReset));
        assert_eq!(state.strength_training.weekly_count, 1);
    }
}
