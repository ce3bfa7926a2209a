//! Freeze window: actions are refused after two consecutive bad days

use chrono::{DateTime, Local, NaiveDate};
use sistema_api::{HistoryEntry, PersistedState};
use sistema_config::Rules;
use sistema_util::day_before;
use tracing::warn;

use crate::CoreEvent;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// True while `now` is before the freeze expiry
pub fn is_frozen(state: &PersistedState, now: DateTime<Local>) -> bool {
    match state.frozen_until {
        Some(until) => now < until,
        None => false,
    }
}

/// Whole hours left in the freeze, rounded up
pub fn hours_left(state: &PersistedState, now: DateTime<Local>) -> Option<i64> {
    let until = state.frozen_until?;
    if now >= until {
        return None;
    }
    let millis = until.signed_duration_since(now).num_milliseconds();
    Some((millis + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR)
}

/// A day is bad when enough of its recorded outcomes failed
pub fn is_bad_day(entry: &HistoryEntry, rules: &Rules) -> bool {
    entry.failures() >= rules.bad_day_failures as usize
}

/// Whether the day being closed and the day before it are both bad.
///
/// Days absent from history never count as bad.
pub fn should_freeze(state: &PersistedState, closing: NaiveDate, rules: &Rules) -> bool {
    let closing_day = state.history_for(closing);
    let previous_day = state.history_for(day_before(closing));

    match (closing_day, previous_day) {
        (Some(closing_day), Some(previous_day)) => {
            is_bad_day(closing_day, rules) && is_bad_day(previous_day, rules)
        }
        _ => false,
    }
}

/// Start a freeze lasting `rules.freeze_hours` from `now`
pub fn start_freeze(state: &mut PersistedState, now: DateTime<Local>, rules: &Rules) -> CoreEvent {
    let until = now + rules.freeze_duration();
    state.frozen_until = Some(until);

    warn!(until = %until, "Two consecutive bad days, freezing");

    CoreEvent::FreezeStarted { until }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sistema_api::MissionKey;
    use std::collections::BTreeMap;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 10, 7, 30, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn entry(date: NaiveDate, failed: usize) -> HistoryEntry {
        let keys = [MissionKey::Movimento, MissionKey::Mental, MissionKey::Digital];
        let missions: BTreeMap<MissionKey, bool> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (*k, i >= failed))
            .collect();
        HistoryEntry { date, missions }
    }

    #[test]
    fn test_not_frozen_without_expiry() {
        let state = PersistedState::new(now());
        assert!(!is_frozen(&state, now()));
        assert_eq!(hours_left(&state, now()), None);
    }

    #[test]
    fn test_freeze_expires_lazily() {
        let mut state = PersistedState::new(now());
        let rules = Rules::default();
        start_freeze(&mut state, now(), &rules);

        assert!(is_frozen(&state, now()));
        assert!(is_frozen(&state, now() + chrono::Duration::hours(47)));
        assert!(!is_frozen(&state, now() + chrono::Duration::hours(48)));
    }

    #[test]
    fn test_hours_left_rounds_up() {
        let mut state = PersistedState::new(now());
        state.frozen_until = Some(now() + chrono::Duration::minutes(90));
        assert_eq!(hours_left(&state, now()), Some(2));

        state.frozen_until = Some(now() + chrono::Duration::hours(48));
        assert_eq!(hours_left(&state, now()), Some(48));
    }

    #[test]
    fn test_bad_day_threshold() {
        let rules = Rules::default();
        assert!(!is_bad_day(&entry(day(1), 1), &rules));
        assert!(is_bad_day(&entry(day(1), 2), &rules));
        assert!(is_bad_day(&entry(day(1), 3), &rules));
    }

    #[test]
    fn test_two_bad_days_freeze() {
        let mut state = PersistedState::new(now());
        state.history = vec![entry(day(8), 2), entry(day(9), 3)];
        assert!(should_freeze(&state, day(9), &Rules::default()));
    }

    #[test]
    fn test_bad_then_good_does_not_freeze() {
        let mut state = PersistedState::new(now());
        state.history = vec![entry(day(8), 2), entry(day(9), 0)];
        assert!(!should_freeze(&state, day(9), &Rules::default()));
    }

    #[test]
    fn test_gap_between_bad_days_does_not_freeze() {
        let mut state = PersistedState::new(now());
        state.history = vec![entry(day(7), 2), entry(day(9), 2)];
        assert!(!should_freeze(&state, day(9), &Rules::default()));
    }

    #[test]
    fn test_missing_history_never_freezes() {
        let state = PersistedState::new(now());
        assert!(!should_freeze(&state, day(9), &Rules::default()));
    }
}
