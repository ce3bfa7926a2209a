//! Rotating mission cycle

use chrono::{DateTime, Local};
use sistema_api::{Cycle, MissionBoard, PersistedState};
use sistema_config::Rules;
use sistema_util::days_between;
use tracing::info;

use crate::CoreEvent;

pub use sistema_api::rotating_mission_set_for;

/// Next cycle in the A → B → C → A rotation
pub fn advance_cycle(cycle: Cycle) -> Cycle {
    match cycle {
        Cycle::A => Cycle::B,
        Cycle::B => Cycle::C,
        Cycle::C => Cycle::A,
    }
}

/// Whether enough whole days have passed since the cycle started
pub fn is_rotation_due(state: &PersistedState, now: DateTime<Local>, rules: &Rules) -> bool {
    days_between(&state.cycle_start_date, &now) >= i64::from(rules.cycle_length_days)
}

/// Advance the cycle if it is due.
///
/// Restarts the cycle clock at `now` and replaces the rotating missions
/// with the new cycle's set, all unset. Calling this again before another
/// full cycle has elapsed does nothing.
pub fn rotate_if_due(
    state: &mut PersistedState,
    now: DateTime<Local>,
    rules: &Rules,
) -> Option<CoreEvent> {
    if !is_rotation_due(state, now, rules) {
        return None;
    }

    let from = state.rotating_cycle;
    let to = advance_cycle(from);

    state.rotating_cycle = to;
    state.cycle_start_date = now;
    state.rotating_missions = MissionBoard::rotating(to);

    info!(from = %from, to = %to, "Rotating cycle advanced");

    Some(CoreEvent::CycleAdvanced { from, to })
}
