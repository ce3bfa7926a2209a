//! Engine orchestrating load, rollover, actions and persistence

use chrono::{DateTime, Local};
use sistema_api::PersistedState;
use sistema_config::Rules;
use sistema_store::StateStore;
use sistema_util::{Clock, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{CoreEvent, MissionReport, WeeklyStats, cycle, freeze, missions, reset};

/// The sistema engine.
///
/// Owns the in-memory state between load and save. Every accepted
/// transition is written back to the store before it becomes visible.
pub struct SistemaEngine {
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    rules: Rules,
    state: PersistedState,
    /// Rollover events from rejected actions, not yet handed out
    pending: Vec<CoreEvent>,
}

impl SistemaEngine {
    /// Load the stored state and bring it up to date.
    ///
    /// Returns the engine and the events produced while starting up.
    pub fn open(
        store: Arc<dyn StateStore>,
        clock: Arc<dyn Clock>,
        rules: Rules,
    ) -> Result<(Self, Vec<CoreEvent>)> {
        let now = clock.now();
        let mut events = Vec::new();

        let mut state = Self::load_state(store.as_ref(), now, &mut events)?;

        events.extend(reset::roll_over(&mut state, now, &rules));

        if let Some(event) = cycle::rotate_if_due(&mut state, now, &rules) {
            events.push(event);
        }

        if let (Some(until), Some(hours_left)) =
            (state.frozen_until, freeze::hours_left(&state, now))
        {
            info!(until = %until, hours_left, "System is frozen");
            events.push(CoreEvent::FrozenNotice { until, hours_left });
        }

        store.save(&state)?;

        info!(
            day = %state.last_reset_date,
            cycle = %state.rotating_cycle,
            events = events.len(),
            "Engine started"
        );

        Ok((
            Self {
                store,
                clock,
                rules,
                state,
                pending: Vec::new(),
            },
            events,
        ))
    }

    fn load_state(
        store: &dyn StateStore,
        now: DateTime<Local>,
        events: &mut Vec<CoreEvent>,
    ) -> Result<PersistedState> {
        let mut state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("No stored state, starting fresh");
                events.push(CoreEvent::StateInitialized {
                    discarded_malformed: false,
                });
                return Ok(PersistedState::new(now));
            }
            Err(e) if e.is_malformed() => {
                warn!(error = %e, "Stored state is malformed, starting fresh");
                events.push(CoreEvent::StateInitialized {
                    discarded_malformed: true,
                });
                return Ok(PersistedState::new(now));
            }
            Err(e) => return Err(e.into()),
        };

        let violations = state.invariant_violations();
        if !violations.is_empty() {
            warn!(?violations, "Stored state violates invariants, normalizing");
            state.normalize();
        }

        debug!(day = %state.last_reset_date, "Stored state loaded");
        Ok(state)
    }

    /// Roll the day over if the calendar day changed since the last action
    pub fn refresh(&mut self) -> Result<Vec<CoreEvent>> {
        let now = self.clock.now();
        if !reset::needs_reset(&self.state, now) {
            return Ok(Vec::new());
        }

        let mut next = self.state.clone();
        let events = reset::roll_over(&mut next, now, &self.rules);
        self.store.save(&next)?;
        self.state = next;

        Ok(events)
    }

    /// Record a mission outcome and persist it.
    ///
    /// Any rollover that happened since the last action is applied and saved
    /// first, even when the action itself is rejected. On rejection those
    /// rollover events are kept for [`SistemaEngine::take_events`]; on
    /// success they lead the report's events.
    pub fn complete_mission(&mut self, key: &str, success: bool) -> Result<MissionReport> {
        let rollover = self.refresh()?;
        self.pending.extend(rollover);
        let now = self.clock.now();

        let mut next = self.state.clone();
        let mut report = missions::complete_mission(&mut next, key, success, now, &self.rules)?;
        self.store.save(&next)?;
        self.state = next;

        let mut events = self.take_events();
        events.append(&mut report.events);
        report.events = events;

        Ok(report)
    }

    /// Drain events produced by rollovers that no report carried out
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn is_frozen(&self) -> bool {
        freeze::is_frozen(&self.state, self.clock.now())
    }

    pub fn weekly_stats(&self) -> WeeklyStats {
        WeeklyStats::from_weekly(&self.state.weekly_data)
    }
}
