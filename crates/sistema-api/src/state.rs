//! The persisted state document
//!
//! Field names are the on-disk contract and are serialized in camelCase.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sistema_util::calendar_day_key;
use std::collections::BTreeMap;

use crate::{Cycle, DAILY_MISSIONS, MissionKey, MissionStatus, rotating_mission_set_for};

/// Upper bound for every attribute
pub const ATTRIBUTE_MAX: u8 = 100;

/// Outcomes for a fixed set of missions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionBoard(BTreeMap<MissionKey, MissionStatus>);

impl MissionBoard {
    /// A board with every key unset
    pub fn fresh(keys: impl IntoIterator<Item = MissionKey>) -> Self {
        Self(keys.into_iter().map(|k| (k, MissionStatus::Unset)).collect())
    }

    /// The four daily missions, unset
    pub fn daily() -> Self {
        Self::fresh(DAILY_MISSIONS)
    }

    /// The rotating missions of `cycle`, unset
    pub fn rotating(cycle: Cycle) -> Self {
        Self::fresh(rotating_mission_set_for(cycle))
    }

    pub fn contains(&self, key: MissionKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn get(&self, key: MissionKey) -> Option<MissionStatus> {
        self.0.get(&key).copied()
    }

    /// Record a status; returns false when the key is not on this board.
    pub fn set(&mut self, key: MissionKey, status: MissionStatus) -> bool {
        match self.0.get_mut(&key) {
            Some(slot) => {
                *slot = status;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MissionKey, MissionStatus)> + '_ {
        self.0.iter().map(|(k, s)| (*k, *s))
    }

    /// Whether the board holds exactly `keys`
    pub fn has_exactly(&self, keys: &[MissionKey]) -> bool {
        self.0.len() == keys.len() && keys.iter().all(|k| self.0.contains_key(k))
    }

    /// Rebuild with exactly `keys`, keeping statuses already recorded for them
    pub fn reshaped(&self, keys: &[MissionKey]) -> Self {
        Self(
            keys.iter()
                .map(|k| (*k, self.get(*k).unwrap_or_default()))
                .collect(),
        )
    }
}

/// The bounded progress meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Forca,
    Stamina,
    Disciplina,
    Autocontrole,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Forca,
        Attribute::Stamina,
        Attribute::Disciplina,
        Attribute::Autocontrole,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Forca => "forca",
            Attribute::Stamina => "stamina",
            Attribute::Disciplina => "disciplina",
            Attribute::Autocontrole => "autocontrole",
        }
    }
}

/// Attribute values, each within `0..=ATTRIBUTE_MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub forca: u8,
    pub stamina: u8,
    pub disciplina: u8,
    pub autocontrole: u8,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Forca => self.forca,
            Attribute::Stamina => self.stamina,
            Attribute::Disciplina => self.disciplina,
            Attribute::Autocontrole => self.autocontrole,
        }
    }

    fn slot(&mut self, attribute: Attribute) -> &mut u8 {
        match attribute {
            Attribute::Forca => &mut self.forca,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Disciplina => &mut self.disciplina,
            Attribute::Autocontrole => &mut self.autocontrole,
        }
    }

    /// Add `delta` (may be negative), clamping to the valid range.
    /// Returns the new value.
    pub fn adjust(&mut self, attribute: Attribute, delta: i32) -> u8 {
        let slot = self.slot(attribute);
        let next = (i32::from(*slot) + delta).clamp(0, i32::from(ATTRIBUTE_MAX));
        *slot = next as u8;
        *slot
    }

    /// Pull every value back into range
    pub fn clamp_all(&mut self) {
        for attribute in Attribute::ALL {
            self.adjust(attribute, 0);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

/// Running completion counters and the daily streak
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyData {
    pub total_missions: u32,
    pub completed_missions: u32,
    pub current_streak: u32,
    pub last_completion_date: Option<NaiveDate>,
}

/// Snapshot of one closed day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub missions: BTreeMap<MissionKey, bool>,
}

impl HistoryEntry {
    /// Number of outcomes recorded as failed
    pub fn failures(&self) -> usize {
        self.missions.values().filter(|ok| !**ok).count()
    }
}

/// Workout bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingLog {
    pub last_workout: Option<DateTime<Local>>,
    pub weekly_count: u32,
}

/// The single persisted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub daily_missions: MissionBoard,
    pub rotating_cycle: Cycle,
    pub cycle_start_date: DateTime<Local>,
    pub rotating_missions: MissionBoard,
    pub attributes: Attributes,
    pub weekly_data: WeeklyData,
    pub history: Vec<HistoryEntry>,
    pub frozen_until: Option<DateTime<Local>>,
    pub last_reset_date: NaiveDate,
    pub strength_training: TrainingLog,
    pub cardio_training: TrainingLog,
    pub digital_control_streak: u32,
    pub last_digital_fail: Option<DateTime<Local>>,
}

impl PersistedState {
    /// First-run state
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            daily_missions: MissionBoard::daily(),
            rotating_cycle: Cycle::A,
            cycle_start_date: now,
            rotating_missions: MissionBoard::rotating(Cycle::A),
            attributes: Attributes::default(),
            weekly_data: WeeklyData::default(),
            history: Vec::new(),
            frozen_until: None,
            last_reset_date: calendar_day_key(&now),
            strength_training: TrainingLog::default(),
            cardio_training: TrainingLog::default(),
            digital_control_streak: 0,
            last_digital_fail: None,
        }
    }

    /// History entry for a given day, if one was recorded
    pub fn history_for(&self, date: NaiveDate) -> Option<&HistoryEntry> {
        self.history.iter().find(|h| h.date == date)
    }

    /// Snapshot of every mission with a recorded outcome today
    pub fn snapshot(&self) -> HistoryEntry {
        let missions = self
            .daily_missions
            .iter()
            .chain(self.rotating_missions.iter())
            .filter_map(|(key, status)| status.outcome().map(|ok| (key, ok)))
            .collect();

        HistoryEntry {
            date: self.last_reset_date,
            missions,
        }
    }

    /// Problems that break the document's structural invariants
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.daily_missions.has_exactly(&DAILY_MISSIONS) {
            problems.push("dailyMissions does not hold exactly the daily keys".to_string());
        }

        let rotating = rotating_mission_set_for(self.rotating_cycle);
        if !self.rotating_missions.has_exactly(&rotating) {
            problems.push(format!(
                "rotatingMissions does not match cycle {}",
                self.rotating_cycle
            ));
        }

        for (attribute, value) in self.attributes.iter() {
            if value > ATTRIBUTE_MAX {
                problems.push(format!("attribute {} out of range: {}", attribute.as_str(), value));
            }
        }

        if self.weekly_data.completed_missions > self.weekly_data.total_missions {
            problems.push("weeklyData.completedMissions exceeds totalMissions".to_string());
        }

        problems
    }

    /// Restore structural invariants, keeping as much recorded data as possible
    pub fn normalize(&mut self) {
        self.daily_missions = self.daily_missions.reshaped(&DAILY_MISSIONS);
        self.rotating_missions = self
            .rotating_missions
            .reshaped(&rotating_mission_set_for(self.rotating_cycle));
        self.attributes.clamp_all();
        if self.weekly_data.completed_missions > self.weekly_data.total_missions {
            self.weekly_data.total_missions = self.weekly_data.completed_missions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 9, 15, 0).unwrap()
    }

    #[test]
    fn default_state_round_trips() {
        let state = PersistedState::new(now());
        let json = serde_json::to_string(&state).unwrap();
        let parsed: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, parsed);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }

    #[test]
    fn default_state_uses_document_field_names() {
        let value = serde_json::to_value(PersistedState::new(now())).unwrap();

        assert_eq!(value["rotatingCycle"], "A");
        assert_eq!(value["lastResetDate"], "2025-03-10");
        assert!(value["frozenUntil"].is_null());
        assert!(value["dailyMissions"]["movimento"].is_null());
        assert!(value["rotatingMissions"]["dormir"].is_null());
        assert_eq!(value["weeklyData"]["totalMissions"], 0);
        assert!(value["weeklyData"]["lastCompletionDate"].is_null());
        assert_eq!(value["strengthTraining"]["weeklyCount"], 0);
        assert_eq!(value["digitalControlStreak"], 0);
        assert_eq!(value["attributes"]["disciplina"], 0);
    }

    #[test]
    fn default_state_has_no_violations() {
        assert!(PersistedState::new(now()).invariant_violations().is_empty());
    }

    #[test]
    fn attributes_clamp_on_adjust() {
        let mut attrs = Attributes::default();
        assert_eq!(attrs.adjust(Attribute::Disciplina, -2), 0);
        assert_eq!(attrs.adjust(Attribute::Forca, 99), 99);
        assert_eq!(attrs.adjust(Attribute::Forca, 2), 100);
        assert_eq!(attrs.adjust(Attribute::Forca, 500), 100);
    }

    #[test]
    fn board_rejects_foreign_keys() {
        let mut board = MissionBoard::rotating(Cycle::B);
        assert!(!board.set(MissionKey::Agua, MissionStatus::Completed));
        assert!(board.set(MissionKey::Acucar, MissionStatus::Completed));
        assert_eq!(board.get(MissionKey::Acucar), Some(MissionStatus::Completed));
    }

    #[test]
    fn snapshot_skips_unset_missions() {
        let mut state = PersistedState::new(now());
        state.daily_missions.set(MissionKey::Mental, MissionStatus::Failed);
        state.rotating_missions.set(MissionKey::Agua, MissionStatus::Completed);

        let entry = state.snapshot();
        assert_eq!(entry.date, state.last_reset_date);
        assert_eq!(entry.missions.len(), 2);
        assert_eq!(entry.missions.get(&MissionKey::Mental), Some(&false));
        assert_eq!(entry.failures(), 1);
    }

    #[test]
    fn normalize_repairs_mismatched_rotating_board() {
        let mut state = PersistedState::new(now());
        state.rotating_cycle = Cycle::C;
        state.attributes.stamina = 140;
        assert_eq!(state.invariant_violations().len(), 2);

        state.normalize();
        assert!(state.invariant_violations().is_empty());
        assert!(state.rotating_missions.contains(MissionKey::Organizar));
        assert_eq!(state.attributes.stamina, 100);
    }

    #[test]
    fn malformed_document_is_rejected() {
        let result: Result<PersistedState, _> = serde_json::from_str(r#"{"rotatingCycle":"A"}"#);
        assert!(result.is_err());
    }
}
