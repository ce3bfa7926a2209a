//! Mission keys, rotation cycles and mission status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every mission the engine knows about.
///
/// The first four are the daily missions; the rest belong to one of the
/// three rotation cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MissionKey {
    Movimento,
    Mental,
    Digital,
    Alimentar,
    Dormir,
    Agua,
    Acucar,
    Pendencia,
    Desconforto,
    Organizar,
}

/// The four missions present every day
pub const DAILY_MISSIONS: [MissionKey; 4] = [
    MissionKey::Movimento,
    MissionKey::Mental,
    MissionKey::Digital,
    MissionKey::Alimentar,
];

impl MissionKey {
    pub const ALL: [MissionKey; 10] = [
        MissionKey::Movimento,
        MissionKey::Mental,
        MissionKey::Digital,
        MissionKey::Alimentar,
        MissionKey::Dormir,
        MissionKey::Agua,
        MissionKey::Acucar,
        MissionKey::Pendencia,
        MissionKey::Desconforto,
        MissionKey::Organizar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionKey::Movimento => "movimento",
            MissionKey::Mental => "mental",
            MissionKey::Digital => "digital",
            MissionKey::Alimentar => "alimentar",
            MissionKey::Dormir => "dormir",
            MissionKey::Agua => "agua",
            MissionKey::Acucar => "acucar",
            MissionKey::Pendencia => "pendencia",
            MissionKey::Desconforto => "desconforto",
            MissionKey::Organizar => "organizar",
        }
    }

    pub fn is_daily(&self) -> bool {
        DAILY_MISSIONS.contains(self)
    }
}

impl fmt::Display for MissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mission key: {0}")]
pub struct UnknownMissionKey(pub String);

impl FromStr for MissionKey {
    type Err = UnknownMissionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownMissionKey(s.to_string()))
    }
}

impl TryFrom<String> for MissionKey {
    type Error = UnknownMissionKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MissionKey> for String {
    fn from(key: MissionKey) -> Self {
        key.as_str().to_string()
    }
}

/// Outcome of a mission for the current day.
///
/// Stored as `null` / `true` / `false` in the state document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum MissionStatus {
    #[default]
    Unset,
    Completed,
    Failed,
}

impl MissionStatus {
    pub fn from_outcome(success: bool) -> Self {
        if success {
            MissionStatus::Completed
        } else {
            MissionStatus::Failed
        }
    }

    /// The recorded outcome, if any
    pub fn outcome(&self) -> Option<bool> {
        match self {
            MissionStatus::Unset => None,
            MissionStatus::Completed => Some(true),
            MissionStatus::Failed => Some(false),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, MissionStatus::Unset)
    }
}

impl From<Option<bool>> for MissionStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => MissionStatus::Unset,
            Some(success) => MissionStatus::from_outcome(success),
        }
    }
}

impl From<MissionStatus> for Option<bool> {
    fn from(status: MissionStatus) -> Self {
        status.outcome()
    }
}

/// Three-day rotation cycle selecting the rotating missions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cycle {
    #[default]
    A,
    B,
    C,
}

impl Cycle {
    /// Rotation order
    pub const ORDER: [Cycle; 3] = [Cycle::A, Cycle::B, Cycle::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cycle::A => "A",
            Cycle::B => "B",
            Cycle::C => "C",
        }
    }

    /// Parse a cycle label; anything unrecognized falls back to cycle A.
    pub fn from_label(label: &str) -> Self {
        match label {
            "B" => Cycle::B,
            "C" => Cycle::C,
            _ => Cycle::A,
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Cycle {
    fn from(label: String) -> Self {
        Cycle::from_label(&label)
    }
}

impl From<Cycle> for String {
    fn from(cycle: Cycle) -> Self {
        cycle.as_str().to_string()
    }
}

/// The two rotating missions attached to a cycle
pub fn rotating_mission_set_for(cycle: Cycle) -> [MissionKey; 2] {
    match cycle {
        Cycle::A => [MissionKey::Dormir, MissionKey::Agua],
        Cycle::B => [MissionKey::Acucar, MissionKey::Pendencia],
        Cycle::C => [MissionKey::Desconforto, MissionKey::Organizar],
    }
}
