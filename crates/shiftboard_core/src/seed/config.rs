//! Seed roster and weekly template configuration.

use super::SeedError;
use crate::model::shift::ShiftType;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_ROSTER: [&str; 7] = [
    "Maria B", "Fatima", "Mariah G", "Teontae", "Amanda", "Michelle", "Kisha",
];

const DEFAULT_WEEK: [(Weekday, &[(ShiftType, &str)]); 7] = [
    (
        Weekday::Mon,
        &[
            (ShiftType::A, "Maria B"),
            (ShiftType::G1, "Teontae"),
            (ShiftType::B, "Amanda"),
            (ShiftType::C, "Michelle"),
        ],
    ),
    (
        Weekday::Tue,
        &[
            (ShiftType::A, "Fatima"),
            (ShiftType::G1, "Mariah G"),
            (ShiftType::B, "Kisha"),
            (ShiftType::C, "Michelle"),
        ],
    ),
    (
        Weekday::Wed,
        &[
            (ShiftType::A, "Maria B"),
            (ShiftType::G1, "Mariah G"),
            (ShiftType::B, "Kisha"),
            (ShiftType::C, "Amanda"),
        ],
    ),
    (
        Weekday::Thu,
        &[
            (ShiftType::A, "Fatima"),
            (ShiftType::G1, "Maria B"),
            (ShiftType::B, "Kisha"),
            (ShiftType::C, "Amanda"),
        ],
    ),
    (
        Weekday::Fri,
        &[
            (ShiftType::A, "Maria B"),
            (ShiftType::G1, "Fatima"),
            (ShiftType::B, "Kisha"),
            (ShiftType::C, "Amanda"),
        ],
    ),
    (
        Weekday::Sat,
        &[
            (ShiftType::A, "Mariah G"),
            (ShiftType::G2, "Teontae"),
            (ShiftType::G1, "Fatima"),
            (ShiftType::B, "Michelle"),
            (ShiftType::C, "Kisha"),
        ],
    ),
    (
        Weekday::Sun,
        &[
            (ShiftType::A, "Mariah G"),
            (ShiftType::G2, "Teontae"),
            (ShiftType::G1, "Fatima"),
            (ShiftType::B, "Michelle"),
            (ShiftType::C, "Amanda"),
        ],
    ),
];

/// Roster and default weekly assignments written by `seed_if_empty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Caregiver names, created in list order.
    pub roster: Vec<String>,
    pub week_template: Vec<DayTemplate>,
}

/// Assignments for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTemplate {
    pub weekday: Weekday,
    pub slots: Vec<SlotTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTemplate {
    pub shift_type: ShiftType,
    /// Roster name; matched after name normalization.
    pub caregiver: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            roster: DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect(),
            week_template: DEFAULT_WEEK
                .iter()
                .map(|(weekday, slots)| DayTemplate {
                    weekday: *weekday,
                    slots: slots
                        .iter()
                        .map(|(shift_type, caregiver)| SlotTemplate {
                            shift_type: *shift_type,
                            caregiver: caregiver.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl SeedConfig {
    /// Parses and validates a JSON seed config.
    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        let config: Self = serde_json::from_str(json).map_err(SeedError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON seed config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Rejects templates that would double-book a slot.
    ///
    /// Unknown caregiver names are allowed here; seeding skips them.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut seen = HashSet::new();
        for day in &self.week_template {
            for slot in &day.slots {
                if !seen.insert((day.weekday, slot.shift_type)) {
                    return Err(SeedError::InvalidConfig(format!(
                        "slot {} on {} appears more than once",
                        slot.shift_type, day.weekday
                    )));
                }
            }
        }
        Ok(())
    }
}
