//! Shift domain model and shift-type reference data.
//!
//! # Invariants
//! - Shift codes sort as `A < B < C < G1 < G2`, matching storage order.
//! - Every shift type lasts `HOURS_PER_SHIFT` hours.
//! - Staffing constants are informational and never enforced.

use super::caregiver::CaregiverId;
use super::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned shift identifier.
pub type ShiftId = i64;

/// Nominal shifts per caregiver per week.
pub const SHIFTS_PER_WEEK: u32 = 5;
/// Length of every shift type in hours.
pub const HOURS_PER_SHIFT: u32 = 8;
/// Nominal weekly hours per caregiver.
pub const HOURS_PER_WEEK: u32 = 40;

/// Fixed daily shift slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    A,
    B,
    C,
    G1,
    G2,
}

impl ShiftType {
    /// All shift types in code order.
    pub const ALL: [ShiftType; 5] = [Self::A, Self::B, Self::C, Self::G1, Self::G2];

    /// Returns the stable storage/display code.
    pub fn code(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::G1 => "G1",
            Self::G2 => "G2",
        }
    }

    /// Parses an exact shift code. Surrounding whitespace is ignored, case is not.
    pub fn parse(code: &str) -> Result<Self, ModelValidationError> {
        match code.trim() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "G1" => Ok(Self::G1),
            "G2" => Ok(Self::G2),
            other => Err(ModelValidationError::UnknownShiftType(other.to_string())),
        }
    }

    /// Returns the static reference definition for this shift type.
    pub fn definition(self) -> &'static ShiftTypeDefinition {
        match self {
            Self::A => &SHIFT_DEFINITIONS[0],
            Self::B => &SHIFT_DEFINITIONS[1],
            Self::C => &SHIFT_DEFINITIONS[2],
            Self::G1 => &SHIFT_DEFINITIONS[3],
            Self::G2 => &SHIFT_DEFINITIONS[4],
        }
    }
}

impl Display for ShiftType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Display and timing metadata for one shift type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftTypeDefinition {
    pub shift_type: ShiftType,
    pub name: &'static str,
    /// Human-readable time-of-day range.
    pub time_label: &'static str,
    /// Hour of day (0-23) the shift starts.
    pub start_hour: u32,
    pub duration_hours: u32,
    /// CSS color used by calendar renderers.
    pub color: &'static str,
}

impl ShiftTypeDefinition {
    /// Exclusive end hour, counted from midnight of the shift date.
    ///
    /// May exceed 24 for shifts that run past midnight.
    pub fn end_hour(&self) -> u32 {
        self.start_hour + self.duration_hours
    }

    /// Returns whether this shift covers `hour` counted from midnight of the
    /// shift date. Hours `>= 24` address the following day.
    pub fn covers_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour()
    }
}

/// Reference table in `ShiftType::ALL` order.
pub static SHIFT_DEFINITIONS: [ShiftTypeDefinition; 5] = [
    ShiftTypeDefinition {
        shift_type: ShiftType::A,
        name: "A Shift",
        time_label: "6:00 AM - 2:00 PM",
        start_hour: 6,
        duration_hours: HOURS_PER_SHIFT,
        color: "#90EE90",
    },
    ShiftTypeDefinition {
        shift_type: ShiftType::B,
        name: "B Shift",
        time_label: "4:00 PM - 12:00 AM",
        start_hour: 16,
        duration_hours: HOURS_PER_SHIFT,
        color: "#87CEEB",
    },
    ShiftTypeDefinition {
        shift_type: ShiftType::C,
        name: "C Shift",
        time_label: "12:00 AM - 8:00 AM",
        start_hour: 0,
        duration_hours: HOURS_PER_SHIFT,
        color: "#DDA0DD",
    },
    ShiftTypeDefinition {
        shift_type: ShiftType::G1,
        name: "G1 Shift",
        time_label: "12:00 PM - 8:00 PM",
        start_hour: 12,
        duration_hours: HOURS_PER_SHIFT,
        color: "#F0E68C",
    },
    ShiftTypeDefinition {
        shift_type: ShiftType::G2,
        name: "G2 Shift",
        time_label: "9:00 AM - 5:00 PM",
        start_hour: 9,
        duration_hours: HOURS_PER_SHIFT,
        color: "#FFB6C1",
    },
];

/// One caregiver assigned to one slot on one day.
///
/// Shifts are never edited in place; reassignment is delete-then-create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    pub caregiver_id: CaregiverId,
}

/// Read model: a shift joined with its caregiver's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRecord {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    pub caregiver_id: CaregiverId,
    pub caregiver_name: String,
}

#[cfg(test)]
mod tests {
    use super::{ShiftType, HOURS_PER_SHIFT, SHIFT_DEFINITIONS};
    use crate::model::ModelValidationError;

    #[test]
    fn parse_accepts_every_code_and_rejects_others() {
        for shift_type in ShiftType::ALL {
            assert_eq!(ShiftType::parse(shift_type.code()).unwrap(), shift_type);
        }
        assert_eq!(ShiftType::parse(" G2 ").unwrap(), ShiftType::G2);
        assert_eq!(
            ShiftType::parse("g1").unwrap_err(),
            ModelValidationError::UnknownShiftType("g1".to_string())
        );
        assert!(ShiftType::parse("D").is_err());
        assert!(ShiftType::parse("").is_err());
    }

    #[test]
    fn ordering_follows_code_order() {
        let mut codes: Vec<&str> = ShiftType::ALL.iter().map(|t| t.code()).collect();
        codes.sort();
        let ordered: Vec<&str> = ShiftType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, ordered);
        assert!(ShiftType::C < ShiftType::G1);
    }

    #[test]
    fn definitions_line_up_with_types() {
        for (definition, shift_type) in SHIFT_DEFINITIONS.iter().zip(ShiftType::ALL) {
            assert_eq!(definition.shift_type, shift_type);
            assert_eq!(shift_type.definition().shift_type, shift_type);
            assert_eq!(definition.duration_hours, HOURS_PER_SHIFT);
        }
    }

    #[test]
    fn coverage_uses_half_open_hours() {
        let b = ShiftType::B.definition();
        assert!(!b.covers_hour(15));
        assert!(b.covers_hour(16));
        assert!(b.covers_hour(23));
        assert!(!b.covers_hour(24));

        let c = ShiftType::C.definition();
        assert!(c.covers_hour(0));
        assert!(!c.covers_hour(8));
    }
}
