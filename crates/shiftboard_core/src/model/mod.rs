//! Scheduling domain model.
//!
//! # Responsibility
//! - Define caregiver and shift records shared by repositories and services.
//! - Hold the static shift-type reference table and week-window arithmetic.
//!
//! # Invariants
//! - Every shift references exactly one caregiver.
//! - `(date, shift_type)` identifies at most one shift.

pub mod caregiver;
pub mod shift;
pub mod week;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures raised by model constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Caregiver name is empty after normalization.
    BlankCaregiverName,
    /// Shift code is not one of `A|B|C|G1|G2`.
    UnknownShiftType(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCaregiverName => write!(f, "caregiver name must not be blank"),
            Self::UnknownShiftType(code) => write!(
                f,
                "invalid shift type `{code}`; expected one of A|B|C|G1|G2"
            ),
        }
    }
}

impl Error for ModelValidationError {}
