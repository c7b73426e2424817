//! Entity store: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define caregiver and shift data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every mutation runs inside one `IMMEDIATE` transaction; a failure rolls
//!   the whole mutation back.
//! - Slot uniqueness is guarded by the `idx_shifts_slot` unique index, not
//!   only by a prior read.
//! - Repository APIs return semantic errors (`*NotFound`, `SlotTaken`,
//!   `CaregiverHasShifts`) in addition to DB transport errors.

pub mod caregiver_repo;
pub mod shift_repo;

use crate::db::DbError;
use crate::model::caregiver::CaregiverId;
use crate::model::shift::{ShiftId, ShiftType};
use crate::model::ModelValidationError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from entity store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected by model validation.
    Validation(ModelValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    CaregiverNotFound(CaregiverId),
    ShiftNotFound(ShiftId),
    /// Another shift already occupies `(date, shift_type)`.
    SlotTaken {
        date: NaiveDate,
        shift_type: ShiftType,
    },
    /// Caregiver still owns shifts and cannot be deleted.
    CaregiverHasShifts {
        caregiver_id: CaregiverId,
        shift_count: u64,
    },
    /// Persisted data cannot be converted to a valid model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::CaregiverNotFound(id) => write!(f, "caregiver not found: {id}"),
            Self::ShiftNotFound(id) => write!(f, "shift not found: {id}"),
            Self::SlotTaken { date, shift_type } => {
                write!(f, "shift {shift_type} on {date} is already assigned")
            }
            Self::CaregiverHasShifts {
                caregiver_id,
                shift_count,
            } => write!(
                f,
                "caregiver {caregiver_id} has {shift_count} assigned shift(s) and cannot be deleted"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted schedule data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn count_from_db(value: i64, column: &str) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative count `{value}` for {column}")))
}
