//! Schedule mutation use-cases.
//!
//! # Responsibility
//! - Validate raw form/JSON input before any store call.
//! - Delegate writes to repositories and classify failures.
//!
//! # Invariants
//! - Missing or blank required fields never reach the store.
//! - Every failure maps to exactly one `ErrorKind`.

use crate::model::caregiver::{Caregiver, CaregiverId};
use crate::model::shift::{Shift, ShiftId, ShiftType};
use crate::model::ModelValidationError;
use crate::repo::caregiver_repo::CaregiverRepository;
use crate::repo::shift_repo::ShiftRepository;
use crate::repo::RepoError;
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// User-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing, malformed, or out-of-enum input.
    Validation,
    /// Referenced caregiver or shift does not exist.
    NotFound,
    /// Slot already assigned, or caregiver still owns shifts.
    Conflict,
    /// Unclassified storage failure.
    Internal,
}

/// Errors from schedule mutation use-cases.
#[derive(Debug)]
pub enum ScheduleError {
    /// Required field absent or blank.
    MissingField(&'static str),
    /// Field present but not parseable.
    InvalidField {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Model-level validation failure.
    Validation(ModelValidationError),
    CaregiverNotFound(CaregiverId),
    ShiftNotFound(ShiftId),
    SlotTaken {
        date: NaiveDate,
        shift_type: ShiftType,
    },
    CaregiverHasShifts {
        caregiver_id: CaregiverId,
        shift_count: u64,
    },
    /// Repository-level failure without a user-facing category.
    Repo(RepoError),
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidField { .. } | Self::Validation(_) => {
                ErrorKind::Validation
            }
            Self::CaregiverNotFound(_) | Self::ShiftNotFound(_) => ErrorKind::NotFound,
            Self::SlotTaken { .. } | Self::CaregiverHasShifts { .. } => ErrorKind::Conflict,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidField {
                field,
                value,
                expected,
            } => write!(f, "invalid `{field}` value `{value}`; expected {expected}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::CaregiverNotFound(id) => write!(f, "caregiver not found: {id}"),
            Self::ShiftNotFound(id) => write!(f, "shift not found: {id}"),
            Self::SlotTaken { date, shift_type } => {
                write!(f, "shift {shift_type} on {date} is already assigned")
            }
            Self::CaregiverHasShifts { .. } => {
                write!(f, "cannot delete caregiver with assigned shifts")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for ScheduleError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ScheduleError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::CaregiverNotFound(id) => Self::CaregiverNotFound(id),
            RepoError::ShiftNotFound(id) => Self::ShiftNotFound(id),
            RepoError::SlotTaken { date, shift_type } => Self::SlotTaken { date, shift_type },
            RepoError::CaregiverHasShifts {
                caregiver_id,
                shift_count,
            } => Self::CaregiverHasShifts {
                caregiver_id,
                shift_count,
            },
            other => Self::Repo(other),
        }
    }
}

/// Raw add-shift form input; every field arrives as optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddShiftForm {
    pub caregiver_id: Option<String>,
    pub shift_type: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Raw remove-shift form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoveShiftForm {
    pub shift_id: Option<String>,
}

/// JSON body for caregiver create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaregiverPayload {
    pub name: Option<String>,
}

/// Write-side service over caregiver and shift repositories.
pub struct ScheduleMutationService<C: CaregiverRepository, S: ShiftRepository> {
    caregivers: C,
    shifts: S,
}

impl<C: CaregiverRepository, S: ShiftRepository> ScheduleMutationService<C, S> {
    pub fn new(caregivers: C, shifts: S) -> Self {
        Self { caregivers, shifts }
    }

    /// Assigns a caregiver to a slot from raw form input.
    ///
    /// # Errors
    /// - Validation: a field is missing, the id/date is malformed, or the
    ///   shift code is unknown.
    /// - NotFound: the caregiver does not exist.
    /// - Conflict: the slot already has a caregiver.
    pub fn add_shift(&self, form: &AddShiftForm) -> Result<Shift, ScheduleError> {
        let caregiver_text = required(form.caregiver_id.as_deref(), "caregiver_id")?;
        let shift_type_text = required(form.shift_type.as_deref(), "shift_type")?;
        let date_text = required(form.date.as_deref(), "date")?;

        let caregiver_id = parse_id(caregiver_text, "caregiver_id")?;
        let shift_type = ShiftType::parse(shift_type_text)?;
        let date = parse_date(date_text)?;

        self.shifts
            .create_shift(date, shift_type, caregiver_id)
            .map_err(|err| log_failure("add_shift", err.into()))
    }

    /// Removes one shift assignment and returns its id.
    pub fn remove_shift(&self, form: &RemoveShiftForm) -> Result<ShiftId, ScheduleError> {
        let shift_text = required(form.shift_id.as_deref(), "shift_id")?;
        let shift_id = parse_id(shift_text, "shift_id")?;
        self.shifts
            .delete_shift(shift_id)
            .map_err(|err| log_failure("remove_shift", err.into()))?;
        Ok(shift_id)
    }

    pub fn add_caregiver(&self, payload: &CaregiverPayload) -> Result<Caregiver, ScheduleError> {
        let name = required(payload.name.as_deref(), "name")?;
        self.caregivers
            .create_caregiver(name)
            .map_err(|err| log_failure("add_caregiver", err.into()))
    }

    pub fn update_caregiver(
        &self,
        id: CaregiverId,
        payload: &CaregiverPayload,
    ) -> Result<Caregiver, ScheduleError> {
        let name = required(payload.name.as_deref(), "name")?;
        self.caregivers
            .rename_caregiver(id, name)
            .map_err(|err| log_failure("update_caregiver", err.into()))
    }

    /// Deletes a caregiver; blocked while any shift references it.
    pub fn delete_caregiver(&self, id: CaregiverId) -> Result<(), ScheduleError> {
        self.caregivers
            .delete_caregiver(id)
            .map_err(|err| log_failure("delete_caregiver", err.into()))
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ScheduleError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ScheduleError::MissingField(field)),
    }
}

fn parse_id(value: &str, field: &'static str) -> Result<i64, ScheduleError> {
    value.parse::<i64>().map_err(|_| ScheduleError::InvalidField {
        field,
        value: value.to_string(),
        expected: "an integer id",
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ScheduleError::InvalidField {
        field: "date",
        value: value.to_string(),
        expected: "a YYYY-MM-DD date",
    })
}

fn log_failure(operation: &'static str, err: ScheduleError) -> ScheduleError {
    warn!(
        "event={operation} module=service status=error kind={:?} error={err}",
        err.kind()
    );
    err
}
