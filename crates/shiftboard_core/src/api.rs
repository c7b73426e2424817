//! Boundary envelopes for the presentation/transport layer.
//!
//! # Responsibility
//! - Expose one entry point per boundary operation (week views, caregiver
//!   list, shift/caregiver mutations).
//! - Map service error categories to HTTP-style status codes.
//! - Keep bodies typed: `ApiBody` for mutation outcomes, `ViewBody<T>` for
//!   week views and listings.
//!
//! # Invariants
//! - Entry points never panic and always return an `ApiResponse`.
//! - Validation/Conflict -> 400, NotFound -> 404, anything else -> 500.

use crate::model::caregiver::{Caregiver, CaregiverId};
use crate::repo::caregiver_repo::SqliteCaregiverRepository;
use crate::repo::shift_repo::SqliteShiftRepository;
use crate::repo::RepoResult;
use crate::service::schedule_mutation::{
    AddShiftForm, CaregiverPayload, ErrorKind, RemoveShiftForm, ScheduleError,
    ScheduleMutationService,
};
use crate::service::schedule_query::{
    CaregiverGrid, HourlyGrid, ScheduleQueryService, WeekSchedule,
};
use chrono::NaiveDate;
use log::error;
use rusqlite::Connection;
use serde::Serialize;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Outcome body of mutations and failed views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ApiBody {
    fn succeeded(message: &str, id: Option<i64>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            id,
            kind: None,
        }
    }

    fn failed(kind: ErrorKind, message: String) -> Self {
        Self {
            success: false,
            message,
            id: None,
            kind: Some(kind),
        }
    }
}

/// View body: the view data itself, or an error body when the read failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ViewBody<T> {
    Data(T),
    Error(ApiBody),
}

impl<T> ViewBody<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(view) => Some(view),
            Self::Error(_) => None,
        }
    }
}

/// Transport-neutral response: status code plus typed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<B = ApiBody> {
    pub status: u16,
    pub body: B,
}

impl<B> ApiResponse<B> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl ApiResponse {
    fn message(message: &str, id: Option<i64>) -> Self {
        Self {
            status: STATUS_OK,
            body: ApiBody::succeeded(message, id),
        }
    }

    fn failure(err: &ScheduleError) -> Self {
        let kind = err.kind();
        Self {
            status: status_for(kind),
            body: ApiBody::failed(kind, err.to_string()),
        }
    }
}

impl<T> ApiResponse<ViewBody<T>> {
    fn view(operation: &str, result: RepoResult<T>) -> Self {
        match result {
            Ok(view) => Self {
                status: STATUS_OK,
                body: ViewBody::Data(view),
            },
            Err(err) => {
                let message = err.to_string();
                error!("event={operation} module=api status=error error={message}");
                Self {
                    status: STATUS_INTERNAL_ERROR,
                    body: ViewBody::Error(ApiBody::failed(ErrorKind::Internal, message)),
                }
            }
        }
    }
}

/// Maps an error category to its boundary status code.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict => STATUS_BAD_REQUEST,
        ErrorKind::NotFound => STATUS_NOT_FOUND,
        ErrorKind::Internal => STATUS_INTERNAL_ERROR,
    }
}

type SqliteQueries<'conn> =
    ScheduleQueryService<SqliteCaregiverRepository<'conn>, SqliteShiftRepository<'conn>>;
type SqliteMutations<'conn> =
    ScheduleMutationService<SqliteCaregiverRepository<'conn>, SqliteShiftRepository<'conn>>;

/// Boundary facade over one migrated connection.
pub struct ScheduleApi<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ScheduleApi<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn queries(&self) -> SqliteQueries<'conn> {
        ScheduleQueryService::new(
            SqliteCaregiverRepository::new(self.conn),
            SqliteShiftRepository::new(self.conn),
        )
    }

    fn mutations(&self) -> SqliteMutations<'conn> {
        ScheduleMutationService::new(
            SqliteCaregiverRepository::new(self.conn),
            SqliteShiftRepository::new(self.conn),
        )
    }

    pub fn calendar(&self, today: NaiveDate) -> ApiResponse<ViewBody<WeekSchedule>> {
        ApiResponse::view("calendar_view", self.queries().week_schedule(today))
    }

    pub fn hourly(&self, today: NaiveDate) -> ApiResponse<ViewBody<HourlyGrid>> {
        ApiResponse::view("hourly_view", self.queries().hourly_grid(today))
    }

    pub fn caregiver_week(&self, today: NaiveDate) -> ApiResponse<ViewBody<CaregiverGrid>> {
        ApiResponse::view("caregiver_view", self.queries().caregiver_grid(today))
    }

    pub fn grant(&self, today: NaiveDate) -> ApiResponse<ViewBody<WeekSchedule>> {
        ApiResponse::view("grant_view", self.queries().grant_view(today))
    }

    pub fn list_caregivers(&self) -> ApiResponse<ViewBody<Vec<Caregiver>>> {
        ApiResponse::view("list_caregivers", self.queries().list_caregivers())
    }

    pub fn add_shift(&self, form: &AddShiftForm) -> ApiResponse {
        match self.mutations().add_shift(form) {
            Ok(shift) => ApiResponse::message("Shift added successfully", Some(shift.id)),
            Err(err) => ApiResponse::failure(&err),
        }
    }

    pub fn remove_shift(&self, form: &RemoveShiftForm) -> ApiResponse {
        match self.mutations().remove_shift(form) {
            Ok(shift_id) => ApiResponse::message("Shift removed successfully", Some(shift_id)),
            Err(err) => ApiResponse::failure(&err),
        }
    }

    pub fn add_caregiver(&self, payload: &CaregiverPayload) -> ApiResponse {
        match self.mutations().add_caregiver(payload) {
            Ok(caregiver) => {
                ApiResponse::message("Caregiver added successfully", Some(caregiver.id))
            }
            Err(err) => ApiResponse::failure(&err),
        }
    }

    pub fn update_caregiver(&self, id: CaregiverId, payload: &CaregiverPayload) -> ApiResponse {
        match self.mutations().update_caregiver(id, payload) {
            Ok(caregiver) => {
                ApiResponse::message("Caregiver updated successfully", Some(caregiver.id))
            }
            Err(err) => ApiResponse::failure(&err),
        }
    }

    pub fn delete_caregiver(&self, id: CaregiverId) -> ApiResponse {
        match self.mutations().delete_caregiver(id) {
            Ok(()) => ApiResponse::message("Caregiver deleted successfully", None),
            Err(err) => ApiResponse::failure(&err),
        }
    }
}
