//! Core scheduling logic for Shiftboard.
//! This crate is the single source of truth for caregiver and shift invariants.

pub mod api;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use api::{ApiBody, ApiResponse, ScheduleApi, ViewBody};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::caregiver::{Caregiver, CaregiverId};
pub use model::shift::{Shift, ShiftId, ShiftRecord, ShiftType, ShiftTypeDefinition};
pub use model::week::{monday_of, week_dates, WeekWindow};
pub use model::ModelValidationError;
pub use repo::caregiver_repo::{CaregiverRepository, SqliteCaregiverRepository};
pub use repo::shift_repo::{ShiftRepository, SqliteShiftRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::{seed_if_empty, SeedConfig, SeedError, SeedReport};
pub use service::schedule_mutation::{
    AddShiftForm, CaregiverPayload, ErrorKind, RemoveShiftForm, ScheduleError,
    ScheduleMutationService,
};
pub use service::schedule_query::{
    CaregiverGrid, HourlyGrid, ScheduleQueryService, WeekSchedule,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
