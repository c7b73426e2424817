//! Caregiver/shift store on SQLite.
//!
//! Connections handed out here are migrated and enforce the scheduling
//! constraints in the schema itself: shifts reference an existing caregiver
//! (`ON DELETE RESTRICT`) and `idx_shifts_slot` admits one shift per
//! `(date, shift_type)`. Repositories rely on both and never re-check them
//! outside a write transaction.
//!
//! Schema version lives in `PRAGMA user_version`. The only path that drops
//! schedule data is `reset_schema`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod admin;
pub mod migrations;
mod open;

pub use admin::reset_schema;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures opening, migrating or resetting the schedule store.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure outside a migration step.
    Sqlite(rusqlite::Error),
    /// A migration step was rolled back, e.g. a legacy file whose shifts
    /// double-book a slot cannot take the unique slot index.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build; refusing to touch it.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "schedule store error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "schedule schema migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "schedule store is at schema {db_version}, this build knows up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
