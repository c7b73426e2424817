//! One-time bootstrap of the caregiver roster and a default week.
//!
//! # Responsibility
//! - Create the configured roster and one week of default assignments when
//!   the store has no caregivers.
//! - Load alternate rosters/templates from JSON.
//!
//! # Invariants
//! - Runs as a no-op whenever any caregiver exists, even if no shifts do.
//! - Roster and week are written in one transaction.
//! - Template slots naming a caregiver absent from the roster are skipped,
//!   reported, and never fatal.

mod config;

pub use config::{DayTemplate, SeedConfig, SlotTemplate};

use crate::model::caregiver::{normalize_caregiver_name, CaregiverId};
use crate::model::shift::ShiftType;
use crate::model::week::monday_of;
use crate::repo::caregiver_repo::{count_caregivers_in, insert_caregiver};
use crate::repo::shift_repo::insert_shift;
use crate::repo::RepoError;
use chrono::{Days, NaiveDate};
use log::{debug, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Errors from seed configuration loading and seeding.
#[derive(Debug)]
pub enum SeedError {
    /// Seed config file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Seed config JSON is malformed.
    Parse(serde_json::Error),
    /// Seed config parsed but is unusable.
    InvalidConfig(String),
    /// Store failure while writing seed data.
    Repo(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid seed config json: {err}"),
            Self::InvalidConfig(message) => write!(f, "invalid seed config: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidConfig(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for SeedError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// Template slot skipped because its caregiver is not on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedSlot {
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    pub caregiver: String,
}

/// Outcome of one `seed_if_empty` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedReport {
    /// Store already had caregivers; nothing was written.
    Skipped { existing_caregivers: u64 },
    /// Roster and default week were created.
    Seeded {
        caregivers: usize,
        shifts: usize,
        anchor_monday: NaiveDate,
        unmatched: Vec<UnmatchedSlot>,
    },
}

/// Seeds roster and default week anchored on the Monday of `today`'s week.
///
/// Does nothing when at least one caregiver already exists. `conn` must not
/// be inside an open transaction.
///
/// # Errors
/// - `InvalidConfig` when a roster name is blank or a slot repeats.
/// - `Repo` when any write fails; nothing is persisted in that case.
pub fn seed_if_empty(
    conn: &Connection,
    config: &SeedConfig,
    today: NaiveDate,
) -> Result<SeedReport, SeedError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let existing = count_caregivers_in(&tx)?;
    if existing > 0 {
        debug!(
            "event=seed module=seed status=skipped existing_caregivers={existing}"
        );
        return Ok(SeedReport::Skipped {
            existing_caregivers: existing,
        });
    }

    config.validate()?;

    let mut ids_by_name: HashMap<String, CaregiverId> = HashMap::new();
    for name in &config.roster {
        let normalized = normalize_caregiver_name(name)
            .map_err(|err| SeedError::InvalidConfig(format!("roster entry `{name}`: {err}")))?;
        let caregiver = insert_caregiver(&tx, &normalized)?;
        // First roster entry wins when names repeat.
        ids_by_name.entry(caregiver.name).or_insert(caregiver.id);
    }
    debug!(
        "event=seed_roster module=seed status=ok caregivers={}",
        config.roster.len()
    );

    let monday = monday_of(today);
    let mut shifts = 0usize;
    let mut unmatched = Vec::new();
    for day in &config.week_template {
        let offset = u64::from(day.weekday.num_days_from_monday());
        let date = monday + Days::new(offset);
        for slot in &day.slots {
            let lookup = normalize_caregiver_name(&slot.caregiver).ok();
            match lookup.and_then(|name| ids_by_name.get(&name).copied()) {
                Some(caregiver_id) => {
                    insert_shift(&tx, date, slot.shift_type, caregiver_id)?;
                    shifts += 1;
                    debug!(
                        "event=seed_shift module=seed status=ok date={date} shift_type={} caregiver_id={caregiver_id}",
                        slot.shift_type
                    );
                }
                None => {
                    warn!(
                        "event=seed_shift module=seed status=skipped reason=unknown_caregiver date={date} shift_type={}",
                        slot.shift_type
                    );
                    unmatched.push(UnmatchedSlot {
                        date,
                        shift_type: slot.shift_type,
                        caregiver: slot.caregiver.clone(),
                    });
                }
            }
        }
    }

    tx.commit()?;
    info!(
        "event=seed module=seed status=ok caregivers={} shifts={shifts} unmatched={} anchor_monday={monday}",
        config.roster.len(),
        unmatched.len()
    );

    Ok(SeedReport::Seeded {
        caregivers: config.roster.len(),
        shifts,
        anchor_monday: monday,
        unmatched,
    })
}
