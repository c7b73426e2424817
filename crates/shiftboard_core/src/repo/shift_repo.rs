//! Shift repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Assign and remove caregivers on `(date, shift_type)` slots.
//! - Serve week-window reads joined with caregiver names.
//!
//! # Invariants
//! - At most one shift per `(date, shift_type)`; the existence checks and
//!   the insert share one `IMMEDIATE` transaction and the unique index backs
//!   them up against concurrent writers.
//! - Range reads are ordered by `date ASC, shift_type ASC`.

use super::caregiver_repo::caregiver_exists;
use super::{RepoError, RepoResult};
use crate::model::caregiver::CaregiverId;
use crate::model::shift::{Shift, ShiftId, ShiftRecord, ShiftType};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::ffi::{SQLITE_CONSTRAINT_FOREIGNKEY, SQLITE_CONSTRAINT_UNIQUE};
use rusqlite::{params, Connection, ErrorCode, Row, Transaction, TransactionBehavior};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SHIFT_RECORD_SELECT_SQL: &str = "SELECT
    s.id,
    s.date,
    s.shift_type,
    s.caregiver_id,
    c.name AS caregiver_name
FROM shifts s
INNER JOIN caregivers c ON c.id = s.caregiver_id";

/// Repository interface for shift assignments.
pub trait ShiftRepository {
    /// Assigns `caregiver_id` to the `(date, shift_type)` slot.
    fn create_shift(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
        caregiver_id: CaregiverId,
    ) -> RepoResult<Shift>;
    /// Removes one shift assignment.
    fn delete_shift(&self, id: ShiftId) -> RepoResult<()>;
    fn get_shift(&self, id: ShiftId) -> RepoResult<Option<ShiftRecord>>;
    /// Lists shifts with `start <= date < end_exclusive`.
    fn query_shifts_in_range(
        &self,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> RepoResult<Vec<ShiftRecord>>;
}

/// SQLite-backed shift repository.
pub struct SqliteShiftRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShiftRepository<'conn> {
    /// Wraps a migrated connection. Must not be an open transaction.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ShiftRepository for SqliteShiftRepository<'_> {
    fn create_shift(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
        caregiver_id: CaregiverId,
    ) -> RepoResult<Shift> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let shift = insert_shift(&tx, date, shift_type, caregiver_id)?;
        tx.commit()?;

        info!(
            "event=shift_create module=repo status=ok shift_id={} date={} shift_type={}",
            shift.id, shift.date, shift.shift_type
        );
        Ok(shift)
    }

    fn delete_shift(&self, id: ShiftId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM shifts WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::ShiftNotFound(id));
        }
        tx.commit()?;

        info!("event=shift_delete module=repo status=ok shift_id={id}");
        Ok(())
    }

    fn get_shift(&self, id: ShiftId) -> RepoResult<Option<ShiftRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SHIFT_RECORD_SELECT_SQL} WHERE s.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_shift_record_row(row)?));
        }
        Ok(None)
    }

    fn query_shifts_in_range(
        &self,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> RepoResult<Vec<ShiftRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SHIFT_RECORD_SELECT_SQL}
             WHERE s.date >= ?1
               AND s.date < ?2
             ORDER BY s.date ASC, s.shift_type ASC, s.id ASC;"
        ))?;
        let mut rows = stmt.query(params![start, end_exclusive])?;
        let mut shifts = Vec::new();
        while let Some(row) = rows.next()? {
            shifts.push(parse_shift_record_row(row)?);
        }

        debug!(
            "event=shift_range module=repo status=ok start={start} end={end_exclusive} count={}",
            shifts.len()
        );
        Ok(shifts)
    }
}

/// Inserts one shift after checking slot occupancy, then caregiver existence.
///
/// A taken slot is reported as `SlotTaken` whatever caregiver is requested.
///
/// Runs on whatever transaction the caller holds; constraint failures that
/// slip past the checks are mapped to the same semantic errors.
pub(crate) fn insert_shift(
    conn: &Connection,
    date: NaiveDate,
    shift_type: ShiftType,
    caregiver_id: CaregiverId,
) -> RepoResult<Shift> {
    if slot_taken(conn, date, shift_type)? {
        return Err(RepoError::SlotTaken { date, shift_type });
    }
    if !caregiver_exists(conn, caregiver_id)? {
        return Err(RepoError::CaregiverNotFound(caregiver_id));
    }

    conn.execute(
        "INSERT INTO shifts (date, shift_type, caregiver_id) VALUES (?1, ?2, ?3);",
        params![date, shift_type.code(), caregiver_id],
    )
    .map_err(|err| map_insert_error(err, date, shift_type, caregiver_id))?;

    Ok(Shift {
        id: conn.last_insert_rowid(),
        date,
        shift_type,
        caregiver_id,
    })
}

fn slot_taken(conn: &Connection, date: NaiveDate, shift_type: ShiftType) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM shifts WHERE date = ?1 AND shift_type = ?2);",
        params![date, shift_type.code()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn map_insert_error(
    err: rusqlite::Error,
    date: NaiveDate,
    shift_type: ShiftType,
    caregiver_id: CaregiverId,
) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            match failure.extended_code {
                SQLITE_CONSTRAINT_UNIQUE => return RepoError::SlotTaken { date, shift_type },
                SQLITE_CONSTRAINT_FOREIGNKEY => return RepoError::CaregiverNotFound(caregiver_id),
                _ => {}
            }
        }
    }
    err.into()
}

fn parse_shift_record_row(row: &Row<'_>) -> RepoResult<ShiftRecord> {
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in shifts.date"))
    })?;

    let type_text: String = row.get("shift_type")?;
    let shift_type = ShiftType::parse(&type_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid shift type `{type_text}` in shifts.shift_type"))
    })?;

    Ok(ShiftRecord {
        id: row.get("id")?,
        date,
        shift_type,
        caregiver_id: row.get("caregiver_id")?,
        caregiver_name: row.get("caregiver_name")?,
    })
}
