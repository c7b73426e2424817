//! Caregiver repository contract and SQLite implementation.
//!
//! # Invariants
//! - Names are normalized before persistence; blank names are rejected.
//! - A caregiver owning any shift cannot be deleted.
//! - Listing order is `id ASC`.

use super::{count_from_db, RepoError, RepoResult};
use crate::model::caregiver::{normalize_caregiver_name, Caregiver, CaregiverId};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Repository interface for caregiver lifecycle operations.
pub trait CaregiverRepository {
    /// Creates one caregiver. Names are not required to be unique.
    fn create_caregiver(&self, name: &str) -> RepoResult<Caregiver>;
    /// Replaces the display name of an existing caregiver.
    fn rename_caregiver(&self, id: CaregiverId, name: &str) -> RepoResult<Caregiver>;
    /// Deletes a caregiver that owns no shifts.
    fn delete_caregiver(&self, id: CaregiverId) -> RepoResult<()>;
    fn get_caregiver(&self, id: CaregiverId) -> RepoResult<Option<Caregiver>>;
    fn list_caregivers(&self) -> RepoResult<Vec<Caregiver>>;
    fn count_caregivers(&self) -> RepoResult<u64>;
    fn count_shifts_for_caregiver(&self, id: CaregiverId) -> RepoResult<u64>;
}

/// SQLite-backed caregiver repository.
pub struct SqliteCaregiverRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCaregiverRepository<'conn> {
    /// Wraps a migrated connection. Must not be an open transaction.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CaregiverRepository for SqliteCaregiverRepository<'_> {
    fn create_caregiver(&self, name: &str) -> RepoResult<Caregiver> {
        let name = normalize_caregiver_name(name)?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let caregiver = insert_caregiver(&tx, &name)?;
        tx.commit()?;

        info!(
            "event=caregiver_create module=repo status=ok caregiver_id={}",
            caregiver.id
        );
        Ok(caregiver)
    }

    fn rename_caregiver(&self, id: CaregiverId, name: &str) -> RepoResult<Caregiver> {
        let name = normalize_caregiver_name(name)?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE caregivers SET name = ?1 WHERE id = ?2;",
            params![name.as_str(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::CaregiverNotFound(id));
        }
        tx.commit()?;

        info!("event=caregiver_rename module=repo status=ok caregiver_id={id}");
        Ok(Caregiver { id, name })
    }

    fn delete_caregiver(&self, id: CaregiverId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !caregiver_exists(&tx, id)? {
            return Err(RepoError::CaregiverNotFound(id));
        }

        let shift_count = shifts_owned_by(&tx, id)?;
        if shift_count > 0 {
            return Err(RepoError::CaregiverHasShifts {
                caregiver_id: id,
                shift_count,
            });
        }

        tx.execute("DELETE FROM caregivers WHERE id = ?1;", [id])?;
        tx.commit()?;

        info!("event=caregiver_delete module=repo status=ok caregiver_id={id}");
        Ok(())
    }

    fn get_caregiver(&self, id: CaregiverId) -> RepoResult<Option<Caregiver>> {
        let caregiver = self
            .conn
            .query_row(
                "SELECT id, name FROM caregivers WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Caregiver {
                        id: row.get("id")?,
                        name: row.get("name")?,
                    })
                },
            )
            .optional()?;
        Ok(caregiver)
    }

    fn list_caregivers(&self) -> RepoResult<Vec<Caregiver>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM caregivers ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut caregivers = Vec::new();
        while let Some(row) = rows.next()? {
            caregivers.push(Caregiver {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(caregivers)
    }

    fn count_caregivers(&self) -> RepoResult<u64> {
        count_caregivers_in(self.conn)
    }

    fn count_shifts_for_caregiver(&self, id: CaregiverId) -> RepoResult<u64> {
        shifts_owned_by(self.conn, id)
    }
}

/// Inserts one caregiver with an already-normalized name.
///
/// Runs on whatever transaction the caller holds.
pub(crate) fn insert_caregiver(conn: &Connection, name: &str) -> RepoResult<Caregiver> {
    conn.execute("INSERT INTO caregivers (name) VALUES (?1);", [name])?;
    Ok(Caregiver {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub(crate) fn count_caregivers_in(conn: &Connection) -> RepoResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM caregivers;", [], |row| row.get(0))?;
    count_from_db(count, "caregivers")
}

pub(crate) fn caregiver_exists(conn: &Connection, id: CaregiverId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM caregivers WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn shifts_owned_by(conn: &Connection, id: CaregiverId) -> RepoResult<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM shifts WHERE caregiver_id = ?1;",
        [id],
        |row| row.get(0),
    )?;
    count_from_db(count, "shifts.caregiver_id")
}
