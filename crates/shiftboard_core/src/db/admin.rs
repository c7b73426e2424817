//! Administrative schema maintenance.
//!
//! `reset_schema` is destructive and must only run on an explicit operator
//! request (for example the CLI `reset` subcommand). Core bootstrap paths
//! never call it.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};

/// Drops all schedule tables and re-applies migrations from scratch.
///
/// # Side effects
/// - Deletes every caregiver and shift record.
/// - Emits `schema_reset` logging events.
pub fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    warn!("event=schema_reset module=db status=start");

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(
        "DROP TABLE IF EXISTS shifts;
         DROP TABLE IF EXISTS caregivers;
         PRAGMA user_version = 0;",
    )?;
    tx.commit()?;

    apply_migrations(conn)?;
    info!("event=schema_reset module=db status=ok");
    Ok(())
}
