//! Ordered schema steps for the trivia store.
//!
//! The applied step is recorded in `PRAGMA user_version`; a store at
//! version `n` has run every step up to and including `n`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[Step {
    version: 1,
    name: "categories_and_questions",
    sql: include_str!("0001_init.sql"),
}];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    STEPS.iter().map(|step| step.version).max().unwrap_or(0)
}

/// Schema version currently recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings the store up to [`latest_version`] in a single transaction.
///
/// Stores written by a newer build are refused untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = STEPS.iter().filter(|step| step.version > found);
    let tx = conn.transaction()?;
    let mut applied = 0usize;
    for step in pending {
        run_step(&tx, step)?;
        applied += 1;
    }
    tx.commit()?;

    if applied > 0 {
        info!(
            "event=db_migrate module=db status=ok from={} to={} steps={}",
            found, supported, applied
        );
    }
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &Step) -> DbResult<()> {
    let fail = |source| DbError::Migration {
        version: step.version,
        name: step.name,
        source,
    };
    tx.execute_batch(step.sql).map_err(fail)?;
    tx.pragma_update(None, "user_version", step.version)
        .map_err(fail)?;
    Ok(())
}
