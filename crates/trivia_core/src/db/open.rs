//! Opening trivia stores.
//!
//! Every returned connection enforces foreign keys and carries the current
//! schema.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::StoreConfig;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Busy timeout for in-memory stores, which are never shared.
const MEMORY_BUSY_TIMEOUT: Duration = Duration::from_secs(1);

enum Target<'a> {
    File(&'a Path),
    Memory,
}

impl Target<'_> {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens the store described by `config`.
///
/// Each unit of work calls this for its own connection; nothing is pooled.
pub fn open_store(config: &StoreConfig) -> DbResult<Connection> {
    open(
        Target::File(&config.db_path),
        Duration::from_millis(config.busy_timeout_ms),
    )
}

/// Opens a store file with the default busy timeout.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let timeout = Duration::from_millis(StoreConfig::default().busy_timeout_ms);
    open(Target::File(path.as_ref()), timeout)
}

/// Fresh, isolated in-memory store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open(Target::Memory, MEMORY_BUSY_TIMEOUT)
}

fn open(target: Target<'_>, busy_timeout: Duration) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = target.mode();

    let result = connect(&target).and_then(|mut conn| {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(busy_timeout)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    let elapsed = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={elapsed}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={elapsed} error={err}"
        ),
    }
    result
}

fn connect(target: &Target<'_>) -> DbResult<Connection> {
    let conn = match target {
        Target::File(path) => Connection::open(path)?,
        Target::Memory => Connection::open_in_memory()?,
    };
    Ok(conn)
}
