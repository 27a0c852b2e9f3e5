//! Embedded schema steps for the site store.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - All pending steps run in one transaction; `user_version` follows each step.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "users_news_comments",
        sql: include_str!("0001_users_news_comments.sql"),
    },
    Migration {
        version: 2,
        name: "notes",
        sql: include_str!("0002_notes.sql"),
    },
];

/// Schema version this build migrates to.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the store up to `latest_version()`.
///
/// # Errors
/// - `DbError::SchemaAhead` when the store is newer than this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = current_user_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaAhead { found, supported });
    }

    let mut pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > found)
        .peekable();
    if pending.peek().is_none() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        debug!(
            "event=db_migrate_step module=db version={} name={}",
            migration.version, migration.name
        );
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}

/// Schema version recorded in the store.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
