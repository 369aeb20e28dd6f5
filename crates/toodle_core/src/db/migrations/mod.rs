//! Versioned schema steps.
//!
//! Step `n` moves a store from `user_version = n - 1` to `n`. All pending
//! steps run in one transaction, so a failing step leaves the file as it was.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;
use std::cmp::Ordering;

const SCHEMA_STEPS: [&str; 2] = [
    include_str!("0001_init.sql"),
    include_str!("0002_labels.sql"),
];

/// Schema version produced by a full migration.
pub const fn latest_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Brings `conn` up to `latest_version`.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the store is ahead of this build.
/// - `DbError::Sqlite` when a step fails; nothing is applied then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let supported = latest_version();
    match found.cmp(&supported) {
        Ordering::Greater => return Err(DbError::SchemaTooNew { found, supported }),
        Ordering::Equal => return Ok(()),
        Ordering::Less => {}
    }

    let tx = conn.transaction()?;
    for (version, sql) in pending_steps(found) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        debug!("event=db_migrate module=db status=ok version={version}");
    }
    tx.commit()?;
    info!("event=db_migrate module=db status=done from={found} to={supported}");
    Ok(())
}

fn pending_steps(found: u32) -> impl Iterator<Item = (u32, &'static str)> {
    (1..)
        .zip(SCHEMA_STEPS)
        .filter(move |(version, _)| *version > found)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, pending_steps};

    #[test]
    fn pending_steps_skip_applied_versions() {
        let versions = pending_steps(1).map(|(version, _)| version).collect::<Vec<_>>();
        assert_eq!(versions, [2]);
        assert_eq!(pending_steps(0).count() as u32, latest_version());
        assert_eq!(pending_steps(latest_version()).count(), 0);
    }
}
