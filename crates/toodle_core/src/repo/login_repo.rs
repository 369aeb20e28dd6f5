//! Login repository contracts and SQLite implementation.

use super::{ensure_tables, map_conflict, RepoError, RepoResult};
use crate::model::login::{Login, LoginId};
use crate::model::unix_now;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const LOGIN_SELECT_SQL: &str = "SELECT
    id,
    username,
    password,
    guid,
    time_created,
    time_last_used,
    time_password_changed,
    times_used
FROM logins";

pub trait LoginRepository {
    /// Creates a login with a fresh guid. Taken usernames yield `Conflict`.
    fn create_login(&self, username: &str, password: &str) -> RepoResult<Login>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<Login>>;
    /// Bumps `times_used` and stamps `time_last_used` with `now`.
    fn mark_used(&self, id: LoginId, now: i64) -> RepoResult<()>;
}

/// SQLite-backed login repository.
pub struct SqliteLoginRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLoginRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["logins"])?;
        Ok(Self { conn })
    }
}

impl LoginRepository for SqliteLoginRepository<'_> {
    fn create_login(&self, username: &str, password: &str) -> RepoResult<Login> {
        Login::validate_credentials(username, password)?;
        let now = unix_now();

        self.conn
            .execute(
                "INSERT INTO logins (
                    username,
                    password,
                    guid,
                    time_created,
                    time_password_changed
                ) VALUES (?1, ?2, ?3, ?4, ?4);",
                params![username, password, Uuid::new_v4().simple().to_string(), now],
            )
            .map_err(|err| map_conflict(err, "login", username))?;

        self.find_by_username(username)?
            .ok_or_else(|| RepoError::not_found("login", username))
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<Login>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOGIN_SELECT_SQL} WHERE username = ?1 LIMIT 1;"))?;
        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_login_row(row)?));
        }
        Ok(None)
    }

    fn mark_used(&self, id: LoginId, now: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE logins
             SET
                times_used = times_used + 1,
                time_last_used = ?1
             WHERE id = ?2;",
            params![now, id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("login", id));
        }
        Ok(())
    }
}

fn parse_login_row(row: &Row<'_>) -> RepoResult<Login> {
    Ok(Login {
        id: row.get("id")?,
        username: row.get("username")?,
        password: row.get("password")?,
        guid: row.get("guid")?,
        time_created: row.get("time_created")?,
        time_last_used: row.get("time_last_used")?,
        time_password_changed: row.get("time_password_changed")?,
        times_used: row.get("times_used")?,
    })
}
