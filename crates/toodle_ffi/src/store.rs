//! Root store handle.

use crate::error::{guard, BoundaryError, BoundaryResult};
use crate::handles::{mint, reclaim};
use crate::strings::str_arg;
use log::info;
use rusqlite::Connection;
use std::os::raw::c_char;
use toodle_core::db::{open_db, open_db_in_memory};
use uuid::Uuid;
use toodle_core::{
    SqliteCategoryRepository, SqliteItemRepository, SqliteLabelRepository, SqliteLoginRepository,
};

/// URI that selects a private in-memory store.
pub const MEMORY_URI: &str = ":memory:";

/// Identity of one opened store, stamped on every record handle it mints.
///
/// Row ids restart at 1 in every store file, so a handle's numeric id alone
/// cannot tell which store issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoreId(Uuid);

/// One open connection to the store file.
pub struct RawStore {
    id: StoreId,
    conn: Connection,
}

impl RawStore {
    fn open(uri: &str) -> BoundaryResult<Self> {
        let trimmed = uri.trim();
        if trimmed.is_empty() {
            return Err(BoundaryError::invalid_argument("store uri cannot be empty"));
        }
        let conn = if trimmed == MEMORY_URI {
            open_db_in_memory()?
        } else {
            // URL-style paths from platform file APIs carry a scheme prefix.
            open_db(trimmed.strip_prefix("file://").unwrap_or(trimmed))?
        };
        Ok(Self {
            id: StoreId(Uuid::new_v4()),
            conn,
        })
    }

    pub(crate) fn id(&self) -> StoreId {
        self.id
    }

    /// Rejects a handle minted by another store as `NotFound`.
    pub(crate) fn check_owner(
        &self,
        owner: StoreId,
        entity: &str,
        key: impl std::fmt::Display,
    ) -> BoundaryResult<()> {
        if owner != self.id {
            return Err(BoundaryError::not_found(entity, key));
        }
        Ok(())
    }

    pub(crate) fn categories(&self) -> BoundaryResult<SqliteCategoryRepository<'_>> {
        Ok(SqliteCategoryRepository::try_new(&self.conn)?)
    }

    pub(crate) fn items(&mut self) -> BoundaryResult<SqliteItemRepository<'_>> {
        Ok(SqliteItemRepository::try_new(&mut self.conn)?)
    }

    pub(crate) fn labels(&self) -> BoundaryResult<SqliteLabelRepository<'_>> {
        Ok(SqliteLabelRepository::try_new(&self.conn)?)
    }

    pub(crate) fn logins(&self) -> BoundaryResult<SqliteLoginRepository<'_>> {
        Ok(SqliteLoginRepository::try_new(&self.conn)?)
    }
}

/// Opens (creating and migrating if needed) the store at `uri`.
///
/// `uri` is a filesystem path, a `file://` URL, or `:memory:`.
/// Returns null on failure.
///
/// # Safety
/// `uri` must be null or a nul-terminated string valid for the call.
#[no_mangle]
pub unsafe extern "C" fn toodle_store_open(uri: *const c_char) -> *mut RawStore {
    guard("toodle_store_open", std::ptr::null_mut(), || {
        let uri = str_arg(uri, "uri")?;
        let store = RawStore::open(&uri)?;
        info!("event=store_open module=ffi status=ok");
        Ok(mint(store))
    })
}

/// Closes the store. Null is ignored.
///
/// # Safety
/// `store` must be null or a store handle not yet destroyed, with no call
/// on it in flight.
#[no_mangle]
pub unsafe extern "C" fn toodle_store_destroy(store: *mut RawStore) {
    if reclaim(store).is_some() {
        info!("event=store_close module=ffi status=ok");
    }
}
