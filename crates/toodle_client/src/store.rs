//! Store context: the root handle and the lock that serializes its calls.
//!
//! # Invariants
//! - One root handle per context, released once when the context drops.
//! - A context cannot be reopened; open a new one instead.
//! - At most one boundary call on the root handle is in flight.

use crate::codec::with_c_string;
use crate::config::StoreConfig;
use crate::error::{ClientError, ClientResult};
use crate::handle::Handle;
use crate::manager::categories::CategoryManager;
use crate::manager::items::ItemManager;
use crate::manager::labels::LabelManager;
use crate::manager::logins::LoginManager;
use log::{error, info};
use std::sync::Mutex;
use toodle_ffi::store::toodle_store_open;
use toodle_ffi::RawStore;

pub struct Store {
    raw: Mutex<Handle<RawStore>>,
}

// SAFETY: the root handle owns a plain SQLite connection with no thread
// affinity, and every use of the pointer happens under `raw`'s lock.
unsafe impl Send for Store {}
unsafe impl Sync for Store {}

impl Store {
    /// Opens the store described by `config`, creating it if needed.
    ///
    /// # Errors
    /// - `InvalidArgument` for a path that cannot be passed to the boundary.
    /// - `Unavailable` when the store cannot be opened or migrated.
    pub fn open(config: &StoreConfig) -> ClientResult<Self> {
        Self::open_uri(&config.uri()?)
    }

    /// Opens a path, `file://` URL or `:memory:`.
    pub fn open_uri(uri: &str) -> ClientResult<Self> {
        let raw = with_c_string(uri, "uri", |uri| {
            // SAFETY: `uri` is nul-terminated and outlives the call.
            unsafe { Handle::acquire(toodle_store_open(uri)) }
        })
        .map_err(|err| match err {
            ClientError::NotFound { detail, .. } => ClientError::Unavailable(detail),
            other => other,
        })
        .inspect_err(|err| error!("event=store_open module=client status=error error={err}"))?;
        info!("event=store_open module=client status=ok");
        Ok(Self {
            raw: Mutex::new(raw),
        })
    }

    pub fn in_memory() -> ClientResult<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    pub fn categories(&self) -> CategoryManager<'_> {
        CategoryManager::new(self)
    }

    pub fn items(&self) -> ItemManager<'_> {
        ItemManager::new(self)
    }

    pub fn labels(&self) -> LabelManager<'_> {
        LabelManager::new(self)
    }

    pub fn logins(&self) -> LoginManager<'_> {
        LoginManager::new(self)
    }

    /// Runs `call` with the root handle while holding the store lock.
    pub(crate) fn call<T>(
        &self,
        call: impl FnOnce(*mut RawStore) -> ClientResult<T>,
    ) -> ClientResult<T> {
        let mut raw = self
            .raw
            .lock()
            .map_err(|_| ClientError::Unavailable("store lock poisoned".to_string()))?;
        call(raw.as_mut_ptr())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
