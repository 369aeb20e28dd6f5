use crate::codec::with_c_string;
use crate::entity::login::{Login, LoginStatus};
use crate::error::{BoundaryFailure, ClientError, ClientResult};
use crate::handle::Handle;
use crate::store::Store;
use log::{debug, warn};
use std::os::raw::c_char;
use toodle_ffi::logins::{toodle_login_create, toodle_login_validate};
use toodle_ffi::{ErrorCode, RawStore, STATUS_BOUNDARY_FAILURE};

#[derive(Debug, Clone, Copy)]
pub struct LoginManager<'s> {
    store: &'s Store,
}

impl<'s> LoginManager<'s> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// Checks credentials. Wrong credentials are a status, not an error;
    /// a valid check marks the login as used.
    ///
    /// # Errors
    /// - `Unavailable` when the store could not be queried.
    pub fn validate(&self, username: &str, password: &str) -> ClientResult<LoginStatus> {
        let status = self.with_credentials(username, password, |store, username, password| {
            let code = unsafe { toodle_login_validate(store, username, password) };
            if code == STATUS_BOUNDARY_FAILURE {
                let failure = BoundaryFailure::take_last();
                warn!("event=login_validate module=client status=error");
                return Err(ClientError::Unavailable(failure.message));
            }
            Ok(LoginStatus::from_code(code))
        })?;
        debug!("event=login_validate module=client status={status:?}");
        Ok(status)
    }

    /// Creates a login; `None` when the username is already taken.
    pub fn create(&self, username: &str, password: &str) -> ClientResult<Option<Login>> {
        self.with_credentials(username, password, |store, username, password| {
            let raw = unsafe { toodle_login_create(store, username, password) };
            if let Some(handle) = unsafe { Handle::from_raw(raw) } {
                debug!("event=login_create module=client status=ok");
                return Ok(Some(Login::from_handle(handle)));
            }
            let failure = BoundaryFailure::take_last();
            if failure.code == ErrorCode::Rejected {
                debug!("event=login_create module=client status=rejected");
                return Ok(None);
            }
            Err(failure.into_fetch_error("login"))
        })
    }

    fn with_credentials<T>(
        &self,
        username: &str,
        password: &str,
        call: impl FnOnce(*mut RawStore, *const c_char, *const c_char) -> ClientResult<T>,
    ) -> ClientResult<T> {
        with_c_string(username, "username", |username| {
            with_c_string(password, "password", |password| {
                self.store.call(|store| call(store, username, password))
            })
        })
    }
}
