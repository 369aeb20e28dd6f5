//! Login entry points.

use crate::error::{guard, guard_code, BoundaryError, STATUS_BOUNDARY_FAILURE};
use crate::handles::{arg_mut, arg_ref, mint, reclaim};
use crate::store::RawStore;
use crate::strings::{str_arg, text_getter, timestamp_out};
use std::os::raw::{c_char, c_int};
use toodle_core::{Login, LoginService, LoginStatus};

/// Owned snapshot of one login plus the status it was obtained with.
pub struct RawLogin {
    pub(crate) login: Login,
    pub(crate) status: LoginStatus,
}

/// Checks credentials and returns a `LoginStatus` code.
///
/// Wrong credentials are a status, not a failure. Returns
/// `STATUS_BOUNDARY_FAILURE` only when the store could not be queried.
///
/// # Safety
/// `store` must be null or a live store handle; string arguments must be
/// null or nul-terminated.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_validate(
    store: *const RawStore,
    username: *const c_char,
    password: *const c_char,
) -> c_int {
    guard("toodle_login_validate", STATUS_BOUNDARY_FAILURE, || {
        let store = arg_ref(store, "store")?;
        let username = str_arg(username, "username")?;
        let password = str_arg(password, "password")?;
        let status = LoginService::new(store.logins()?).validate_login(&username, &password)?;
        Ok(status.code())
    })
}

/// Creates a login. Null when the username is taken (`ErrorCode::Rejected`)
/// or on failure.
///
/// # Safety
/// Same as `toodle_login_validate`.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_create(
    store: *const RawStore,
    username: *const c_char,
    password: *const c_char,
) -> *mut RawLogin {
    guard("toodle_login_create", std::ptr::null_mut(), || {
        let store = arg_ref(store, "store")?;
        let username = str_arg(username, "username")?;
        let password = str_arg(password, "password")?;
        let login = LoginService::new(store.logins()?).create_login(&username, &password)?;
        Ok(mint(RawLogin {
            login,
            status: LoginStatus::Valid,
        }))
    })
}

/// # Safety
/// `login` must be null or a login handle not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_destroy(login: *mut RawLogin) {
    drop(reclaim(login));
}

/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_id(login: *const RawLogin) -> i64 {
    guard("toodle_login_get_id", 0, || Ok(arg_ref(login, "login")?.login.id))
}

/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_username(login: *const RawLogin) -> *mut c_char {
    text_getter("toodle_login_get_username", login, |raw| raw.login.username.as_str())
}

/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_guid(login: *const RawLogin) -> *mut c_char {
    text_getter("toodle_login_get_guid", login, |raw| raw.login.guid.as_str())
}

/// Replaces the handle's guid. Empty values are rejected.
///
/// # Safety
/// `login` must be null or a live login handle; `guid` must be null or a
/// nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_set_guid(login: *mut RawLogin, guid: *const c_char) -> c_int {
    guard_code("toodle_login_set_guid", || {
        let login = arg_mut(login, "login")?;
        let guid = str_arg(guid, "guid")?;
        if guid.trim().is_empty() {
            return Err(BoundaryError::invalid_argument("guid cannot be empty"));
        }
        login.login.guid = guid;
        Ok(())
    })
}

/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_time_created(login: *const RawLogin) -> i64 {
    guard("toodle_login_get_time_created", 0, || {
        Ok(arg_ref(login, "login")?.login.time_created)
    })
}

/// Owned timestamp, or null when the login was never used.
///
/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_time_last_used(login: *const RawLogin) -> *mut i64 {
    guard("toodle_login_get_time_last_used", std::ptr::null_mut(), || {
        Ok(timestamp_out(arg_ref(login, "login")?.login.time_last_used))
    })
}

/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_time_password_changed(login: *const RawLogin) -> i64 {
    guard("toodle_login_get_time_password_changed", 0, || {
        Ok(arg_ref(login, "login")?.login.time_password_changed)
    })
}

/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_times_used(login: *const RawLogin) -> i64 {
    guard("toodle_login_get_times_used", 0, || {
        Ok(arg_ref(login, "login")?.login.times_used)
    })
}

/// `LoginStatus` code of the handle; `Invalid` for a null handle.
///
/// # Safety
/// `login` must be null or a live login handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_login_get_status(login: *const RawLogin) -> c_int {
    guard("toodle_login_get_status", LoginStatus::Invalid.code(), || {
        Ok(arg_ref(login, "login")?.status.code())
    })
}
