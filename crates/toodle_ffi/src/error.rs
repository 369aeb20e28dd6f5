//! Result codes and per-thread last-error reporting.

use log::{error, warn};
use std::cell::RefCell;
use std::os::raw::{c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use toodle_core::db::DbError;
use toodle_core::RepoError;

/// Returned by `toodle_login_validate` when the store itself failed.
pub const STATUS_BOUNDARY_FAILURE: c_int = -1;

/// Outcome codes shared by every fallible entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    NotFound = 1,
    Rejected = 2,
    Storage = 3,
    InvalidArgument = 4,
}

impl ErrorCode {
    pub fn code(self) -> c_int {
        self as c_int
    }

    /// Unknown codes collapse to `Storage`.
    pub fn from_code(code: c_int) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::NotFound,
            2 => Self::Rejected,
            4 => Self::InvalidArgument,
            _ => Self::Storage,
        }
    }
}

/// Failure raised inside an entry point body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BoundaryError {
    pub(crate) code: ErrorCode,
    pub(crate) message: String,
}

pub(crate) type BoundaryResult<T> = Result<T, BoundaryError>;

impl BoundaryError {
    pub(crate) fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(entity: &str, key: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::NotFound, format!("{entity} not found: {key}"))
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }
}

impl From<RepoError> for BoundaryError {
    fn from(value: RepoError) -> Self {
        let code = match &value {
            RepoError::NotFound { .. } => ErrorCode::NotFound,
            RepoError::Conflict { .. } => ErrorCode::Rejected,
            RepoError::Validation(_) => ErrorCode::InvalidArgument,
            RepoError::Db(_) | RepoError::InvalidData(_) | RepoError::MissingRequiredTable(_) => {
                ErrorCode::Storage
            }
        };
        Self::new(code, value.to_string())
    }
}

impl From<DbError> for BoundaryError {
    fn from(value: DbError) -> Self {
        Self::new(ErrorCode::Storage, value.to_string())
    }
}

impl From<rusqlite::Error> for BoundaryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(ErrorCode::Storage, value.to_string())
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<BoundaryError>> = const { RefCell::new(None) };
}

fn set_last_error(err: BoundaryError) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(err));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Runs one entry point body: clears the last error, catches panics and
/// records failures. Returns `fallback` on any failure.
pub(crate) fn guard<T>(
    entry_point: &'static str,
    fallback: T,
    body: impl FnOnce() -> BoundaryResult<T>,
) -> T {
    clear_last_error();
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            warn!(
                "event=boundary_call module=ffi status=error entry_point={} error_code={}",
                entry_point,
                err.code.code()
            );
            set_last_error(err);
            fallback
        }
        Err(_) => {
            error!(
                "event=boundary_call module=ffi status=panic entry_point={}",
                entry_point
            );
            set_last_error(BoundaryError::new(
                ErrorCode::Storage,
                format!("{entry_point} panicked"),
            ));
            fallback
        }
    }
}

/// Like `guard` for entry points that report an `ErrorCode` as `c_int`.
pub(crate) fn guard_code(
    entry_point: &'static str,
    body: impl FnOnce() -> BoundaryResult<()>,
) -> c_int {
    guard(entry_point, (), body);
    last_error_code()
}

/// Code of the last failure on this thread, `0` when the last call succeeded.
#[no_mangle]
pub extern "C" fn toodle_last_error_code() -> c_int {
    last_error_code()
}

fn last_error_code() -> c_int {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ErrorCode::Ok.code(), |err| err.code.code())
    })
}

/// Message of the last failure on this thread, or null.
///
/// The returned string is owned by the caller (`toodle_string_destroy`).
#[no_mangle]
pub extern "C" fn toodle_last_error_message() -> *mut c_char {
    let message = LAST_ERROR.with(|slot| slot.borrow().as_ref().map(|err| err.message.clone()));
    match message {
        Some(message) => crate::strings::string_out(&message.replace('\0', " "))
            .unwrap_or(std::ptr::null_mut()),
        None => std::ptr::null_mut(),
    }
}
