//! Error taxonomy surfaced to UI callers.
//!
//! Wrong login credentials are not an error; see `LoginStatus`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use toodle_ffi::error::{toodle_last_error_code, toodle_last_error_message};
use toodle_ffi::ErrorCode;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The boundary returned no handle where one was expected.
    NotFound {
        resource: &'static str,
        detail: String,
    },
    /// The boundary returned text or scalars this layer cannot decode.
    CorruptData(String),
    /// The boundary rejected a write.
    UpdateFailed {
        operation: &'static str,
        detail: String,
    },
    /// The caller passed a value that cannot cross the boundary.
    InvalidArgument(String),
    /// The store could not be reached or failed internally.
    Unavailable(String),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, detail } => write!(f, "{resource} not found: {detail}"),
            Self::CorruptData(detail) => write!(f, "corrupt data from store: {detail}"),
            Self::UpdateFailed { operation, detail } => {
                write!(f, "{operation} rejected by store: {detail}")
            }
            Self::InvalidArgument(detail) => write!(f, "invalid argument: {detail}"),
            Self::Unavailable(detail) => write!(f, "store unavailable: {detail}"),
        }
    }
}

impl Error for ClientError {}

/// Last failure recorded by the boundary on this thread.
pub(crate) struct BoundaryFailure {
    pub(crate) code: ErrorCode,
    pub(crate) message: String,
}

impl BoundaryFailure {
    /// Reads and frees the boundary's last-error slot.
    pub(crate) fn take_last() -> Self {
        let code = ErrorCode::from_code(toodle_last_error_code());
        let raw = toodle_last_error_message();
        let message = if raw.is_null() {
            "no detail reported".to_string()
        } else {
            // SAFETY: non-null strings from the boundary are nul-terminated
            // and owned by us until passed back to the destroy entry point.
            unsafe {
                let text = std::ffi::CStr::from_ptr(raw).to_string_lossy().into_owned();
                toodle_ffi::strings::toodle_string_destroy(raw);
                text
            }
        };
        Self { code, message }
    }

    pub(crate) fn is_failure(&self) -> bool {
        self.code != ErrorCode::Ok
    }

    /// Maps a failed read: a missing handle is `NotFound`.
    pub(crate) fn into_fetch_error(self, resource: &'static str) -> ClientError {
        match self.code {
            ErrorCode::InvalidArgument => ClientError::InvalidArgument(self.message),
            ErrorCode::Rejected => ClientError::UpdateFailed {
                operation: resource,
                detail: self.message,
            },
            ErrorCode::Storage => ClientError::Unavailable(self.message),
            ErrorCode::Ok | ErrorCode::NotFound => ClientError::NotFound {
                resource,
                detail: self.message,
            },
        }
    }

    /// Maps a failed write: missing identities and rejections are
    /// `UpdateFailed`.
    pub(crate) fn into_write_error(self, operation: &'static str) -> ClientError {
        match self.code {
            ErrorCode::InvalidArgument => ClientError::InvalidArgument(self.message),
            ErrorCode::Storage => ClientError::Unavailable(self.message),
            ErrorCode::Ok | ErrorCode::NotFound | ErrorCode::Rejected => {
                ClientError::UpdateFailed {
                    operation,
                    detail: self.message,
                }
            }
        }
    }
}

/// Turns an entry point's `c_int` result code into a `ClientResult`.
pub(crate) fn check_write(code: i32, operation: &'static str) -> ClientResult<()> {
    if ErrorCode::from_code(code) == ErrorCode::Ok {
        return Ok(());
    }
    Err(BoundaryFailure::take_last().into_write_error(operation))
}
