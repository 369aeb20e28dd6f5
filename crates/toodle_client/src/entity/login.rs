//! Login records and the closed validation status.

use crate::codec::{scalar, take_string, take_timestamp, with_c_string};
use crate::error::{check_write, ClientResult};
use crate::handle::{Handle, OwnsHandle};
use log::warn;
use std::os::raw::c_int;
use toodle_ffi::logins::{
    toodle_login_get_guid, toodle_login_get_id, toodle_login_get_status,
    toodle_login_get_time_created, toodle_login_get_time_last_used,
    toodle_login_get_time_password_changed, toodle_login_get_times_used,
    toodle_login_get_username, toodle_login_set_guid,
};
use toodle_ffi::RawLogin;

/// Outcome of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Valid,
    UnknownUsername,
    IncorrectPassword,
    Invalid,
}

impl LoginStatus {
    /// Decodes a boundary status code. Unrecognized codes are `Invalid`.
    pub fn from_code(code: c_int) -> Self {
        match code {
            0 => Self::Valid,
            1 => Self::UnknownUsername,
            2 => Self::IncorrectPassword,
            3 => Self::Invalid,
            other => {
                warn!("event=login_status_decode module=client status=unknown code={other}");
                Self::Invalid
            }
        }
    }

    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

#[derive(Debug)]
pub struct Login {
    handle: Handle<RawLogin>,
}

impl Login {
    pub(crate) fn from_handle(handle: Handle<RawLogin>) -> Self {
        Self { handle }
    }

    pub fn id(&self) -> ClientResult<i64> {
        scalar(unsafe { toodle_login_get_id(self.handle.as_ptr()) }, "login id")
    }

    pub fn username(&self) -> ClientResult<String> {
        unsafe { take_string(toodle_login_get_username(self.handle.as_ptr()), "login username") }
    }

    pub fn guid(&self) -> ClientResult<String> {
        unsafe { take_string(toodle_login_get_guid(self.handle.as_ptr()), "login guid") }
    }

    pub fn set_guid(&mut self, guid: &str) -> ClientResult<()> {
        let raw = self.handle.as_mut_ptr();
        with_c_string(guid, "guid", |guid| {
            check_write(unsafe { toodle_login_set_guid(raw, guid) }, "login guid")
        })
    }

    pub fn time_created(&self) -> ClientResult<i64> {
        scalar(
            unsafe { toodle_login_get_time_created(self.handle.as_ptr()) },
            "login time_created",
        )
    }

    /// `None` until the first successful validation.
    pub fn time_last_used(&self) -> ClientResult<Option<i64>> {
        unsafe {
            take_timestamp(
                toodle_login_get_time_last_used(self.handle.as_ptr()),
                "login time_last_used",
            )
        }
    }

    pub fn time_password_changed(&self) -> ClientResult<i64> {
        scalar(
            unsafe { toodle_login_get_time_password_changed(self.handle.as_ptr()) },
            "login time_password_changed",
        )
    }

    pub fn times_used(&self) -> ClientResult<i64> {
        scalar(
            unsafe { toodle_login_get_times_used(self.handle.as_ptr()) },
            "login times_used",
        )
    }

    /// Status recorded on the handle. Never fails; anything the boundary
    /// cannot vouch for is `Invalid`.
    pub fn status(&self) -> LoginStatus {
        LoginStatus::from_code(unsafe { toodle_login_get_status(self.handle.as_ptr()) })
    }
}

impl OwnsHandle for Login {
    type Raw = RawLogin;

    fn handle(&self) -> &Handle<RawLogin> {
        &self.handle
    }
}
