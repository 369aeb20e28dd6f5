//! Text and optional-scalar marshaling on the boundary side.

use crate::error::{guard, BoundaryError, BoundaryResult, ErrorCode};
use crate::handles::{mint, note_minted, note_reclaimed, reclaim};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Copies a caller-owned, nul-terminated UTF-8 argument.
///
/// # Safety
/// `ptr` must be null or point to a nul-terminated string valid for the call.
pub(crate) unsafe fn str_arg(ptr: *const c_char, name: &str) -> BoundaryResult<String> {
    if ptr.is_null() {
        return Err(BoundaryError::invalid_argument(format!("`{name}` is null")));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|_| BoundaryError::invalid_argument(format!("`{name}` is not valid UTF-8")))
}

/// Reads a nullable timestamp argument; null means absent.
///
/// # Safety
/// `ptr` must be null or point to a readable `i64` valid for the call.
pub(crate) unsafe fn timestamp_arg(ptr: *const i64) -> Option<i64> {
    ptr.as_ref().copied()
}

/// Hands a copy of `value` to the caller as an owned C string.
pub(crate) fn string_out(value: &str) -> BoundaryResult<*mut c_char> {
    let owned = CString::new(value).map_err(|_| {
        BoundaryError::new(ErrorCode::Storage, "stored text contains an interior NUL byte")
    })?;
    note_minted();
    Ok(owned.into_raw())
}

/// Hands an optional timestamp to the caller; absent becomes null.
pub(crate) fn timestamp_out(value: Option<i64>) -> *mut i64 {
    value.map_or(std::ptr::null_mut(), mint)
}

/// Frees a string returned by any getter. Null is ignored.
///
/// # Safety
/// `value` must be null or a string returned by this library, not yet freed.
#[no_mangle]
pub unsafe extern "C" fn toodle_string_destroy(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    note_reclaimed();
    drop(CString::from_raw(value));
}

/// Frees an optional timestamp returned by a getter. Null is ignored.
///
/// # Safety
/// `value` must be null or a timestamp returned by this library, not yet freed.
#[no_mangle]
pub unsafe extern "C" fn toodle_timestamp_destroy(value: *mut i64) {
    drop(reclaim(value));
}

/// Shared body for text getters on a record handle.
///
/// # Safety
/// `ptr` must be null or point to a live `T`.
pub(crate) unsafe fn text_getter<T>(
    entry_point: &'static str,
    ptr: *const T,
    read: impl FnOnce(&T) -> &str,
) -> *mut c_char {
    guard(entry_point, std::ptr::null_mut(), || {
        let record = crate::handles::arg_ref(ptr, "handle")?;
        string_out(read(record))
    })
}
