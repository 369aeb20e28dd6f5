//! Marshaling between Rust values and boundary representations.
//!
//! Every pointer handed to the boundary is scoped to one closure call;
//! every pointer received from it is wrapped in a `Handle` before use.

use crate::error::{BoundaryFailure, ClientError, ClientResult};
use crate::handle::{Handle, OwnsHandle};
use crate::resources::ListResource;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Runs `call` with a nul-terminated copy of `value`.
pub(crate) fn with_c_string<T>(
    value: &str,
    field: &'static str,
    call: impl FnOnce(*const c_char) -> ClientResult<T>,
) -> ClientResult<T> {
    let value = CString::new(value).map_err(|_| {
        ClientError::InvalidArgument(format!("{field} contains an interior nul byte"))
    })?;
    call(value.as_ptr())
}

/// Runs `call` with a pointer to `value`, or null when absent.
pub(crate) fn with_optional_timestamp<T>(
    value: Option<i64>,
    call: impl FnOnce(*const i64) -> T,
) -> T {
    match value {
        Some(value) => call(&value as *const i64),
        None => call(std::ptr::null()),
    }
}

/// Runs `call` with a packed array of the entities' handles.
///
/// The array is valid only for the duration of `call`.
pub(crate) fn with_handle_array<E: OwnsHandle, T>(
    entities: &[&E],
    call: impl FnOnce(*const *const E::Raw, usize) -> T,
) -> T {
    let packed = entities
        .iter()
        .map(|entity| entity.handle().as_ptr())
        .collect::<Vec<_>>();
    call(packed.as_ptr(), packed.len())
}

/// Decodes and frees a boundary-owned string.
///
/// # Safety
/// `raw` must be null or an unowned string returned by the last boundary
/// call on this thread.
pub(crate) unsafe fn take_string(raw: *mut c_char, field: &'static str) -> ClientResult<String> {
    let Some(text) = Handle::from_raw(raw) else {
        let failure = BoundaryFailure::take_last();
        return Err(ClientError::CorruptData(format!(
            "{field} missing: {}",
            failure.message
        )));
    };
    CStr::from_ptr(text.as_ptr())
        .to_str()
        .map(str::to_owned)
        .map_err(|_| ClientError::CorruptData(format!("{field} is not valid UTF-8")))
}

/// Decodes and frees a boundary-owned optional timestamp.
///
/// # Safety
/// Same as `take_string`.
pub(crate) unsafe fn take_timestamp(
    raw: *mut i64,
    field: &'static str,
) -> ClientResult<Option<i64>> {
    match Handle::from_raw(raw) {
        Some(value) => Ok(Some(*value.as_ptr())),
        None => {
            let failure = BoundaryFailure::take_last();
            if failure.is_failure() {
                return Err(failure.into_fetch_error(field));
            }
            Ok(None)
        }
    }
}

/// Checks a scalar getter result against the boundary's last error.
pub(crate) fn scalar<T>(value: T, field: &'static str) -> ClientResult<T> {
    let failure = BoundaryFailure::take_last();
    if failure.is_failure() {
        return Err(failure.into_fetch_error(field));
    }
    Ok(value)
}

/// Fetches every entry of `list` as its own handle, then releases the list.
///
/// Reads exactly the reported count; a failed entry releases everything
/// fetched so far.
pub(crate) fn decode_list<L: ListResource>(
    list: Handle<L>,
) -> ClientResult<Vec<Handle<L::Entry>>> {
    // SAFETY: `list` is live for this whole function and each entry is a
    // fresh allocation owned by the returned handle.
    let count = unsafe { L::count(list.as_ptr()) };
    let mut entries = Vec::with_capacity(count);
    for index in 0..count {
        entries.push(unsafe { Handle::acquire(L::at(list.as_ptr(), index)) }?);
    }
    Ok(entries)
}

/// `decode_list` over an entry point that may return a null list.
///
/// # Safety
/// `raw` must be null or an unowned list returned by the last boundary call
/// on this thread.
pub(crate) unsafe fn take_list<L: ListResource>(
    raw: *mut L,
) -> ClientResult<Vec<Handle<L::Entry>>> {
    decode_list(Handle::acquire(raw)?)
}
