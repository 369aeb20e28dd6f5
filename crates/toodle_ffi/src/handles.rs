//! Ownership transfer helpers for boxed boundary resources.
//!
//! Every allocation handed to the caller goes through `mint` and comes back
//! through `reclaim`, so the per-thread live count stays balanced when the
//! caller honors the destroy contract.

use crate::error::{BoundaryError, BoundaryResult};
use crate::store::StoreId;
use std::cell::Cell;

thread_local! {
    static LIVE_HANDLES: Cell<i64> = const { Cell::new(0) };
}

/// Boxed batch of records returned by list entry points.
///
/// Entries remember the store that produced them so handles taken with
/// `*_list_at` keep their owner.
pub struct RawList<T> {
    pub(crate) store: StoreId,
    pub(crate) entries: Vec<T>,
}

impl<T> RawList<T> {
    pub(crate) fn new(store: StoreId, entries: Vec<T>) -> Self {
        Self { store, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handles minted minus handles destroyed on the calling thread.
///
/// Strings and optional timestamps returned by getters count as handles.
#[no_mangle]
pub extern "C" fn toodle_debug_live_handles() -> i64 {
    LIVE_HANDLES.with(Cell::get)
}

pub(crate) fn note_minted() {
    LIVE_HANDLES.with(|live| live.set(live.get() + 1));
}

pub(crate) fn note_reclaimed() {
    LIVE_HANDLES.with(|live| live.set(live.get() - 1));
}

pub(crate) fn mint<T>(value: T) -> *mut T {
    note_minted();
    Box::into_raw(Box::new(value))
}

/// Takes ownership back from the caller. Null is ignored.
///
/// # Safety
/// `ptr` must be null or come from `mint::<T>` and not have been reclaimed.
pub(crate) unsafe fn reclaim<T>(ptr: *mut T) -> Option<Box<T>> {
    if ptr.is_null() {
        return None;
    }
    note_reclaimed();
    Some(Box::from_raw(ptr))
}

/// # Safety
/// `ptr` must be null or point to a live `T`.
pub(crate) unsafe fn arg_ref<'a, T>(ptr: *const T, name: &str) -> BoundaryResult<&'a T> {
    ptr.as_ref()
        .ok_or_else(|| BoundaryError::invalid_argument(format!("`{name}` is null")))
}

/// # Safety
/// `ptr` must be null or point to a live `T` with no other active reference.
pub(crate) unsafe fn arg_mut<'a, T>(ptr: *mut T, name: &str) -> BoundaryResult<&'a mut T> {
    ptr.as_mut()
        .ok_or_else(|| BoundaryError::invalid_argument(format!("`{name}` is null")))
}

/// Reads a caller-packed array of `len` resource pointers.
///
/// # Safety
/// When `len > 0`, `ptr` must point to `len` readable pointers, each null or
/// pointing to a live `T`, valid for the duration of the call.
pub(crate) unsafe fn handle_array_arg<'a, T>(
    ptr: *const *const T,
    len: usize,
    name: &str,
) -> BoundaryResult<Vec<&'a T>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if ptr.is_null() {
        return Err(BoundaryError::invalid_argument(format!(
            "`{name}` is null but length is {len}"
        )));
    }
    std::slice::from_raw_parts(ptr, len)
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.as_ref().ok_or_else(|| {
                BoundaryError::invalid_argument(format!("`{name}[{index}]` is null"))
            })
        })
        .collect()
}

/// Entry point body for `*_list_at`: clones one entry into a new handle.
pub(crate) fn list_entry<T: Clone, R>(
    list: &RawList<T>,
    index: usize,
    wrap: impl FnOnce(T, StoreId) -> R,
) -> BoundaryResult<*mut R> {
    let entry = list.entries.get(index).ok_or_else(|| {
        BoundaryError::invalid_argument(format!(
            "index {index} out of bounds for list of {}",
            list.entries.len()
        ))
    })?;
    Ok(mint(wrap(entry.clone(), list.store)))
}

/// Emits the `count` / `at` / `destroy` entry points for one list type.
macro_rules! list_entry_points {
    ($record:ty, $raw:ident, $count:ident, $at:ident, $destroy:ident) => {
        /// Number of entries in the list; 0 for a null list.
        ///
        /// # Safety
        /// `list` must be null or a live list handle.
        #[no_mangle]
        pub unsafe extern "C" fn $count(list: *const $crate::handles::RawList<$record>) -> usize {
            $crate::error::guard(stringify!($count), 0, || {
                Ok($crate::handles::arg_ref(list, "list")?.len())
            })
        }

        /// New owned handle for the entry at `index`; null when out of bounds.
        ///
        /// # Safety
        /// `list` must be null or a live list handle.
        #[no_mangle]
        pub unsafe extern "C" fn $at(
            list: *const $crate::handles::RawList<$record>,
            index: usize,
        ) -> *mut $raw {
            $crate::error::guard(stringify!($at), std::ptr::null_mut(), || {
                let list = $crate::handles::arg_ref(list, "list")?;
                $crate::handles::list_entry(list, index, $raw)
            })
        }

        /// # Safety
        /// `list` must be null or a list handle not yet destroyed.
        #[no_mangle]
        pub unsafe extern "C" fn $destroy(list: *mut $crate::handles::RawList<$record>) {
            drop($crate::handles::reclaim(list));
        }
    };
}
