//! Label entry points.

use crate::error::{guard, guard_code, BoundaryError};
use crate::handles::{arg_mut, arg_ref, mint, reclaim, RawList};
use crate::store::{RawStore, StoreId};
use crate::strings::{str_arg, text_getter};
use std::os::raw::{c_char, c_int};
use toodle_core::{normalize_color, Label, LabelRepository};

/// Owned snapshot of one label and the store that issued it.
pub struct RawLabel(pub(crate) Label, pub(crate) StoreId);

pub type RawLabelList = RawList<Label>;

list_entry_points!(
    Label,
    RawLabel,
    toodle_label_list_count,
    toodle_label_list_at,
    toodle_label_list_destroy
);

/// All labels in creation order.
///
/// # Safety
/// `store` must be null or a live store handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_list(store: *const RawStore) -> *mut RawLabelList {
    guard("toodle_label_list", std::ptr::null_mut(), || {
        let store = arg_ref(store, "store")?;
        let labels = store.labels()?.list_labels()?;
        Ok(mint(RawList::new(store.id(), labels)))
    })
}

/// Creates a label. `color` is `RRGGBB` with an optional `#`.
/// Null on failure; a taken name reports `ErrorCode::Rejected`.
///
/// # Safety
/// `store` must be null or a live store handle; string arguments must be
/// null or nul-terminated.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_create(
    store: *const RawStore,
    name: *const c_char,
    color: *const c_char,
) -> *mut RawLabel {
    guard("toodle_label_create", std::ptr::null_mut(), || {
        let store = arg_ref(store, "store")?;
        let name = str_arg(name, "name")?;
        let color = str_arg(color, "color")?;
        let label = store.labels()?.create_label(&name, &color)?;
        Ok(mint(RawLabel(label, store.id())))
    })
}

/// Writes the handle's current color to the store.
///
/// A label handle from another store reports `NotFound` and writes nothing.
///
/// # Safety
/// `store` and `label` must be null or live handles.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_update(
    store: *const RawStore,
    label: *const RawLabel,
) -> c_int {
    guard_code("toodle_label_update", || {
        let store = arg_ref(store, "store")?;
        let label = arg_ref(label, "label")?;
        store.check_owner(label.1, "label", label.0.id)?;
        store
            .labels()?
            .update_label_color(label.0.id, &label.0.color)?;
        Ok(())
    })
}

/// # Safety
/// `label` must be null or a label handle not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_destroy(label: *mut RawLabel) {
    drop(reclaim(label));
}

/// # Safety
/// `label` must be null or a live label handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_get_id(label: *const RawLabel) -> i64 {
    guard("toodle_label_get_id", 0, || Ok(arg_ref(label, "label")?.0.id))
}

/// # Safety
/// `label` must be null or a live label handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_get_name(label: *const RawLabel) -> *mut c_char {
    text_getter("toodle_label_get_name", label, |label| label.0.name.as_str())
}

/// `#rrggbb`.
///
/// # Safety
/// `label` must be null or a live label handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_get_color(label: *const RawLabel) -> *mut c_char {
    text_getter("toodle_label_get_color", label, |label| label.0.color.as_str())
}

/// Sets the handle's color; malformed hex reports `InvalidArgument` and
/// leaves the handle unchanged.
///
/// # Safety
/// `label` must be null or a live label handle; `color` must be null or a
/// nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn toodle_label_set_color(
    label: *mut RawLabel,
    color: *const c_char,
) -> c_int {
    guard_code("toodle_label_set_color", || {
        let label = arg_mut(label, "label")?;
        let color = str_arg(color, "color")?;
        label.0.color = normalize_color(&color)
            .map_err(|err| BoundaryError::invalid_argument(err.to_string()))?;
        Ok(())
    })
}
