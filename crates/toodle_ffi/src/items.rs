//! Item entry points.
//!
//! Setters change the handle only; `toodle_item_save` and
//! `toodle_item_update` write to the store.

use crate::error::{guard, guard_code, BoundaryError, BoundaryResult};
use crate::handles::{arg_mut, arg_ref, handle_array_arg, mint, reclaim, RawList};
use crate::labels::{RawLabel, RawLabelList};
use crate::store::{RawStore, StoreId};
use crate::strings::{str_arg, string_out, text_getter, timestamp_arg, timestamp_out};
use std::os::raw::{c_char, c_int};
use toodle_core::{Item, ItemRepository, LabelId, LabelRepository};

/// Owned snapshot of one item and the store that issued it.
pub struct RawItem(pub(crate) Item, pub(crate) StoreId);

pub type RawItemList = RawList<Item>;

list_entry_points!(
    Item,
    RawItem,
    toodle_item_list_count,
    toodle_item_list_at,
    toodle_item_list_destroy
);

/// All items in creation order.
///
/// # Safety
/// `store` must be null or a live store handle with no other call in flight.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_list(store: *mut RawStore) -> *mut RawItemList {
    guard("toodle_item_list", std::ptr::null_mut(), || {
        let store = arg_mut(store, "store")?;
        let owner = store.id();
        let items = store.items()?.list_items()?;
        Ok(mint(RawList::new(owner, items)))
    })
}

/// Creates an uncategorized item carrying `labels` in the given order.
///
/// `due_date` and `completion_date` are nullable; `labels` may be null when
/// `labels_len` is 0. Returns null on failure and writes nothing; a label
/// handle from another store reports `NotFound`.
///
/// # Safety
/// Pointer arguments must be null or valid for the duration of the call;
/// `labels` must point to `labels_len` label pointers.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_create(
    store: *mut RawStore,
    name: *const c_char,
    due_date: *const i64,
    completion_date: *const i64,
    labels: *const *const RawLabel,
    labels_len: usize,
) -> *mut RawItem {
    guard("toodle_item_create", std::ptr::null_mut(), || {
        let store = arg_mut(store, "store")?;
        let mut item = Item::new(str_arg(name, "name")?);
        item.due_date = timestamp_arg(due_date);
        item.completion_date = timestamp_arg(completion_date);
        item.validate().map_err(|err| BoundaryError::invalid_argument(err.to_string()))?;
        let label_ids = known_label_ids(store, labels, labels_len)?;

        let owner = store.id();
        store.items()?.create_item_with_labels(&item, &label_ids)?;
        Ok(mint(RawItem(item, owner)))
    })
}

/// Replaces name, dates and the full label set of a stored item.
///
/// Fields and labels are written in one transaction, so an unknown or
/// foreign label leaves the item untouched. On success the handle reflects
/// the stored state.
///
/// # Safety
/// Same as `toodle_item_create`; `item` must be a live item handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_update(
    store: *mut RawStore,
    item: *mut RawItem,
    name: *const c_char,
    due_date: *const i64,
    completion_date: *const i64,
    labels: *const *const RawLabel,
    labels_len: usize,
) -> c_int {
    guard_code("toodle_item_update", || {
        let store = arg_mut(store, "store")?;
        let item = arg_mut(item, "item")?;
        store.check_owner(item.1, "item", item.0.uuid)?;
        let mut updated = item.0.clone();
        updated.name = str_arg(name, "name")?;
        updated.due_date = timestamp_arg(due_date);
        updated.completion_date = timestamp_arg(completion_date);
        updated
            .validate()
            .map_err(|err| BoundaryError::invalid_argument(err.to_string()))?;
        let label_ids = known_label_ids(store, labels, labels_len)?;

        let mut repo = store.items()?;
        repo.update_item_with_labels(&updated, &label_ids)?;
        item.0 = repo
            .get_item(updated.uuid)?
            .ok_or_else(|| BoundaryError::not_found("item", updated.uuid))?;
        Ok(())
    })
}

/// Writes the handle's current name and dates to the store.
///
/// # Safety
/// `store` and `item` must be null or live handles.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_save(store: *mut RawStore, item: *const RawItem) -> c_int {
    guard_code("toodle_item_save", || {
        let store = arg_mut(store, "store")?;
        let item = arg_ref(item, "item")?;
        store.check_owner(item.1, "item", item.0.uuid)?;
        store.items()?.update_item(&item.0)?;
        Ok(())
    })
}

/// Labels attached to `item` in the store, in attachment order.
///
/// # Safety
/// `store` and `item` must be null or live handles.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_labels(
    store: *mut RawStore,
    item: *const RawItem,
) -> *mut RawLabelList {
    guard("toodle_item_labels", std::ptr::null_mut(), || {
        let store = arg_mut(store, "store")?;
        let item = arg_ref(item, "item")?;
        store.check_owner(item.1, "item", item.0.uuid)?;
        let owner = store.id();
        let labels = store.items()?.labels_for_item(item.0.uuid)?;
        Ok(mint(RawList::new(owner, labels)))
    })
}

/// # Safety
/// `item` must be null or an item handle not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_destroy(item: *mut RawItem) {
    drop(reclaim(item));
}

/// Hyphenated lowercase uuid.
///
/// # Safety
/// `item` must be null or a live item handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_get_uuid(item: *const RawItem) -> *mut c_char {
    guard("toodle_item_get_uuid", std::ptr::null_mut(), || {
        string_out(&arg_ref(item, "item")?.0.uuid.to_string())
    })
}

/// # Safety
/// `item` must be null or a live item handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_get_name(item: *const RawItem) -> *mut c_char {
    text_getter("toodle_item_get_name", item, |item| item.0.name.as_str())
}

/// # Safety
/// `item` must be null or a live item handle; `name` must be null or a
/// nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_set_name(item: *mut RawItem, name: *const c_char) -> c_int {
    guard_code("toodle_item_set_name", || {
        let item = arg_mut(item, "item")?;
        item.0.name = str_arg(name, "name")?;
        Ok(())
    })
}

/// # Safety
/// `item` must be null or a live item handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_get_created_at(item: *const RawItem) -> i64 {
    guard("toodle_item_get_created_at", 0, || {
        Ok(arg_ref(item, "item")?.0.created_at)
    })
}

/// Owned due date, or null when unset.
///
/// # Safety
/// `item` must be null or a live item handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_get_due_date(item: *const RawItem) -> *mut i64 {
    guard("toodle_item_get_due_date", std::ptr::null_mut(), || {
        Ok(timestamp_out(arg_ref(item, "item")?.0.due_date))
    })
}

/// Null clears the due date.
///
/// # Safety
/// `item` must be null or a live item handle; `due_date` must be null or
/// readable for the call.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_set_due_date(
    item: *mut RawItem,
    due_date: *const i64,
) -> c_int {
    guard_code("toodle_item_set_due_date", || {
        arg_mut(item, "item")?.0.due_date = timestamp_arg(due_date);
        Ok(())
    })
}

/// Owned completion date, or null when unset.
///
/// # Safety
/// `item` must be null or a live item handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_get_completion_date(item: *const RawItem) -> *mut i64 {
    guard("toodle_item_get_completion_date", std::ptr::null_mut(), || {
        Ok(timestamp_out(arg_ref(item, "item")?.0.completion_date))
    })
}

/// Null clears the completion date.
///
/// # Safety
/// `item` must be null or a live item handle; `completion_date` must be null
/// or readable for the call.
#[no_mangle]
pub unsafe extern "C" fn toodle_item_set_completion_date(
    item: *mut RawItem,
    completion_date: *const i64,
) -> c_int {
    guard_code("toodle_item_set_completion_date", || {
        arg_mut(item, "item")?.0.completion_date = timestamp_arg(completion_date);
        Ok(())
    })
}

/// Resolves packed label handles to ids, checking each was issued by `store`
/// and still exists.
unsafe fn known_label_ids(
    store: &RawStore,
    labels: *const *const RawLabel,
    labels_len: usize,
) -> BoundaryResult<Vec<LabelId>> {
    let handles = handle_array_arg(labels, labels_len, "labels")?;
    let repo = store.labels()?;
    let mut ids = Vec::with_capacity(handles.len());
    for label in handles {
        store.check_owner(label.1, "label", label.0.id)?;
        if repo.get_label(label.0.id)?.is_none() {
            return Err(BoundaryError::not_found("label", label.0.id));
        }
        ids.push(label.0.id);
    }
    Ok(ids)
}
