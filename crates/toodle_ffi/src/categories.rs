//! Category entry points.

use crate::error::{guard, guard_code};
use crate::handles::{arg_mut, arg_ref, mint, reclaim, RawList};
use crate::items::{RawItem, RawItemList};
use crate::store::{RawStore, StoreId};
use crate::strings::{str_arg, text_getter};
use std::os::raw::{c_char, c_int};
use toodle_core::{Category, CategoryRepository, ItemRepository};

/// Owned snapshot of one category and the store that issued it.
pub struct RawCategory(pub(crate) Category, pub(crate) StoreId);

pub type RawCategoryList = RawList<Category>;

list_entry_points!(
    Category,
    RawCategory,
    toodle_category_list_count,
    toodle_category_list_at,
    toodle_category_list_destroy
);

/// All categories in creation order.
///
/// # Safety
/// `store` must be null or a live store handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_category_list(store: *const RawStore) -> *mut RawCategoryList {
    guard("toodle_category_list", std::ptr::null_mut(), || {
        let store = arg_ref(store, "store")?;
        let categories = store.categories()?.list_categories()?;
        Ok(mint(RawList::new(store.id(), categories)))
    })
}

/// Creates a category; null on failure.
///
/// # Safety
/// `store` must be null or a live store handle; `name` must be null or a
/// nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn toodle_category_create(
    store: *const RawStore,
    name: *const c_char,
) -> *mut RawCategory {
    guard("toodle_category_create", std::ptr::null_mut(), || {
        let store = arg_ref(store, "store")?;
        let name = str_arg(name, "name")?;
        let category = store.categories()?.create_category(&name)?;
        Ok(mint(RawCategory(category, store.id())))
    })
}

/// # Safety
/// `category` must be null or a category handle not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn toodle_category_destroy(category: *mut RawCategory) {
    drop(reclaim(category));
}

/// Category id; 0 for a null handle.
///
/// # Safety
/// `category` must be null or a live category handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_category_get_id(category: *const RawCategory) -> i64 {
    guard("toodle_category_get_id", 0, || Ok(arg_ref(category, "category")?.0.id))
}

/// # Safety
/// `category` must be null or a live category handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_category_get_name(category: *const RawCategory) -> *mut c_char {
    text_getter("toodle_category_get_name", category, |category| {
        category.0.name.as_str()
    })
}

/// Items currently filed under `category`, in creation order.
///
/// # Safety
/// `store` must be null or a live store handle with no other call in flight;
/// `category` must be null or a live category handle.
#[no_mangle]
pub unsafe extern "C" fn toodle_category_items(
    store: *mut RawStore,
    category: *const RawCategory,
) -> *mut RawItemList {
    guard("toodle_category_items", std::ptr::null_mut(), || {
        let store = arg_mut(store, "store")?;
        let category = arg_ref(category, "category")?;
        store.check_owner(category.1, "category", category.0.id)?;
        let owner = store.id();
        let items = store.items()?.list_items_in_category(category.0.id)?;
        Ok(mint(RawList::new(owner, items)))
    })
}

/// Files `item` under `category`, moving it out of any previous category.
///
/// The item handle is updated to reflect the new membership. Handles from
/// another store report `NotFound`.
///
/// # Safety
/// `store` must be null or a live store handle with no other call in flight;
/// `category` and `item` must be null or live handles.
#[no_mangle]
pub unsafe extern "C" fn toodle_category_add_item(
    store: *mut RawStore,
    category: *const RawCategory,
    item: *mut RawItem,
) -> c_int {
    guard_code("toodle_category_add_item", || {
        let store = arg_mut(store, "store")?;
        let category = arg_ref(category, "category")?;
        let item = arg_mut(item, "item")?;
        store.check_owner(category.1, "category", category.0.id)?;
        store.check_owner(item.1, "item", item.0.uuid)?;
        store
            .items()?
            .set_item_category(item.0.uuid, category.0.id)?;
        item.0.category_id = Some(category.0.id);
        Ok(())
    })
}
