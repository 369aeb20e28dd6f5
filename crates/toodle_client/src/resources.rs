//! Binds each boundary allocation kind to its destroy entry point.

use crate::handle::Resource;
use std::os::raw::c_char;
use toodle_ffi::categories::{
    toodle_category_destroy, toodle_category_list_at, toodle_category_list_count,
    toodle_category_list_destroy,
};
use toodle_ffi::items::{
    toodle_item_destroy, toodle_item_list_at, toodle_item_list_count, toodle_item_list_destroy,
};
use toodle_ffi::labels::{
    toodle_label_destroy, toodle_label_list_at, toodle_label_list_count, toodle_label_list_destroy,
};
use toodle_ffi::logins::toodle_login_destroy;
use toodle_ffi::store::toodle_store_destroy;
use toodle_ffi::strings::{toodle_string_destroy, toodle_timestamp_destroy};
use toodle_ffi::{
    RawCategory, RawCategoryList, RawItem, RawItemList, RawLabel, RawLabelList, RawLogin,
    RawStore,
};

/// A boundary list whose entries are fetched one by one as new handles.
pub(crate) trait ListResource: Resource {
    type Entry: Resource;

    /// # Safety
    /// `list` must be a live list handle.
    unsafe fn count(list: *const Self) -> usize;

    /// # Safety
    /// `list` must be a live list handle.
    unsafe fn at(list: *const Self, index: usize) -> *mut Self::Entry;
}

macro_rules! resource {
    ($raw:ty, $kind:literal, $destroy:path) => {
        impl Resource for $raw {
            const KIND: &'static str = $kind;

            unsafe fn release(raw: *mut Self) {
                $destroy(raw)
            }
        }
    };
}

macro_rules! list_resource {
    ($list:ty, $entry:ty, $kind:literal, $count:path, $at:path, $destroy:path) => {
        resource!($list, $kind, $destroy);

        impl ListResource for $list {
            type Entry = $entry;

            unsafe fn count(list: *const Self) -> usize {
                $count(list)
            }

            unsafe fn at(list: *const Self, index: usize) -> *mut Self::Entry {
                $at(list, index)
            }
        }
    };
}

resource!(RawStore, "store", toodle_store_destroy);
resource!(RawCategory, "category", toodle_category_destroy);
resource!(RawItem, "item", toodle_item_destroy);
resource!(RawLabel, "label", toodle_label_destroy);
resource!(RawLogin, "login", toodle_login_destroy);
resource!(c_char, "string", toodle_string_destroy);
resource!(i64, "timestamp", toodle_timestamp_destroy);

list_resource!(
    RawCategoryList,
    RawCategory,
    "category list",
    toodle_category_list_count,
    toodle_category_list_at,
    toodle_category_list_destroy
);
list_resource!(
    RawItemList,
    RawItem,
    "item list",
    toodle_item_list_count,
    toodle_item_list_at,
    toodle_item_list_destroy
);
list_resource!(
    RawLabelList,
    RawLabel,
    "label list",
    toodle_label_list_count,
    toodle_label_list_at,
    toodle_label_list_destroy
);
