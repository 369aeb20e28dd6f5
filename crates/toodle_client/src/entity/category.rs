use crate::cache::{Identity, RelationCache};
use crate::codec::{scalar, take_list, take_string};
use crate::entity::item::Item;
use crate::error::{check_write, ClientResult};
use crate::handle::{Handle, OwnsHandle};
use crate::store::Store;
use log::debug;
use toodle_ffi::categories::{
    toodle_category_add_item, toodle_category_get_id, toodle_category_get_name,
    toodle_category_items,
};
use toodle_ffi::RawCategory;

/// A named group of items. An item belongs to at most one category.
#[derive(Debug)]
pub struct Category {
    handle: Handle<RawCategory>,
    items: RelationCache<Item>,
}

impl Category {
    pub(crate) fn from_handle(handle: Handle<RawCategory>) -> Self {
        Self {
            handle,
            items: RelationCache::default(),
        }
    }

    pub fn id(&self) -> ClientResult<i64> {
        // SAFETY: the handle is live for as long as `self`.
        scalar(unsafe { toodle_category_get_id(self.handle.as_ptr()) }, "category id")
    }

    pub fn name(&self) -> ClientResult<String> {
        unsafe { take_string(toodle_category_get_name(self.handle.as_ptr()), "category name") }
    }

    /// Items filed under this category, in creation order.
    ///
    /// Fetched on first access and served from cache until a membership
    /// change made through this category, or `invalidate_items`.
    pub fn items(&mut self, store: &Store) -> ClientResult<&[Item]> {
        let handle = &self.handle;
        self.items.get_or_fetch(|| {
            store.call(|store| {
                let entries = unsafe { take_list(toodle_category_items(store, handle.as_ptr())) }?;
                Ok(entries.into_iter().map(Item::from_handle).collect())
            })
        })
    }

    /// Files `item` under this category, moving it out of any other.
    ///
    /// The cached item list is invalidated whether or not the write lands.
    pub fn add_item(&mut self, store: &Store, item: &mut Item) -> ClientResult<()> {
        let category = self.handle.as_ptr();
        let item_raw = item.as_mut_ptr();
        let written = store.call(|store| {
            check_write(
                unsafe { toodle_category_add_item(store, category, item_raw) },
                "category add item",
            )
        });
        self.items.invalidate();
        written?;
        debug!("event=category_add_item module=client status=ok");
        Ok(())
    }

    pub fn invalidate_items(&mut self) {
        self.items.invalidate();
    }
}

impl OwnsHandle for Category {
    type Raw = RawCategory;

    fn handle(&self) -> &Handle<RawCategory> {
        &self.handle
    }
}

impl Identity for Category {
    type Key = i64;

    fn identity(&self) -> ClientResult<i64> {
        self.id()
    }
}
