use crate::codec::{take_list, with_c_string, with_handle_array, with_optional_timestamp};
use crate::entity::item::Item;
use crate::entity::label::Label;
use crate::error::{check_write, ClientResult};
use crate::handle::{Handle, OwnsHandle};
use crate::store::Store;
use log::debug;
use std::os::raw::c_char;
use toodle_ffi::items::{toodle_item_create, toodle_item_list, toodle_item_save, toodle_item_update};
use toodle_ffi::RawLabel;

/// Field values for creating or replacing an item.
#[derive(Debug, Clone, Copy)]
pub struct ItemFields<'a> {
    pub name: &'a str,
    pub due_date: Option<i64>,
    pub completion_date: Option<i64>,
    /// Full label set, in attachment order.
    pub labels: &'a [&'a Label],
}

impl<'a> ItemFields<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            due_date: None,
            completion_date: None,
            labels: &[],
        }
    }

    pub fn due_date(mut self, due_date: i64) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn completion_date(mut self, completion_date: i64) -> Self {
        self.completion_date = Some(completion_date);
        self
    }

    pub fn labels(mut self, labels: &'a [&'a Label]) -> Self {
        self.labels = labels;
        self
    }

    /// Runs `call` with every field marshaled for one boundary call.
    fn marshal<T>(
        &self,
        call: impl FnOnce(
            *const c_char,
            *const i64,
            *const i64,
            *const *const RawLabel,
            usize,
        ) -> ClientResult<T>,
    ) -> ClientResult<T> {
        with_c_string(self.name, "name", |name| {
            with_optional_timestamp(self.due_date, |due_date| {
                with_optional_timestamp(self.completion_date, |completion_date| {
                    with_handle_array(self.labels, |labels, labels_len| {
                        call(name, due_date, completion_date, labels, labels_len)
                    })
                })
            })
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ItemManager<'s> {
    store: &'s Store,
}

impl<'s> ItemManager<'s> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// Creates an uncategorized item.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name.
    /// - `NotFound` when a label does not exist in this store; nothing is
    ///   written in that case.
    pub fn create(&self, fields: ItemFields<'_>) -> ClientResult<Item> {
        let handle = fields.marshal(|name, due_date, completion_date, labels, labels_len| {
            self.store.call(|store| unsafe {
                Handle::acquire(toodle_item_create(
                    store,
                    name,
                    due_date,
                    completion_date,
                    labels,
                    labels_len,
                ))
            })
        })?;
        debug!(
            "event=item_create module=client status=ok labels={}",
            fields.labels.len()
        );
        Ok(Item::from_handle(handle))
    }

    /// All items in creation order.
    pub fn list(&self) -> ClientResult<Vec<Item>> {
        let entries = self
            .store
            .call(|store| unsafe { take_list(toodle_item_list(store)) })?;
        Ok(entries.into_iter().map(Item::from_handle).collect())
    }

    /// Replaces the stored name, dates and label set of `item`.
    ///
    /// On success `item` reflects the stored state and its label view is
    /// refetched on next read.
    ///
    /// # Errors
    /// - `UpdateFailed` when the store rejects the write, e.g. the item or a
    ///   label does not exist there.
    pub fn update(&self, item: &mut Item, fields: ItemFields<'_>) -> ClientResult<()> {
        let raw = item.as_mut_ptr();
        let written = fields.marshal(|name, due_date, completion_date, labels, labels_len| {
            self.store.call(|store| {
                check_write(
                    unsafe {
                        toodle_item_update(
                            store,
                            raw,
                            name,
                            due_date,
                            completion_date,
                            labels,
                            labels_len,
                        )
                    },
                    "item update",
                )
            })
        });
        item.invalidate_labels();
        written?;
        debug!(
            "event=item_update module=client status=ok labels={}",
            fields.labels.len()
        );
        Ok(())
    }

    /// Persists the item's current name and dates.
    ///
    /// # Errors
    /// - `UpdateFailed` when the item does not exist in this store.
    pub fn save(&self, item: &Item) -> ClientResult<()> {
        let raw = item.handle().as_ptr();
        self.store
            .call(|store| check_write(unsafe { toodle_item_save(store, raw) }, "item save"))
    }
}
