//! To-do items.

use crate::cache::{Identity, RelationCache};
use crate::codec::{
    scalar, take_list, take_string, take_timestamp, with_c_string, with_optional_timestamp,
};
use crate::entity::label::Label;
use crate::error::{check_write, ClientError, ClientResult};
use crate::handle::{Handle, OwnsHandle};
use crate::store::Store;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::fmt::Display;
use toodle_ffi::items::{
    toodle_item_get_completion_date, toodle_item_get_created_at, toodle_item_get_due_date,
    toodle_item_get_name, toodle_item_get_uuid, toodle_item_labels,
    toodle_item_set_completion_date, toodle_item_set_due_date, toodle_item_set_name,
};
use toodle_ffi::RawItem;
use uuid::Uuid;

/// `strftime` pattern for due dates, e.g. `2023-11-14T22:13:20.000+0000`.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

#[derive(Debug)]
pub struct Item {
    handle: Handle<RawItem>,
    labels: RelationCache<Label>,
}

impl Item {
    pub(crate) fn from_handle(handle: Handle<RawItem>) -> Self {
        Self {
            handle,
            labels: RelationCache::default(),
        }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut RawItem {
        self.handle.as_mut_ptr()
    }

    pub fn uuid(&self) -> ClientResult<Uuid> {
        // SAFETY: the handle is live for as long as `self`.
        let text = unsafe { take_string(toodle_item_get_uuid(self.handle.as_ptr()), "item uuid") }?;
        Uuid::parse_str(&text)
            .map_err(|err| ClientError::CorruptData(format!("item uuid `{text}`: {err}")))
    }

    pub fn name(&self) -> ClientResult<String> {
        unsafe { take_string(toodle_item_get_name(self.handle.as_ptr()), "item name") }
    }

    pub fn set_name(&mut self, name: &str) -> ClientResult<()> {
        let raw = self.handle.as_mut_ptr();
        with_c_string(name, "name", |name| {
            check_write(unsafe { toodle_item_set_name(raw, name) }, "item name")
        })
    }

    /// Seconds since the epoch.
    pub fn created_at(&self) -> ClientResult<i64> {
        scalar(
            unsafe { toodle_item_get_created_at(self.handle.as_ptr()) },
            "item created_at",
        )
    }

    pub fn due_date(&self) -> ClientResult<Option<i64>> {
        unsafe { take_timestamp(toodle_item_get_due_date(self.handle.as_ptr()), "item due date") }
    }

    pub fn set_due_date(&mut self, due_date: Option<i64>) -> ClientResult<()> {
        let raw = self.handle.as_mut_ptr();
        with_optional_timestamp(due_date, |due_date| {
            check_write(unsafe { toodle_item_set_due_date(raw, due_date) }, "item due date")
        })
    }

    pub fn completion_date(&self) -> ClientResult<Option<i64>> {
        unsafe {
            take_timestamp(
                toodle_item_get_completion_date(self.handle.as_ptr()),
                "item completion date",
            )
        }
    }

    pub fn set_completion_date(&mut self, completion_date: Option<i64>) -> ClientResult<()> {
        let raw = self.handle.as_mut_ptr();
        with_optional_timestamp(completion_date, |completion_date| {
            check_write(
                unsafe { toodle_item_set_completion_date(raw, completion_date) },
                "item completion date",
            )
        })
    }

    pub fn is_complete(&self) -> ClientResult<bool> {
        Ok(self.completion_date()?.is_some())
    }

    /// Due date rendered in UTC; `None` when unset.
    pub fn due_date_as_string(&self) -> ClientResult<Option<String>> {
        self.due_date()?
            .map(|due_date| format_timestamp(due_date, &Utc))
            .transpose()
    }

    /// Due date rendered at a fixed UTC offset; `None` when unset.
    pub fn due_date_as_string_at(&self, offset: FixedOffset) -> ClientResult<Option<String>> {
        self.due_date()?
            .map(|due_date| format_timestamp(due_date, &offset))
            .transpose()
    }

    /// Labels attached in the store, in attachment order.
    ///
    /// Fetched on first access and served from cache until invalidated.
    pub fn labels(&mut self, store: &Store) -> ClientResult<&[Label]> {
        let handle = &self.handle;
        self.labels.get_or_fetch(|| {
            store.call(|store| {
                let entries = unsafe { take_list(toodle_item_labels(store, handle.as_ptr())) }?;
                Ok(entries.into_iter().map(Label::from_handle).collect())
            })
        })
    }

    /// Forces the next `labels` read to refetch.
    pub fn invalidate_labels(&mut self) {
        self.labels.invalidate();
    }
}

impl OwnsHandle for Item {
    type Raw = RawItem;

    fn handle(&self) -> &Handle<RawItem> {
        &self.handle
    }
}

impl Identity for Item {
    type Key = Uuid;

    fn identity(&self) -> ClientResult<Uuid> {
        self.uuid()
    }
}

fn format_timestamp<Tz>(seconds: i64, zone: &Tz) -> ClientResult<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let instant = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        ClientError::CorruptData(format!("timestamp {seconds} is out of range"))
    })?;
    Ok(instant.with_timezone(zone).format(DUE_DATE_FORMAT).to_string())
}
