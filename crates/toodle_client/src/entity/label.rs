use crate::cache::Identity;
use crate::codec::{scalar, take_string, with_c_string};
use crate::error::{check_write, ClientResult};
use crate::handle::{Handle, OwnsHandle};
use toodle_ffi::labels::{
    toodle_label_get_color, toodle_label_get_id, toodle_label_get_name, toodle_label_set_color,
};
use toodle_ffi::RawLabel;

/// A named color tag attachable to items.
#[derive(Debug)]
pub struct Label {
    handle: Handle<RawLabel>,
}

impl Label {
    pub(crate) fn from_handle(handle: Handle<RawLabel>) -> Self {
        Self { handle }
    }

    pub fn id(&self) -> ClientResult<i64> {
        // SAFETY: the handle is live for as long as `self`.
        scalar(unsafe { toodle_label_get_id(self.handle.as_ptr()) }, "label id")
    }

    pub fn name(&self) -> ClientResult<String> {
        unsafe { take_string(toodle_label_get_name(self.handle.as_ptr()), "label name") }
    }

    /// `#rrggbb`, lowercase.
    pub fn color(&self) -> ClientResult<String> {
        unsafe { take_string(toodle_label_get_color(self.handle.as_ptr()), "label color") }
    }

    /// Accepts `rrggbb` with or without `#`; anything else is
    /// `InvalidArgument` and leaves the color unchanged.
    pub fn set_color(&mut self, color: &str) -> ClientResult<()> {
        let raw = self.handle.as_mut_ptr();
        with_c_string(color, "color", |color| {
            check_write(unsafe { toodle_label_set_color(raw, color) }, "label color")
        })
    }
}

impl OwnsHandle for Label {
    type Raw = RawLabel;

    fn handle(&self) -> &Handle<RawLabel> {
        &self.handle
    }
}

impl Identity for Label {
    type Key = i64;

    fn identity(&self) -> ClientResult<i64> {
        self.id()
    }
}
