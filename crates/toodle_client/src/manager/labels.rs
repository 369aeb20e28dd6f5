use crate::codec::{take_list, with_c_string};
use crate::entity::label::Label;
use crate::error::{check_write, ClientResult};
use crate::handle::{Handle, OwnsHandle};
use crate::store::Store;
use log::debug;
use toodle_ffi::labels::{toodle_label_create, toodle_label_list, toodle_label_update};

#[derive(Debug, Clone, Copy)]
pub struct LabelManager<'s> {
    store: &'s Store,
}

impl<'s> LabelManager<'s> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// Creates a label. `color` is `rrggbb` with an optional `#`.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name or malformed color.
    /// - `UpdateFailed` when the name is already taken, ignoring case.
    pub fn create(&self, name: &str, color: &str) -> ClientResult<Label> {
        let handle = with_c_string(name, "name", |name| {
            with_c_string(color, "color", |color| {
                self.store.call(|store| unsafe {
                    Handle::acquire(toodle_label_create(store, name, color))
                })
            })
        })?;
        let label = Label::from_handle(handle);
        debug!("event=label_create module=client status=ok");
        Ok(label)
    }

    pub fn list(&self) -> ClientResult<Vec<Label>> {
        let entries = self
            .store
            .call(|store| unsafe { take_list(toodle_label_list(store)) })?;
        Ok(entries.into_iter().map(Label::from_handle).collect())
    }

    /// Persists the label's current color.
    pub fn update(&self, label: &Label) -> ClientResult<()> {
        let raw = label.handle().as_ptr();
        self.store.call(|store| {
            check_write(unsafe { toodle_label_update(store, raw) }, "label update")
        })
    }
}
