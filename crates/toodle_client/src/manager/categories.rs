use crate::codec::{take_list, with_c_string};
use crate::entity::category::Category;
use crate::error::ClientResult;
use crate::handle::Handle;
use crate::store::Store;
use log::debug;
use toodle_ffi::categories::{toodle_category_create, toodle_category_list};

#[derive(Debug, Clone, Copy)]
pub struct CategoryManager<'s> {
    store: &'s Store,
}

impl<'s> CategoryManager<'s> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Self { store }
    }

    pub fn create(&self, name: &str) -> ClientResult<Category> {
        let handle = with_c_string(name, "name", |name| {
            self.store
                .call(|store| unsafe { Handle::acquire(toodle_category_create(store, name)) })
        })?;
        let category = Category::from_handle(handle);
        debug!("event=category_create module=client status=ok");
        Ok(category)
    }

    /// All categories in creation order, the seeded "To Do" first.
    pub fn list(&self) -> ClientResult<Vec<Category>> {
        let entries = self
            .store
            .call(|store| unsafe { take_list(toodle_category_list(store)) })?;
        Ok(entries.into_iter().map(Category::from_handle).collect())
    }
}
