//! Typed domain layer over the Toodle C boundary.
//!
//! # Responsibility
//! - Own every boundary handle and release it exactly once.
//! - Marshal text, timestamps and handle collections across the boundary.
//! - Serve cached relation views that never outlive an invalidating write.
//!
//! # Invariants
//! - No boundary pointer escapes this crate; callers only see entities.
//! - All calls that take the root store go through `Store`'s lock.
//!
//! # See also
//! - `toodle_ffi` for the entry-point contract.

pub mod cache;
mod codec;
pub mod config;
pub mod entity;
pub mod error;
pub mod handle;
pub mod manager;
mod resources;
pub mod store;

pub use cache::{Identity, RelationCache};
pub use config::{StoreConfig, StoreLocation, DB_PATH_ENV, STORE_FILE_NAME};
pub use entity::category::Category;
pub use entity::item::{Item, DUE_DATE_FORMAT};
pub use entity::label::Label;
pub use entity::login::{Login, LoginStatus};
pub use error::{ClientError, ClientResult};
pub use handle::{Handle, OwnsHandle, Resource};
pub use manager::categories::CategoryManager;
pub use manager::items::{ItemFields, ItemManager};
pub use manager::labels::LabelManager;
pub use manager::logins::LoginManager;
pub use store::Store;
pub use toodle_core::{default_log_level, init_logging};
