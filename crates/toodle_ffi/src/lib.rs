//! C boundary over the Toodle store.
//!
//! # Responsibility
//! - Expose create/read/update/destroy entry points on opaque pointers.
//! - Translate repository outcomes into stable result codes.
//!
//! # FFI contract
//! - Every pointer returned by a `*_create`, `*_list`, `*_at` or getter call
//!   is owned by the caller and must be passed to the matching `*_destroy`
//!   exactly once.
//! - Entry points never unwind across the boundary; panics are reported as
//!   `ErrorCode::Storage`.
//! - Calls on one `RawStore` must not overlap. The boundary does no locking.
//! - The last failure on the calling thread is readable through
//!   `toodle_last_error_code` / `toodle_last_error_message`.

#[macro_use]
mod handles;
pub mod categories;
pub mod error;
pub mod items;
pub mod labels;
pub mod logins;
pub mod store;
pub mod strings;

pub use categories::{RawCategory, RawCategoryList};
pub use error::{ErrorCode, STATUS_BOUNDARY_FAILURE};
pub use handles::{toodle_debug_live_handles, RawList};
pub use items::{RawItem, RawItemList};
pub use labels::{RawLabel, RawLabelList};
pub use logins::RawLogin;
pub use store::RawStore;
