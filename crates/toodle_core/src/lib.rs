//! Storage engine for Toodle.
//! Owns the SQLite schema, record models and repositories that sit behind
//! the C boundary exposed by `toodle_ffi`.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::item::{Item, ItemId};
pub use model::label::{normalize_color, Label, LabelId};
pub use model::login::{Login, LoginId, LoginStatus};
pub use model::ModelValidationError;
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::label_repo::{LabelRepository, SqliteLabelRepository};
pub use repo::login_repo::{LoginRepository, SqliteLoginRepository};
pub use repo::{RepoError, RepoResult};
pub use service::login_service::LoginService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
