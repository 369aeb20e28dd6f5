//! Store location resolution.

use crate::error::{ClientError, ClientResult};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the store path.
pub const DB_PATH_ENV: &str = "TOODLE_DB_PATH";
/// File name of the store inside the documents directory.
pub const STORE_FILE_NAME: &str = "todolist.db";

const MEMORY_URI: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
}

impl StoreConfig {
    /// `TOODLE_DB_PATH` if set, else `<documents_dir>/todolist.db`, else an
    /// in-memory store.
    pub fn from_env(documents_dir: Option<&Path>) -> Self {
        Self::resolve(std::env::var(DB_PATH_ENV).ok(), documents_dir)
    }

    pub fn in_documents_dir(documents_dir: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File(documents_dir.as_ref().join(STORE_FILE_NAME)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
        }
    }

    fn resolve(path_override: Option<String>, documents_dir: Option<&Path>) -> Self {
        let path_override = path_override
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());
        match (path_override, documents_dir) {
            (Some(path), _) => Self {
                location: StoreLocation::File(PathBuf::from(path)),
            },
            (None, Some(dir)) => Self::in_documents_dir(dir),
            (None, None) => Self::in_memory(),
        }
    }

    /// URI passed to the boundary when opening the store.
    pub fn uri(&self) -> ClientResult<String> {
        match &self.location {
            StoreLocation::Memory => Ok(MEMORY_URI.to_string()),
            StoreLocation::File(path) => path.to_str().map(str::to_owned).ok_or_else(|| {
                ClientError::InvalidArgument(format!(
                    "store path `{}` is not valid UTF-8",
                    path.display()
                ))
            }),
        }
    }
}
