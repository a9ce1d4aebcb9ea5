use std::path::Path;
use std::sync::Arc;
use nb_core::{ContactStorage, Error, Result};

pub mod backends;

pub use backends::*;

/// The storage backends selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Json,
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" | "file" => Ok(Self::Json),
            "memory" => Ok(Self::Memory),
            other => Err(Error::InvalidInput(format!(
                "Unknown storage backend: {}. Available backends: json, memory",
                other
            ))),
        }
    }
}

pub fn create_storage(kind: StorageKind, path: &Path) -> Arc<dyn ContactStorage> {
    match kind {
        StorageKind::Json => Arc::new(JsonFileStorage::new(path)),
        StorageKind::Memory => Arc::new(InMemoryStorage::new()),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageKind};
    pub use nb_core::ContactStorage;
}
