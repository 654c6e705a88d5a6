use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),
    #[error("sheet not found: {0}")]
    NotFound(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetEntry {
    pub name: String,
    pub size: u64,
}

/// Synchronous persistence scoped to one fixed sheet directory.
/// `name` is the bare sheet name; any extension is the adapter's concern.
pub trait StoragePort: Send + Sync {
    fn list_sheets(&self) -> Result<Vec<SheetEntry>, StorageError>;
    fn read_sheet(&self, name: &str) -> Result<String, StorageError>;
    fn write_sheet(&self, name: &str, contents: &str) -> Result<(), StorageError>;
}
