pub mod file;
pub mod memory;
pub mod projects;

use async_trait::async_trait;
use serde_json::Value;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use projects::ProjectStore;

/// Key under which every project record is stored as one JSON array.
pub const PROJECTS_KEY: &str = "admin_projects";

/// Key holding the operator's session flag.
pub const SESSION_KEY: &str = "admin_authenticated";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    InvalidKey(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "Storage I/O error: {err}"),
            StoreError::Serde(err) => write!(f, "Stored value is not valid JSON: {err}"),
            StoreError::InvalidKey(key) => write!(f, "Invalid storage key: {key}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err)
    }
}

/// Flat JSON key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
