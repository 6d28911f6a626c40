use serde::{Deserialize, Serialize};

/// One object as reported by a storage listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Full object key, including any prefix.
    pub key: String,
    /// Byte length reported by storage.
    pub size: i64,
}

impl StoredObject {
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}
