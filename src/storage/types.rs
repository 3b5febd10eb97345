use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for the stored journal document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Key the document is stored under
    pub key: String,
    /// When the record was first written
    pub created_at: DateTime<Utc>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
    /// Size of the stored JSON in bytes
    pub size_bytes: usize,
}
