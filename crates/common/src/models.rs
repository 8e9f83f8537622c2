use serde::{Deserialize, Serialize};

/// A node in the remote storage hierarchy (folder or file)
///
/// Fetched fresh for every request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRef {
    /// Opaque provider identifier
    pub id: String,

    /// Display name as stored by the provider
    pub name: String,
}

impl ContainerRef {
    /// Create a new reference
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
