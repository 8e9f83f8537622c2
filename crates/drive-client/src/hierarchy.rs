//! Hierarchy lookup contract shared by every backend

use async_trait::async_trait;
use witness_common::{ContainerRef, Result};

/// MIME type Google Drive assigns to folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// MIME prefix matched by [`EntryKind::Image`]
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Type filter applied to a child listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Exact match on the folder MIME type
    Folder,

    /// Any MIME type containing `image/`
    Image,
}

impl EntryKind {
    /// Whether a MIME type satisfies this filter
    pub fn matches(&self, mime_type: &str) -> bool {
        match self {
            EntryKind::Folder => mime_type == FOLDER_MIME_TYPE,
            EntryKind::Image => mime_type.contains(IMAGE_MIME_PREFIX),
        }
    }
}

/// A filtered request for the direct children of one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildQuery {
    pub parent_id: String,
    pub name: Option<String>,
    pub kind: Option<EntryKind>,
}

impl ChildQuery {
    /// All children of `parent_id`
    pub fn children_of(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            name: None,
            kind: None,
        }
    }

    /// Only children whose name equals `name` exactly
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Only children of the given kind
    pub fn of_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Read-only view of a remote folder tree
///
/// Results come back in provider order, which this crate does not control.
/// Implementations never retry.
#[async_trait]
pub trait HierarchyClient: Send + Sync {
    /// List the direct children of a container matching `query`
    async fn list_children(&self, query: &ChildQuery) -> Result<Vec<ContainerRef>>;
}

/// Opens an authenticated [`HierarchyClient`] for the lifetime of one request
#[async_trait]
pub trait HierarchyConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn HierarchyClient>>;
}
