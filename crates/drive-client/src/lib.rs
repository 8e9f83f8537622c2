//! Drive Client
//!
//! Read-only access to a remote folder hierarchy. The Google Drive backend
//! authenticates with a service account; the in-memory backend stands in for
//! it in tests.

pub mod client;
pub mod credentials;
pub mod hierarchy;
pub mod memory;

pub use client::{DriveClient, DriveConnector, DEFAULT_DRIVE_API_URL};
pub use credentials::{ServiceAccountKey, TokenSource};
pub use hierarchy::{ChildQuery, EntryKind, HierarchyClient, HierarchyConnector};
pub use memory::InMemoryHierarchy;
