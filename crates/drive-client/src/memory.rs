//! In-memory hierarchy used as a test double
//!
//! Simulates the remote folder tree without any network access. Entries are
//! returned in insertion order, standing in for provider listing order.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;
use witness_common::{ContainerRef, Error, Result};

use crate::hierarchy::{ChildQuery, HierarchyClient, HierarchyConnector, FOLDER_MIME_TYPE};

#[derive(Debug, Clone)]
struct Node {
    id: String,
    parent_id: String,
    name: String,
    mime_type: String,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: Vec<Node>,
    fail_with: Option<String>,
    queries: Mutex<Vec<ChildQuery>>,
}

/// A cloneable in-memory folder tree
#[derive(Debug, Clone, Default)]
pub struct InMemoryHierarchy {
    inner: Arc<Inner>,
}

/// Builder for [`InMemoryHierarchy`]
#[derive(Debug, Default)]
pub struct InMemoryHierarchyBuilder {
    nodes: Vec<Node>,
    fail_with: Option<String>,
}

impl InMemoryHierarchyBuilder {
    /// Add a folder under `parent_id`
    pub fn folder(self, parent_id: &str, id: &str, name: &str) -> Self {
        self.entry(parent_id, id, name, FOLDER_MIME_TYPE)
    }

    /// Add a file with an explicit MIME type under `parent_id`
    pub fn file(self, parent_id: &str, id: &str, name: &str, mime_type: &str) -> Self {
        self.entry(parent_id, id, name, mime_type)
    }

    fn entry(mut self, parent_id: &str, id: &str, name: &str, mime_type: &str) -> Self {
        self.nodes.push(Node {
            id: id.to_string(),
            parent_id: parent_id.to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        });
        self
    }

    /// Make every listing fail with a provider error
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn build(self) -> InMemoryHierarchy {
        InMemoryHierarchy {
            inner: Arc::new(Inner {
                nodes: self.nodes,
                fail_with: self.fail_with,
                queries: Mutex::new(Vec::new()),
            }),
        }
    }
}

impl InMemoryHierarchy {
    pub fn builder() -> InMemoryHierarchyBuilder {
        InMemoryHierarchyBuilder::default()
    }

    /// Every query served so far, in order
    pub fn recorded_queries(&self) -> Vec<ChildQuery> {
        self.inner
            .queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HierarchyClient for InMemoryHierarchy {
    async fn list_children(&self, query: &ChildQuery) -> Result<Vec<ContainerRef>> {
        if let Ok(mut queries) = self.inner.queries.lock() {
            queries.push(query.clone());
        }

        if let Some(message) = &self.inner.fail_with {
            return Err(Error::Provider {
                status: 503,
                body: message.clone(),
            });
        }

        let matches: Vec<ContainerRef> = self
            .inner
            .nodes
            .iter()
            .filter(|node| node.parent_id == query.parent_id)
            .filter(|node| query.name.as_ref().map_or(true, |name| &node.name == name))
            .filter(|node| query.kind.map_or(true, |kind| kind.matches(&node.mime_type)))
            .map(|node| ContainerRef::new(node.id.clone(), node.name.clone()))
            .collect();

        debug!(
            "In-memory hierarchy: {} children of {} matched",
            matches.len(),
            query.parent_id
        );

        Ok(matches)
    }
}

#[async_trait]
impl HierarchyConnector for InMemoryHierarchy {
    async fn connect(&self) -> Result<Box<dyn HierarchyClient>> {
        Ok(Box::new(self.clone()))
    }
}
