//! Resolves project and date names to folders in the remote hierarchy
//!
//! Each level is a single filtered lookup: name equals the target and the
//! entry is a folder. When the provider returns several matches the first one
//! wins; uniqueness is not enforced here.

use drive_client::{ChildQuery, EntryKind, HierarchyClient};
use thiserror::Error;
use tracing::{debug, warn};
use witness_common::ContainerRef;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Project folder not found")]
    ProjectNotFound,

    #[error("Date folder not found")]
    DateNotFound,

    #[error(transparent)]
    Remote(#[from] witness_common::Error),
}

async fn first_folder_named(
    client: &dyn HierarchyClient,
    parent_id: &str,
    name: &str,
) -> witness_common::Result<Option<ContainerRef>> {
    let query = ChildQuery::children_of(parent_id)
        .named(name)
        .of_kind(EntryKind::Folder);

    let mut matches = client.list_children(&query).await?;
    if matches.len() > 1 {
        debug!(
            "{} folders named '{}' under {}, using the first",
            matches.len(),
            name,
            parent_id
        );
    }

    Ok(if matches.is_empty() {
        None
    } else {
        Some(matches.swap_remove(0))
    })
}

/// Find the project folder directly under the root container
pub async fn resolve_project(
    client: &dyn HierarchyClient,
    root_id: &str,
    project: &str,
) -> Result<ContainerRef, ResolveError> {
    match first_folder_named(client, root_id, project).await? {
        Some(folder) => Ok(folder),
        None => {
            warn!("Project folder not found: {}", project);
            Err(ResolveError::ProjectNotFound)
        }
    }
}

/// Find a date folder directly under a resolved project folder
pub async fn resolve_date(
    client: &dyn HierarchyClient,
    project: &ContainerRef,
    date: &str,
) -> Result<ContainerRef, ResolveError> {
    match first_folder_named(client, &project.id, date).await? {
        Some(folder) => Ok(folder),
        None => {
            warn!("Date folder not found: {}/{}", project.name, date);
            Err(ResolveError::DateNotFound)
        }
    }
}
