//! Enumerates the date folders of a project

use chrono::NaiveDate;
use drive_client::{ChildQuery, EntryKind, HierarchyClient};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use witness_common::{ContainerRef, Result};

static DATE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// Whether a folder name is a `YYYY-MM-DD` calendar date
pub fn is_date_name(name: &str) -> bool {
    DATE_NAME.is_match(name) && NaiveDate::parse_from_str(name, "%Y-%m-%d").is_ok()
}

/// Keep valid date names and sort them ascending
///
/// Lexicographic order equals chronological order for this fixed format.
pub fn filter_date_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut dates: Vec<String> = names
        .into_iter()
        .map(Into::into)
        .filter(|name| {
            let keep = is_date_name(name);
            if !keep {
                debug!("Skipping non-date folder: {}", name);
            }
            keep
        })
        .collect();

    dates.sort();
    dates
}

/// List the date folders under a resolved project folder
pub async fn list_dates(client: &dyn HierarchyClient, project: &ContainerRef) -> Result<Vec<String>> {
    let query = ChildQuery::children_of(project.id.clone()).of_kind(EntryKind::Folder);
    let folders = client.list_children(&query).await?;

    Ok(filter_date_names(folders.into_iter().map(|folder| folder.name)))
}
