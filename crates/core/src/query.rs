//! Project filtering and sorting.
//!
//! Pure functions over an owned snapshot of the collection; the store is
//! never touched. Kept in `core` so the same rules apply to any backend
//! that hands back a plain list.

use std::cmp::Ordering;

use serde::Serialize;

use crate::project::Project;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Sort options
// ---------------------------------------------------------------------------

/// Field to order results by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Case-insensitive lexicographic.
    Name,
    CreatedAt,
    #[default]
    LastModified,
}

impl SortBy {
    /// Parse a `sortBy` query value. Unknown values fall back to the default.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "name" => SortBy::Name,
            "createdAt" => SortBy::CreatedAt,
            _ => SortBy::LastModified,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse a `sortOrder` query value. Anything but `asc` means descending.
    pub fn parse_or_default(value: &str) -> Self {
        if value == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A filter and sort specification. All filters are optional and combine
/// with logical AND.
///
/// `status` and `category` hold the raw wire value and compare by exact
/// string equality, so a value no project can carry simply matches nothing.
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive literal substring matched against name, description,
    /// and target URL. Blank means no search filter.
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// Result of running a [`ProjectQuery`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectList {
    pub projects: Vec<Project>,
    pub total_count: usize,
    /// When the query ran. Not a persisted sync marker.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_sync: Timestamp,
}

impl ProjectQuery {
    /// Whether a single project passes every filter.
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status.as_deref() {
            if project.status.as_str() != status {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            if project.metadata.category.map(|c| c.as_str()) != Some(category) {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => matches_search(project, &term),
            None => true,
        }
    }

    /// Filter then sort. The sort is stable, so projects with equal keys
    /// keep their input order in both directions.
    pub fn apply(&self, projects: Vec<Project>) -> Vec<Project> {
        let mut filtered: Vec<Project> = projects.into_iter().filter(|p| self.matches(p)).collect();
        filtered.sort_by(|a, b| {
            let ord = compare(self.sort_by, a, b);
            match self.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        filtered
    }

    /// Run the query and wrap the result with its count and timestamp.
    pub fn run(&self, projects: Vec<Project>, now: Timestamp) -> ProjectList {
        let projects = self.apply(projects);
        ProjectList {
            total_count: projects.len(),
            projects,
            last_sync: now,
        }
    }

    /// Whitespace only decides blankness; the term itself is used as given.
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_lowercase)
    }
}

/// `term` must already be lowercase.
fn matches_search(project: &Project, term: &str) -> bool {
    let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(term));

    contains(Some(project.name.as_str()))
        || contains(project.description.as_deref())
        || contains(project.metadata.target_url.as_deref())
}

fn compare(sort_by: SortBy, a: &Project, b: &Project) -> Ordering {
    match sort_by {
        SortBy::Name => a
            .name
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.name.chars().flat_map(char::to_lowercase)),
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::LastModified => a.last_modified.cmp(&b.last_modified),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
