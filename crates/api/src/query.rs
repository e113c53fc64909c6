//! Query parameter types for API handlers.

use agrega_core::query::{ProjectQuery, SortBy, SortOrder};
use serde::Deserialize;

/// Raw `GET /projects` parameters
/// (`?status=&category=&search=&sortBy=&sortOrder=`).
///
/// Kept as strings so empty values can mean "not set" and so an unknown
/// filter value narrows the result instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ProjectListParams {
    /// Convert into a [`ProjectQuery`].
    ///
    /// Filter values pass through untouched, so an unknown `status` or
    /// `category` yields an empty list. Unknown sort options fall back to
    /// `lastModified` / `desc`.
    pub fn into_query(self) -> ProjectQuery {
        ProjectQuery {
            status: non_blank(self.status),
            category: non_blank(self.category),
            search: non_blank(self.search),
            sort_by: non_blank(self.sort_by)
                .map(|s| SortBy::parse_or_default(&s))
                .unwrap_or_default(),
            sort_order: non_blank(self.sort_order)
                .map(|s| SortOrder::parse_or_default(&s))
                .unwrap_or_default(),
        }
    }
}

/// Drop whitespace-only values; anything else is kept as sent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
