//! List request parameters and results

use crate::filters::ListFilters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sort column used when the requested one is missing or unknown.
pub const DEFAULT_SORT_BY: &str = "created_at";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Unknown input falls back to `desc` instead of failing.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Returns `raw` if it names an allowed column, otherwise [`DEFAULT_SORT_BY`].
pub fn normalize_sort_by(allowed: &[&str], raw: &str) -> String {
    let raw = raw.trim();
    if allowed.contains(&raw) {
        raw.to_string()
    } else {
        DEFAULT_SORT_BY.to_string()
    }
}

/// Complete description of the page of data wanted right now.
///
/// Two structurally equal values describe the same request; [`request_key`]
/// is the deterministic serialization used to detect that.
///
/// [`request_key`]: FetchListParams::request_key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchListParams<F> {
    pub query: String,
    pub filters: F,
    pub sort_by: String,
    pub sort_direction: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page. Sent so the server pages the same way the strip counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl<F: ListFilters> FetchListParams<F> {
    pub fn new(filters: F) -> Self {
        Self {
            query: String::new(),
            filters,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_direction: SortDirection::default(),
            page: None,
            page_size: None,
        }
    }

    pub fn request_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    /// Query string pairs for `GET /api/<kind>`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("query".to_string(), self.query.clone()),
            (
                "showDeleted".to_string(),
                self.filters.show_deleted().to_string(),
            ),
            ("sortBy".to_string(), self.sort_by.clone()),
            (
                "sortDirection".to_string(),
                self.sort_direction.as_str().to_string(),
            ),
        ];
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }
        pairs.extend(
            self.filters
                .query_pairs()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value)),
        );
        pairs
    }
}

/// One page of rows plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchListResult<E> {
    pub data: Vec<E>,
    pub total_count: u64,
}

impl<E> FetchListResult<E> {
    /// Raises `total_count` to at least `data.len()`.
    pub fn new(data: Vec<E>, total_count: u64) -> Self {
        let total_count = total_count.max(data.len() as u64);
        Self { data, total_count }
    }

    /// Result for a response without a count: the page is the whole set.
    pub fn from_data(data: Vec<E>) -> Self {
        let total_count = data.len() as u64;
        Self { data, total_count }
    }

    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total_count: 0,
        }
    }
}

/// Failure surfaced by a list fetch, already rendered for display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type FetchResult<E> = Result<FetchListResult<E>, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ItemFilters, RoomFilters};

    #[test]
    fn test_sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::parse_or_default("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_or_default("sideways"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default(""), SortDirection::Desc);
    }

    #[test]
    fn test_normalize_sort_by() {
        let allowed = ["name", "created_at"];
        assert_eq!(normalize_sort_by(&allowed, "name"), "name");
        assert_eq!(normalize_sort_by(&allowed, "password"), DEFAULT_SORT_BY);
        assert_eq!(normalize_sort_by(&[], "name"), DEFAULT_SORT_BY);
    }

    #[test]
    fn test_request_key_structural_equality() {
        let a = FetchListParams::new(ItemFilters::default());
        let mut b = FetchListParams::new(ItemFilters::default());
        assert_eq!(a.request_key(), b.request_key());
        assert!(!a.query_pairs().iter().any(|(k, _)| k == "pageSize"));

        b.page = Some(2);
        assert_ne!(a.request_key(), b.request_key());

        let mut c = a.clone();
        c.filters.show_deleted = true;
        assert_ne!(a.request_key(), c.request_key());
    }

    #[test]
    fn test_query_pairs_include_kind_filters() {
        let mut params = FetchListParams::new(RoomFilters {
            show_deleted: true,
            building_id: Some(2),
            has_items: None,
        });
        params.query = "кух".to_string();
        params.page = Some(3);
        params.page_size = Some(25);
        let pairs = params.query_pairs();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("query"), Some("кух"));
        assert_eq!(get("showDeleted"), Some("true"));
        assert_eq!(get("sortBy"), Some("created_at"));
        assert_eq!(get("sortDirection"), Some("desc"));
        assert_eq!(get("page"), Some("3"));
        assert_eq!(get("pageSize"), Some("25"));
        assert_eq!(get("buildingId"), Some("2"));
        assert_eq!(get("hasItems"), None);
    }

    #[test]
    fn test_result_count_never_below_page() {
        let result = FetchListResult::new(vec![1, 2, 3], 1);
        assert_eq!(result.total_count, 3);
        assert_eq!(FetchListResult::from_data(vec![1, 2]).total_count, 2);
        assert_eq!(FetchListResult::<u8>::empty().total_count, 0);
    }
}
