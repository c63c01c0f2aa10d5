use crate::{API_PREFIX, ResourceId, Timestamp};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Where a resource's ordering is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// `sort`/`dir` are sent to the backend and the page is refetched.
    Server,
    /// The loaded page is re-ordered locally.
    Client,
}

/// Comparable projection of one field, used for client-side ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
    Time(Timestamp),
    Missing,
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Time(_) => 2,
            SortKey::Missing => 3,
        }
    }

    /// Ascending comparison; `Missing` always sorts after present values.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<Option<&Timestamp>> for SortKey {
    fn from(at: Option<&Timestamp>) -> Self {
        at.copied().map(SortKey::Time).unwrap_or(SortKey::Missing)
    }
}

impl From<&str> for SortKey {
    fn from(text: &str) -> Self {
        SortKey::Text(text.to_string())
    }
}

impl From<Option<f64>> for SortKey {
    fn from(n: Option<f64>) -> Self {
        n.map(SortKey::Number).unwrap_or(SortKey::Missing)
    }
}

/// A backend-managed collection (`/api/{PATH}`).
pub trait Resource: DeserializeOwned + Clone + Debug + 'static {
    /// Path segment under `/api`, e.g. `room-types`.
    const PATH: &'static str;
    /// Singular human name used in messages.
    const NAME: &'static str;
    /// Query keys the backend accepts as list filters.
    const FILTER_KEYS: &'static [&'static str] = &[];
    /// Fields that may be passed to sorting.
    const SORTABLE: &'static [&'static str] = &[];
    const SORT_MODE: SortMode = SortMode::Client;
    /// Body key used when flipping the active flag; `None` for resources
    /// whose state is a status enum.
    const ACTIVE_FIELD: Option<&'static str> = None;

    fn id(&self) -> &ResourceId;

    /// Short label for confirmations and headings.
    fn title(&self) -> String;

    /// Current value of the binary active flag, if the resource has one.
    fn active_flag(&self) -> Option<bool> {
        None
    }

    fn sort_key(&self, _field: &str) -> SortKey {
        SortKey::Missing
    }

    fn collection_path() -> String {
        format!("{}/{}", API_PREFIX, Self::PATH)
    }

    fn item_path(id: &ResourceId) -> String {
        format!("{}/{}/{}", API_PREFIX, Self::PATH, id)
    }

    fn is_toggleable() -> bool {
        Self::ACTIVE_FIELD.is_some()
    }
}

// =========================================================
// Envelopes
// =========================================================

/// `GET /api/{resource}` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, rename = "totalPages", alias = "total_pages")]
    pub total_pages: Option<u32>,
}

impl<T> PageEnvelope<T> {
    /// Resolves pagination metadata. Server values are trusted when present;
    /// missing ones fall back to the requested page and `ceil(total / size)`.
    pub fn into_page(self, requested_page: u32, page_size: u32) -> PageResult<T> {
        let total_count = self.total.unwrap_or(self.data.len() as u64);
        let total_pages = self
            .total_pages
            .filter(|n| *n > 0)
            .unwrap_or_else(|| PageResult::<T>::total_pages_for(total_count, page_size));
        let current_page = self.page.filter(|p| *p > 0).unwrap_or(requested_page.max(1));
        PageResult {
            items: self.data,
            total_count,
            current_page,
            total_pages,
        }
    }
}

/// `GET /api/{resource}/{id}` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// One page of a collection plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    /// `ceil(total / page_size)`, never below 1 so an empty list still has a page.
    pub fn total_pages_for(total: u64, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        let pages = total.div_ceil(size);
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_page(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_pages_when_server_omits_them() {
        let env: PageEnvelope<u32> =
            serde_json::from_str(r#"{"data":[1,2,3,4,5,6,7,8,9,10],"total":25}"#).unwrap();
        let page = env.into_page(1, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn trusts_server_pagination() {
        let env: PageEnvelope<u32> =
            serde_json::from_str(r#"{"data":[],"total":25,"page":2,"totalPages":7}"#).unwrap();
        let page = env.into_page(1, 10);
        assert_eq!(page.total_pages, 7);
        assert_eq!(page.current_page, 2);
    }

    #[test]
    fn empty_collection_has_one_page() {
        assert_eq!(PageResult::<()>::total_pages_for(0, 10), 1);
        assert_eq!(PageResult::<()>::total_pages_for(10, 10), 1);
        assert_eq!(PageResult::<()>::total_pages_for(11, 10), 2);
    }

    #[test]
    fn missing_sorts_last() {
        let mut keys = vec![SortKey::Missing, SortKey::Number(3.0), SortKey::Number(1.0)];
        keys.sort_by(|a, b| a.compare(b));
        assert_eq!(keys, vec![SortKey::Number(1.0), SortKey::Number(3.0), SortKey::Missing]);
    }
}
