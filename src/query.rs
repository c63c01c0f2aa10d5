//! List query state and the request derived from it.

use std::collections::BTreeMap;

use fscape_admin_shared::SortMode;

use crate::client::QueryParams;

/// Filter value meaning "no filter".
pub const ALL_FILTER_VALUE: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

/// Tri-state view over a binary active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActivityFilter {
    pub const ALL: [ActivityFilter; 3] = [
        ActivityFilter::All,
        ActivityFilter::Active,
        ActivityFilter::Inactive,
    ];

    /// Query value sent to the backend; `None` for [`ActivityFilter::All`].
    pub fn value(&self) -> Option<&'static str> {
        match self {
            ActivityFilter::All => None,
            ActivityFilter::Active => Some("true"),
            ActivityFilter::Inactive => Some("false"),
        }
    }

    pub fn from_value(raw: Option<&str>) -> Self {
        match raw {
            Some("true") => ActivityFilter::Active,
            Some("false") => ActivityFilter::Inactive,
            _ => ActivityFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityFilter::All => "All",
            ActivityFilter::Active => "Active",
            ActivityFilter::Inactive => "Inactive",
        }
    }
}

/// `None`, blank and `"all"` all mean "unfiltered".
pub fn normalize_filter(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != ALL_FILTER_VALUE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    search: String,
    filters: BTreeMap<String, String>,
    sort: Option<SortState>,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Stores the trimmed text. Returns `false` when it equals the current
    /// search, so surrounding whitespace never triggers a refetch.
    pub fn set_search(&mut self, text: &str) -> bool {
        let text = text.trim();
        if self.search == text {
            return false;
        }
        self.search = text.to_string();
        self.page = 1;
        true
    }

    /// Returns `false` when the normalised value is already applied.
    pub fn set_filter(&mut self, key: &str, value: Option<String>) -> bool {
        let value = normalize_filter(value);
        if self.filters.get(key) == value.as_ref() {
            return false;
        }
        match value {
            Some(v) => self.filters.insert(key.to_string(), v),
            None => self.filters.remove(key),
        };
        self.page = 1;
        true
    }

    /// Same field flips the direction; a new field starts ascending.
    pub fn toggle_sort(&mut self, field: &str) -> &SortState {
        let direction = match &self.sort {
            Some(current) if current.field == field => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.sort.insert(SortState {
            field: field.to_string(),
            direction,
        })
    }

    /// Bounds are checked by the caller against the loaded page count.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn to_request(&self, sort_mode: SortMode) -> ListRequest {
        let mut params = QueryParams::new();
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search".into(), search.to_string()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.clone()));
        }
        if let (SortMode::Server, Some(sort)) = (sort_mode, &self.sort) {
            params.push(("sort".into(), sort.field.clone()));
            params.push(("dir".into(), sort.direction.as_str().into()));
        }
        ListRequest {
            page: self.page,
            limit: self.page_size,
            params,
        }
    }
}

/// One list fetch: `page`, `limit` and the optional parameters after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub page: u32,
    pub limit: u32,
    pub params: QueryParams,
}

impl ListRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            params: QueryParams::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        query.extend(self.params.iter().cloned());
        query
    }
}
