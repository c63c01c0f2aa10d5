//! List-resource controller
//!
//! One generic state machine drives every list page. Query changes hand out a
//! [`FetchTicket`]; the caller runs the request and reports the outcome with
//! [`ListController::complete_fetch`]. Only the most recently issued ticket is
//! applied, so a slow response can never overwrite a newer one.
//!
//! [`ListController::load`] and the other async drivers chain both halves for
//! callers that own the controller outright.

use fscape_admin_shared::{PageResult, Resource, ResourceId, SortKey, SortMode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::dialog::{ConfirmedDelete, ConfirmedToggle};
use crate::error::ResourceError;
use crate::query::{ActivityFilter, ListRequest, QueryState, SortDirection, SortState};
use crate::request::HttpTransport;

/// Where the current page is in its fetch cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A ticket is out; [`ListController::items`] keeps the previous rows.
    Loading,
    Loaded(PageResult<T>),
    /// Message of the failed fetch, shown next to a retry button.
    Errored(String),
}

/// A list request the controller is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Issue order; only the latest seq is applied.
    seq: u64,
    request: ListRequest,
}

impl FetchTicket {
    /// Position of this ticket in issue order.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The request to run for this ticket.
    pub fn request(&self) -> &ListRequest {
        &self.request
    }
}

/// Query state, load state and sequencing for one resource's list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListController<T> {
    query: QueryState,
    state: LoadState<T>,
    /// Last successfully applied page, kept on screen while reloading.
    last_page: Option<PageResult<T>>,
    /// Seq of the most recently issued ticket.
    issued: u64,
}

impl<T: Resource> ListController<T> {
    /// An `Idle` controller on page 1 with no search, filters or sort.
    pub fn new(page_size: u32) -> Self {
        Self {
            query: QueryState::new(page_size),
            state: LoadState::Idle,
            last_page: None,
            issued: 0,
        }
    }

    // =========================================================
    // Reads
    // =========================================================

    /// Search, filters, sort and page as last set.
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// `true` while a ticket is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Message of the last failed fetch, while `Errored`.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Rows to display: the loaded page, or the previous one while reloading.
    pub fn items(&self) -> &[T] {
        match &self.state {
            LoadState::Loaded(page) => &page.items,
            _ => self.last_page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[]),
        }
    }

    /// 1-based page of the current query.
    pub fn current_page(&self) -> u32 {
        self.query.page()
    }

    /// Page count of the last applied page; 1 before anything loaded.
    pub fn total_pages(&self) -> u32 {
        self.last_page.as_ref().map(|p| p.total_pages).unwrap_or(1)
    }

    /// Matching records across all pages.
    pub fn total_count(&self) -> u64 {
        self.last_page.as_ref().map(|p| p.total_count).unwrap_or(0)
    }

    /// Current active-flag filter; `All` for resources without one.
    pub fn activity(&self) -> ActivityFilter {
        T::ACTIVE_FIELD
            .map(|field| ActivityFilter::from_value(self.query.filter(field)))
            .unwrap_or_default()
    }

    // =========================================================
    // Fetch lifecycle
    // =========================================================

    /// Enters `Loading` for the current query.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        let request = self.query.to_request(T::SORT_MODE);
        debug!(resource = T::NAME, seq = self.issued, page = request.page, "fetch issued");
        FetchTicket {
            seq: self.issued,
            request,
        }
    }

    /// Applies a response. Returns `false` when `ticket` is stale and the
    /// outcome was dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PageResult<T>, ResourceError>,
    ) -> bool {
        if ticket.seq != self.issued {
            warn!(
                resource = T::NAME,
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale response"
            );
            return false;
        }

        match outcome {
            Ok(mut page) => {
                if let (SortMode::Client, Some(sort)) = (T::SORT_MODE, self.query.sort()) {
                    sort_items(&mut page.items, sort);
                }
                self.query.set_page(page.current_page);
                self.last_page = Some(page.clone());
                self.state = LoadState::Loaded(page);
            }
            Err(e) => {
                warn!(resource = T::NAME, error = %e, "list fetch failed");
                self.state = LoadState::Errored(e.to_string());
            }
        }
        true
    }

    /// Re-enters `Loading` with the same query after a failure.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        match self.state {
            LoadState::Errored(_) => Some(self.refresh()),
            _ => None,
        }
    }

    // =========================================================
    // Query changes
    // =========================================================

    /// `None` when `text` is already the current search.
    pub fn set_search(&mut self, text: &str) -> Option<FetchTicket> {
        self.query.set_search(text).then(|| self.refresh())
    }

    /// Sets one filter (`None` or `"all"` clears it) and goes back to page 1.
    /// Keys the resource does not declare are rejected.
    pub fn set_filter(&mut self, key: &str, value: Option<String>) -> Result<Option<FetchTicket>, ResourceError> {
        if !T::FILTER_KEYS.iter().any(|k| *k == key) {
            return Err(ResourceError::UnknownFilter {
                resource: T::NAME,
                key: key.to_string(),
            });
        }
        Ok(self.query.set_filter(key, value).then(|| self.refresh()))
    }

    /// Filters on the active flag (all / active / inactive).
    pub fn set_activity(&mut self, activity: ActivityFilter) -> Result<Option<FetchTicket>, ResourceError> {
        let field = T::ACTIVE_FIELD.ok_or(ResourceError::NotToggleable { resource: T::NAME })?;
        self.set_filter(field, activity.value().map(str::to_string))
    }

    /// Client-sorted resources are re-ordered in place and need no request.
    pub fn set_sort(&mut self, field: &str) -> Result<Option<FetchTicket>, ResourceError> {
        if !T::SORTABLE.iter().any(|f| *f == field) {
            return Err(ResourceError::UnsortableField {
                resource: T::NAME,
                field: field.to_string(),
            });
        }
        let sort = self.query.toggle_sort(field).clone();
        match T::SORT_MODE {
            SortMode::Server => Ok(Some(self.refresh())),
            SortMode::Client => {
                if let LoadState::Loaded(page) = &mut self.state {
                    sort_items(&mut page.items, &sort);
                }
                if let Some(page) = &mut self.last_page {
                    sort_items(&mut page.items, &sort);
                }
                Ok(None)
            }
        }
    }

    /// Rejects pages outside `1..=total_pages` without touching the query.
    pub fn set_page(&mut self, page: u32) -> Result<FetchTicket, ResourceError> {
        let total_pages = self.total_pages();
        if page < 1 || page > total_pages {
            return Err(ResourceError::PageOutOfRange {
                requested: page,
                total_pages,
            });
        }
        self.query.set_page(page);
        Ok(self.refresh())
    }

    /// Refetch after a successful delete. Removing the only row of a page
    /// past the first steps back one page.
    pub fn refresh_after_remove(&mut self, removed: &ResourceId) -> FetchTicket {
        let items = self.items();
        let emptied = items.len() == 1 && items[0].id() == removed;
        if emptied && self.query.page() > 1 {
            self.query.set_page(self.query.page() - 1);
        }
        self.refresh()
    }

    // =========================================================
    // Async drivers
    // =========================================================

    /// Runs `ticket` and applies its outcome.
    pub async fn run<H: HttpTransport>(&mut self, client: &ApiClient<H>, ticket: FetchTicket) -> bool {
        let outcome = client.list::<T>(ticket.request()).await;
        self.complete_fetch(ticket, outcome)
    }

    /// Fetches the current query.
    pub async fn load<H: HttpTransport>(&mut self, client: &ApiClient<H>) -> bool {
        let ticket = self.refresh();
        self.run(client, ticket).await
    }

    /// POSTs `payload`, then refetches the current page.
    pub async fn create<H: HttpTransport, P: Serialize>(
        &mut self,
        client: &ApiClient<H>,
        payload: &P,
    ) -> Result<(), ResourceError> {
        client.create::<T, P>(payload).await?;
        self.load(client).await;
        Ok(())
    }

    /// PUTs `payload` to the record, then refetches the current page.
    pub async fn update<H: HttpTransport, P: Serialize>(
        &mut self,
        client: &ApiClient<H>,
        id: &ResourceId,
        payload: &P,
    ) -> Result<(), ResourceError> {
        client.update::<T, P>(id, payload).await?;
        self.load(client).await;
        Ok(())
    }

    /// Flips the active flag of a confirmed target, then refetches.
    pub async fn toggle_active<H: HttpTransport>(
        &mut self,
        client: &ApiClient<H>,
        confirmed: ConfirmedToggle<T>,
    ) -> Result<(), ResourceError> {
        client
            .set_active::<T>(confirmed.id(), confirmed.next_active())
            .await?;
        self.load(client).await;
        Ok(())
    }

    /// Deletes a confirmed target, then refetches (see
    /// [`Self::refresh_after_remove`]). Failures leave the state untouched.
    pub async fn remove<H: HttpTransport>(
        &mut self,
        client: &ApiClient<H>,
        confirmed: ConfirmedDelete<T>,
    ) -> Result<(), ResourceError> {
        client.remove::<T>(confirmed.id()).await?;
        let ticket = self.refresh_after_remove(confirmed.id());
        self.run(client, ticket).await;
        Ok(())
    }
}

/// Stable sort; rows without a value stay last in either direction.
fn sort_items<T: Resource>(items: &mut [T], sort: &SortState) {
    items.sort_by(|a, b| {
        let (ka, kb) = (a.sort_key(&sort.field), b.sort_key(&sort.field));
        let ord = ka.compare(&kb);
        let missing = matches!(ka, SortKey::Missing) || matches!(kb, SortKey::Missing);
        match sort.direction {
            SortDirection::Desc if !missing => ord.reverse(),
            _ => ord,
        }
    });
}

#[cfg(test)]
mod tests;
