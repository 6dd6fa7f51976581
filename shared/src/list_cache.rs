//! Paginated, searchable list of catalog entries for one visit of the list
//! screen.
//!
//! Pages are appended to `accumulated` strictly in fetch order. A search
//! freezes a snapshot of `accumulated` on its first keystroke and filters that
//! snapshot until the query is cleared again. Pages that land while a search
//! is active are appended to `accumulated` but stay invisible to the running
//! search; they show up once the query is cleared.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::capitalize;
use crate::catalog::{CatalogEntry, CatalogError, FetchOutcome, PageResult, RequestId};
use crate::config::ValidatedConfig;

/// The list renders as a grid with this many entries per row.
pub const ENTRIES_PER_ROW: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub display_name: String,
    pub image_url: String,
    pub id: u32,
}

impl ListItem {
    pub fn from_entry(entry: &CatalogEntry, config: &ValidatedConfig) -> Result<Self, CatalogError> {
        let id = extract_trailing_id(&entry.source_url).ok_or_else(|| CatalogError::MissingId {
            url: entry.source_url.clone(),
        })?;

        Ok(Self {
            display_name: capitalize(&entry.name),
            image_url: config.image_url(id),
            id,
        })
    }

    fn matches(&self, query: &str) -> bool {
        self.display_name.to_lowercase().contains(&query.to_lowercase())
            || self.id.to_string() == query
    }
}

/// Strips trailing slashes, then parses the trailing run of ASCII digits.
pub fn extract_trailing_id(source_url: &str) -> Option<u32> {
    let trimmed = source_url.trim_end_matches('/');
    let digits_start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    trimmed[digits_start..].parse().ok()
}

/// Page request handed out by [`ListState::begin_page_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub request: RequestId,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page_size: u32,
    accumulated: Vec<ListItem>,
    cached_snapshot: Vec<ListItem>,
    filtered: Vec<ListItem>,
    current_page: u32,
    end_reached: bool,
    is_searching: bool,
    is_search_starting: bool,
    in_flight: Option<RequestId>,
    load_error: Option<String>,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            accumulated: Vec::new(),
            cached_snapshot: Vec::new(),
            filtered: Vec::new(),
            current_page: 0,
            end_reached: false,
            is_searching: false,
            is_search_starting: true,
            in_flight: None,
            load_error: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn accumulated(&self) -> &[ListItem] {
        &self.accumulated
    }

    pub fn cached_snapshot(&self) -> &[ListItem] {
        &self.cached_snapshot
    }

    /// What the screen shows: the live list, or the filtered snapshot while
    /// searching.
    pub fn displayed(&self) -> &[ListItem] {
        if self.is_searching {
            &self.filtered
        } else {
            &self.accumulated
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn end_reached(&self) -> bool {
        self.end_reached
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.displayed().len().div_ceil(ENTRIES_PER_ROW)
    }

    /// `loadNextPage` guard. Returns `None` (and changes nothing) when the end
    /// has been reached or a page is already in flight.
    pub fn begin_page_load(&mut self) -> Option<PageRequest> {
        if self.end_reached {
            debug!(page = self.current_page, "end reached, not loading");
            return None;
        }
        if self.in_flight.is_some() {
            debug!(page = self.current_page, "page already in flight");
            return None;
        }

        let request = RequestId::generate();
        self.in_flight = Some(request);

        Some(PageRequest {
            request,
            limit: self.page_size,
            offset: self.current_page.saturating_mul(self.page_size),
        })
    }

    /// Applies the outcome of the in-flight page request. Outcomes for any
    /// other request are dropped and `false` is returned.
    #[instrument(skip(self, outcome, config), fields(page = self.current_page))]
    pub fn apply_page(
        &mut self,
        request: RequestId,
        outcome: FetchOutcome<PageResult>,
        config: &ValidatedConfig,
    ) -> bool {
        if self.in_flight != Some(request) {
            debug!(%request, "dropping response for a request that is no longer in flight");
            return false;
        }
        self.in_flight = None;

        match outcome {
            FetchOutcome::Success(page) => {
                let mapped: Result<Vec<ListItem>, CatalogError> = page
                    .items
                    .iter()
                    .map(|entry| ListItem::from_entry(entry, config))
                    .collect();

                match mapped {
                    Ok(items) => {
                        let added = items.len();
                        self.accumulated.extend(items);
                        self.end_reached = u64::from(self.current_page) * u64::from(self.page_size)
                            >= u64::from(page.total_count);
                        self.current_page += 1;
                        self.load_error = None;
                        info!(
                            added,
                            total = self.accumulated.len(),
                            end_reached = self.end_reached,
                            "page applied"
                        );
                    }
                    Err(e) => {
                        warn!(error = %e, "page rejected");
                        self.load_error = Some(e.user_message());
                    }
                }
            }
            FetchOutcome::Error(message) => {
                warn!(%message, "page fetch failed");
                self.load_error = Some(message);
            }
            FetchOutcome::InProgress => {
                // Not a completion; keep waiting for the real one.
                self.in_flight = Some(request);
            }
        }
        true
    }

    /// Marks a page load that could not even be issued as failed.
    pub fn fail_page_load(&mut self, request: RequestId, error: &CatalogError) {
        if self.in_flight != Some(request) {
            return;
        }
        self.in_flight = None;
        self.load_error = Some(error.user_message());
    }

    /// Surfaces an error that is not tied to a page request.
    pub fn report_error(&mut self, error: &CatalogError) {
        self.load_error = Some(error.user_message());
    }

    /// Filters the list by name substring (case-insensitive) or exact id.
    /// Pure projection: never touches `accumulated` or the network.
    #[instrument(skip(self), fields(searching = self.is_searching))]
    pub fn search(&mut self, query: &str) {
        if query.is_empty() {
            self.is_searching = false;
            self.is_search_starting = true;
            self.filtered.clear();
            debug!("search cleared");
            return;
        }

        let source = if self.is_search_starting {
            &self.accumulated
        } else {
            &self.cached_snapshot
        };

        let needle = query.trim();
        let results: Vec<ListItem> = source
            .iter()
            .filter(|item| item.matches(needle))
            .cloned()
            .collect();

        if self.is_search_starting {
            self.cached_snapshot = self.accumulated.clone();
            self.is_search_starting = false;
        }

        debug!(matches = results.len(), "search applied");
        self.filtered = results;
        self.is_searching = true;
    }

    /// Pagination trigger for the grid: fires from the second-to-last row on,
    /// unless loading, exhausted or searching.
    pub fn should_paginate(&self, row_index: usize) -> bool {
        !self.is_loading()
            && !self.end_reached
            && !self.is_searching
            && row_index.saturating_add(2) >= self.row_count()
    }
}
