//! Generic list-page orchestrator.
//!
//! A [`ListPage`] owns the filter, search, sort and page state of one list
//! screen and turns every change of that state into a call to the configured
//! [`ListFetcher`](crate::fetch::ListFetcher). Responses are applied in issue
//! order: a response that was superseded before it arrived is dropped.
//!
//! Every public method is synchronous and returns immediately; fetches run on
//! spawned Tokio tasks, so a page must be created and driven from within a
//! runtime. Observers read [`ListPage::snapshot`] or watch
//! [`ListPage::subscribe`].

use crate::config::ListPageConfig;
use crate::debounce::{Debouncer, SearchCallback};
use crate::filter_state::FilterState;
use crate::guard::RequestKeyGuard;
use crate::lock;
use crate::panel::{OpenChangeCallback, PanelState};
use std::sync::{Arc, Mutex, Weak};
use stowage_core::{
    normalize_sort_by, pagination_pages, total_pages, FetchError, FetchListParams, ListEntity,
    PageItem, SortDirection, ValidationError,
};
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Point-in-time view of a list page.
#[derive(Debug, Clone)]
pub struct ListSnapshot<E: ListEntity> {
    pub data: Vec<E>,
    pub total_count: u64,
    pub total_pages: u32,
    pub page: u32,
    pub status: LoadStatus,
    pub is_loading: bool,
    pub error: Option<String>,
    pub filters: E::Filters,
    /// Raw search input.
    pub search_query: String,
    /// Query the current data was requested with.
    pub query: String,
    pub sort_by: String,
    pub sort_direction: SortDirection,
    pub is_panel_open: bool,
}

struct PageState<E: ListEntity> {
    filters: FilterState<E::Filters>,
    search_input: String,
    query: String,
    sort_by: String,
    sort_direction: SortDirection,
    page: u32,
    data: Vec<E>,
    total_count: u64,
    error: Option<String>,
    status: LoadStatus,
    refresh_generation: u64,
    /// Sequence number of the most recently issued request.
    latest_request: u64,
    panel: PanelState,
}

impl<E: ListEntity> PageState<E> {
    fn new(config: &ListPageConfig<E>) -> Self {
        Self {
            filters: FilterState::new(config.initial_filters.clone(), None),
            search_input: String::new(),
            query: String::new(),
            sort_by: config.sort.default_by.to_string(),
            sort_direction: config.sort.default_direction,
            page: 1,
            data: Vec::new(),
            total_count: 0,
            error: None,
            status: LoadStatus::Idle,
            refresh_generation: 0,
            latest_request: 0,
            panel: PanelState::default(),
        }
    }

    fn params(&self, page_size: u32) -> FetchListParams<E::Filters> {
        FetchListParams {
            query: self.query.clone(),
            filters: self.filters.filters(),
            sort_by: self.sort_by.clone(),
            sort_direction: self.sort_direction,
            page: Some(self.page),
            page_size: Some(page_size),
        }
    }

    fn snapshot(&self, page_size: u32) -> ListSnapshot<E> {
        ListSnapshot {
            data: self.data.clone(),
            total_count: self.total_count,
            total_pages: total_pages(self.total_count, page_size),
            page: self.page,
            status: self.status,
            is_loading: self.status == LoadStatus::Loading,
            error: self.error.clone(),
            filters: self.filters.filters(),
            search_query: self.search_input.clone(),
            query: self.query.clone(),
            sort_by: self.sort_by.clone(),
            sort_direction: self.sort_direction,
            is_panel_open: self.panel.is_open(),
        }
    }
}

struct Inner<E: ListEntity> {
    config: ListPageConfig<E>,
    guard: RequestKeyGuard,
    state: Mutex<PageState<E>>,
    debouncer: Mutex<Debouncer>,
    updates: watch::Sender<ListSnapshot<E>>,
}

impl<E: ListEntity> Inner<E> {
    fn publish(&self, state: &PageState<E>) {
        self.updates
            .send_replace(state.snapshot(self.config.page_size));
    }

    /// Starts a fetch for the current state unless the same request is in flight.
    ///
    /// A refresh bumps the generation that salts the request key, so it is
    /// never mistaken for the request already in flight. Every started request
    /// gets the next sequence number; only the newest one may be applied.
    fn issue(self: &Arc<Self>, refresh: bool) {
        let (params, key, seq) = {
            let mut state = lock(&self.state);
            if refresh {
                state.refresh_generation += 1;
            }
            let params = state.params(self.config.page_size);
            let key = format!("{}#{}", params.request_key(), state.refresh_generation);
            if !self.guard.should_start(&key) {
                debug!(kind = %E::KIND, key = %key, "identical list request already in flight");
                return;
            }
            state.latest_request += 1;
            state.status = LoadStatus::Loading;
            self.publish(&state);
            (params, key, state.latest_request)
        };

        debug!(kind = %E::KIND, key = %key, seq, refresh, "list request issued");
        let inner = Arc::clone(self);
        tokio::spawn(async move { inner.run(params, key, seq).await });
    }

    async fn run(self: Arc<Self>, params: FetchListParams<E::Filters>, key: String, seq: u64) {
        let fetcher = Arc::clone(self.config.fetcher());
        // A panicking fetcher is reported as a failed fetch.
        let outcome = tokio::spawn(async move { fetcher.fetch_list(&params).await })
            .await
            .unwrap_or_else(|err| Err(FetchError::new(format!("list fetch task failed: {}", err))));

        let mut state = lock(&self.state);
        if seq != state.latest_request {
            debug!(kind = %E::KIND, key = %key, seq, "stale list response discarded");
            return;
        }
        self.guard.finish(&key);

        match outcome {
            Ok(result) => {
                debug!(
                    kind = %E::KIND,
                    rows = result.data.len(),
                    total = result.total_count,
                    "list response applied"
                );
                state.data = result.data;
                state.total_count = result.total_count;
                state.error = None;
                state.status = LoadStatus::Success;
            }
            Err(err) => {
                warn!(kind = %E::KIND, error = %err, "list fetch failed");
                state.error = Some(err.message);
                state.status = LoadStatus::Failure;
            }
        }
        self.publish(&state);
    }

    fn commit_search(self: &Arc<Self>, query: String) {
        {
            let mut state = lock(&self.state);
            if state.query == query {
                return;
            }
            state.query = query;
            state.page = 1;
        }
        self.issue(false);
    }
}

/// Handle to a running list page. Clones share the same page.
pub struct ListPage<E: ListEntity> {
    inner: Arc<Inner<E>>,
}

impl<E: ListEntity> Clone for ListPage<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: ListEntity> ListPage<E> {
    /// Validates `config` and immediately fetches the first page with the
    /// initial filters.
    pub fn new(config: ListPageConfig<E>) -> Result<Self, ValidationError> {
        config.validate()?;
        let state = PageState::new(&config);
        let (updates, _) = watch::channel(state.snapshot(config.page_size));

        let inner = Arc::new_cyclic(|weak: &Weak<Inner<E>>| {
            let weak = weak.clone();
            let on_search: SearchCallback = Arc::new(move |query| {
                if let Some(inner) = weak.upgrade() {
                    inner.commit_search(query);
                }
            });
            let mut debouncer = Debouncer::new(config.search, on_search);
            debouncer.observe(&state.search_input);

            Inner {
                config,
                guard: RequestKeyGuard::new(),
                state: Mutex::new(state),
                debouncer: Mutex::new(debouncer),
                updates,
            }
        });

        inner.issue(false);
        Ok(Self { inner })
    }

    pub fn config(&self) -> &ListPageConfig<E> {
        &self.inner.config
    }

    pub fn snapshot(&self) -> ListSnapshot<E> {
        lock(&self.inner.state).snapshot(self.inner.config.page_size)
    }

    /// Receiver that observes every state change of the page.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<E>> {
        self.inner.updates.subscribe()
    }

    /// Waits until no request is in flight and returns that state.
    pub async fn settled(&self) -> ListSnapshot<E> {
        let mut updates = self.subscribe();
        let settled = match updates.wait_for(|snapshot| !snapshot.is_loading).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    // ------------------------------------------------------------------------
    // Filters / search / sort / page
    // ------------------------------------------------------------------------

    pub fn filters(&self) -> E::Filters {
        lock(&self.inner.state).filters.filters()
    }

    /// Replaces the filters and goes back to the first page.
    pub fn set_filters(&self, filters: E::Filters) {
        {
            let mut state = lock(&self.inner.state);
            state.filters.set_filters(filters);
            state.page = 1;
        }
        self.inner.issue(false);
    }

    /// Pins (or releases) `show_deleted` from outside the page.
    pub fn set_external_show_deleted(&self, value: Option<bool>) {
        let changed = {
            let mut state = lock(&self.inner.state);
            let before = state.filters.filters();
            state.filters.set_external_show_deleted(value);
            let changed = before != state.filters.filters();
            if changed {
                state.page = 1;
            }
            changed
        };
        if changed {
            self.inner.issue(false);
        }
    }

    pub fn search_query(&self) -> String {
        lock(&self.inner.state).search_input.clone()
    }

    /// Records the raw input; the request follows once typing pauses.
    pub fn set_search_query(&self, query: &str) {
        {
            let mut state = lock(&self.inner.state);
            state.search_input = query.to_string();
            self.inner.publish(&state);
        }
        lock(&self.inner.debouncer).observe(query);
    }

    /// Sorts by `sort_by`, or by the default column if it is not allowed.
    pub fn set_sort(&self, sort_by: &str, direction: SortDirection) {
        let sort_by = normalize_sort_by(&self.inner.config.sort.allowed, sort_by);
        {
            let mut state = lock(&self.inner.state);
            if state.sort_by == sort_by && state.sort_direction == direction {
                return;
            }
            state.sort_by = sort_by;
            state.sort_direction = direction;
            state.page = 1;
        }
        self.inner.issue(false);
    }

    pub fn page(&self) -> u32 {
        lock(&self.inner.state).page
    }

    pub fn set_page(&self, page: u32) {
        let page = page.max(1);
        {
            let mut state = lock(&self.inner.state);
            if state.page == page {
                return;
            }
            state.page = page;
        }
        self.inner.issue(false);
    }

    /// Re-issues the current request even if an identical one is in flight.
    pub fn refresh_list(&self) {
        self.inner.issue(true);
    }

    // ------------------------------------------------------------------------
    // Filter panel
    // ------------------------------------------------------------------------

    pub fn is_panel_open(&self) -> bool {
        lock(&self.inner.state).panel.is_open()
    }

    /// Requests `open`. The change callback runs after the page lock is
    /// released, so it may call back into the page.
    pub fn set_panel_open(&self, open: bool) {
        let callback = {
            let mut state = lock(&self.inner.state);
            let callback = state.panel.request_open(open);
            self.inner.publish(&state);
            callback
        };
        if let Some(callback) = callback {
            callback(open);
        }
    }

    pub fn toggle_panel(&self) {
        let open = !self.is_panel_open();
        self.set_panel_open(open);
    }

    /// Hands control of the panel to a parent, or takes it back with `None`.
    pub fn control_panel(
        &self,
        external_open: Option<bool>,
        on_open_change: Option<OpenChangeCallback>,
    ) {
        let mut state = lock(&self.inner.state);
        state.panel.set_control(external_open, on_open_change);
        self.inner.publish(&state);
    }

    /// Parent-side update of the controlled open value.
    pub fn set_external_panel_open(&self, external_open: Option<bool>) {
        let mut state = lock(&self.inner.state);
        state.panel.set_external_open(external_open);
        self.inner.publish(&state);
    }

    // ------------------------------------------------------------------------
    // Presentation helpers
    // ------------------------------------------------------------------------

    pub fn display_name(&self, entity: &E) -> String {
        (self.inner.config.display_name)(entity)
    }

    /// Pluralized total, e.g. `"12 вещей"`.
    pub fn count_label(&self) -> String {
        let total = lock(&self.inner.state).total_count;
        self.inner.config.labels.format_count(total)
    }

    pub fn pages(&self) -> Vec<PageItem> {
        let snapshot = self.snapshot();
        pagination_pages(snapshot.page, snapshot.total_pages)
    }
}
