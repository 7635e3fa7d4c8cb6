//! Stowage list runtime.
//!
//! Building blocks for entity list screens: a debounced search trigger, a
//! single-flight request guard, filter and panel state, a keyed list cache and
//! the [`ListPage`] orchestrator that ties them to a [`ListFetcher`].

pub mod cache;
pub mod config;
pub mod debounce;
pub mod fetch;
pub mod filter_state;
pub mod guard;
pub mod page;
pub mod panel;

pub use cache::{CacheCallback, CacheEntry, SimpleListCache, Subscription};
pub use config::{
    ColumnDef, DisplayNameFn, FilterDef, FilterKind, ListActions, ListPageConfig, LookupSource,
    SelectOption, SortConfig, DEFAULT_PAGE_SIZE,
};
pub use debounce::{DebounceOptions, Debouncer, SearchCallback, DEFAULT_SEARCH_DELAY};
pub use fetch::ListFetcher;
pub use filter_state::FilterState;
pub use guard::RequestKeyGuard;
pub use page::{ListPage, ListSnapshot, LoadStatus};
pub use panel::{OpenChangeCallback, PanelState};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
