//! Data source seam for list pages.

use async_trait::async_trait;
use stowage_core::{FetchListParams, FetchResult, ListEntity};

/// Fetches one page of `E` for the given parameters.
///
/// Implementations report failures through the error value; the list page
/// never sees a transport error type.
#[async_trait]
pub trait ListFetcher<E: ListEntity>: Send + Sync {
    async fn fetch_list(&self, params: &FetchListParams<E::Filters>) -> FetchResult<E>;
}
