//! Per-kind list behavior: what each list screen fetches and how it shows it.

mod buildings;
mod containers;
mod furniture;
mod items;
mod places;
mod rooms;

use crate::api_client::RestClient;
use crate::config::ClientConfig;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use stowage_core::{
    DestinationType, FetchListParams, FetchResult, ListEntity, DEFAULT_SORT_BY,
};
use stowage_list::{
    ColumnDef, DebounceOptions, FilterDef, ListActions, ListFetcher, ListPageConfig,
    SelectOption, SortConfig,
};
use tracing::warn;

/// Screen definition for one listable kind.
pub trait ListBehavior: ListEntity {
    fn columns() -> Vec<ColumnDef>;

    fn filter_defs() -> Vec<FilterDef>;

    /// Columns the API accepts in `sortBy`.
    fn sort_fields() -> Vec<&'static str> {
        vec![DEFAULT_SORT_BY, "name"]
    }

    fn actions() -> ListActions {
        ListActions::default()
    }

    fn move_enabled() -> bool {
        false
    }

    fn default_filters() -> Self::Filters {
        Self::Filters::default()
    }

    fn list_display_name(&self) -> String {
        stowage_core::list_display_name(self)
    }
}

/// [`ListFetcher`] backed by `GET /api/<kind>`.
pub struct RestListFetcher<E> {
    client: Arc<RestClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> RestListFetcher<E> {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: ListEntity> ListFetcher<E> for RestListFetcher<E> {
    async fn fetch_list(&self, params: &FetchListParams<E::Filters>) -> FetchResult<E> {
        self.client.list::<E>(params).await.map_err(|err| {
            warn!(kind = %E::KIND, error = %err, "list fetch failed");
            err.into()
        })
    }
}

/// Page config for `E` wired to the REST API with the client's page size and
/// search delay.
pub fn list_page_config<E: ListBehavior>(
    client: Arc<RestClient>,
    settings: &ClientConfig,
) -> ListPageConfig<E> {
    let fetcher: Arc<dyn ListFetcher<E>> = Arc::new(RestListFetcher::<E>::new(client));
    ListPageConfig::new(fetcher)
        .with_columns(E::columns())
        .with_filters(E::filter_defs())
        .with_actions(E::actions())
        .with_move_enabled(E::move_enabled())
        .with_initial_filters(E::default_filters())
        .with_sort(SortConfig {
            allowed: E::sort_fields(),
            ..SortConfig::default()
        })
        .with_page_size(settings.page_size)
        .with_search(DebounceOptions::default().with_delay(settings.search_delay()))
        .with_display_name(E::list_display_name)
}

pub(crate) fn show_deleted_filter() -> FilterDef {
    FilterDef::toggle("showDeleted", "Показывать удалённые")
}

pub(crate) fn location_type_filter() -> FilterDef {
    let option = |destination: DestinationType, label| SelectOption {
        value: destination.as_str(),
        label,
    };
    FilterDef::select(
        "locationType",
        "Где находится",
        vec![
            option(DestinationType::Place, "Место"),
            option(DestinationType::Container, "Контейнер"),
            option(DestinationType::Room, "Помещение"),
            option(DestinationType::Furniture, "Мебель"),
        ],
    )
}
