//! Stowage Test Utilities
//!
//! Shared test infrastructure for the Stowage workspace:
//! - Stub list fetchers with scripted replies and call recording
//! - Fixtures for display records
//! - Proptest generators for filters and records

pub use stowage_core::{
    BuildingDisplay, ContainerDisplay, EntityKind, FetchError, FetchListParams, FetchListResult,
    FetchResult, FurnitureDisplay, ItemDisplay, ItemFilters, ListEntity, ListFilters,
    PlaceDisplay, RoomDisplay, RoomFilters, SortDirection,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stowage_list::ListFetcher;

// ============================================================================
// STUB FETCHER
// ============================================================================

/// What a [`StubFetcher`] answers for one call.
#[derive(Debug, Clone)]
pub struct StubReply<E> {
    pub delay: Duration,
    pub result: FetchResult<E>,
}

impl<E> StubReply<E> {
    pub fn ok(data: Vec<E>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(FetchListResult::from_data(data)),
        }
    }

    pub fn ok_with_total(data: Vec<E>, total_count: u64) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(FetchListResult::new(data, total_count)),
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(FetchError::new(message)),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder<E> =
    Box<dyn Fn(&FetchListParams<<E as ListEntity>::Filters>) -> StubReply<E> + Send + Sync>;

/// List fetcher that answers from a closure and records every call.
pub struct StubFetcher<E: ListEntity> {
    responder: Responder<E>,
    calls: Mutex<Vec<FetchListParams<E::Filters>>>,
}

impl<E: ListEntity> StubFetcher<E> {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&FetchListParams<E::Filters>) -> StubReply<E> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Always answers `data` immediately.
    pub fn returning(data: Vec<E>) -> Arc<Self> {
        Self::new(move |_| StubReply::ok(data.clone()))
    }

    /// Always fails with `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::new(move |_| StubReply::err(&message))
    }

    pub fn calls(&self) -> Vec<FetchListParams<E::Filters>> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<FetchListParams<E::Filters>> {
        self.calls().pop()
    }
}

#[async_trait]
impl<E: ListEntity> ListFetcher<E> for StubFetcher<E> {
    async fn fetch_list(&self, params: &FetchListParams<E::Filters>) -> FetchResult<E> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(params.clone());
        }
        let reply = (self.responder)(params);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn item(id: i64, name: Option<&str>) -> ItemDisplay {
    ItemDisplay {
        id,
        name: name.map(str::to_string),
        deleted_at: None,
        created_at: None,
        photo_url: None,
        last_location: None,
    }
}

pub fn deleted_item(id: i64, name: &str) -> ItemDisplay {
    ItemDisplay {
        deleted_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single(),
        ..item(id, Some(name))
    }
}

/// `count` items named `"<prefix> <n>"` with ids starting at 1.
pub fn items(prefix: &str, count: usize) -> Vec<ItemDisplay> {
    (1..=count as i64)
        .map(|id| item(id, Some(&format!("{} {}", prefix, id))))
        .collect()
}

pub fn place(id: i64, name: Option<&str>) -> PlaceDisplay {
    PlaceDisplay {
        id,
        name: name.map(str::to_string),
        deleted_at: None,
        created_at: None,
        photo_url: None,
        entity_type_name: None,
        last_location: None,
    }
}

pub fn container(id: i64, name: Option<&str>) -> ContainerDisplay {
    ContainerDisplay {
        id,
        name: name.map(str::to_string),
        deleted_at: None,
        created_at: None,
        photo_url: None,
        entity_type_name: None,
        items_count: None,
        last_location: None,
    }
}

pub fn room(id: i64, name: Option<&str>) -> RoomDisplay {
    RoomDisplay {
        id,
        name: name.map(str::to_string),
        deleted_at: None,
        created_at: None,
        photo_url: None,
        building_id: None,
        building_name: None,
        items_count: None,
        places_count: None,
        containers_count: None,
    }
}

pub fn building(id: i64, name: Option<&str>) -> BuildingDisplay {
    BuildingDisplay {
        id,
        name: name.map(str::to_string),
        deleted_at: None,
        created_at: None,
        photo_url: None,
        rooms_count: None,
    }
}

pub fn furniture(id: i64, name: Option<&str>) -> FurnitureDisplay {
    FurnitureDisplay {
        id,
        name: name.map(str::to_string),
        deleted_at: None,
        created_at: None,
        photo_url: None,
        room_id: None,
        room_name: None,
        places_count: None,
    }
}

// ============================================================================
// GENERATORS
// ============================================================================

pub fn arb_sort_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

pub fn arb_item_filters() -> impl Strategy<Value = ItemFilters> {
    (any::<bool>(), proptest::option::of(any::<bool>())).prop_map(|(show_deleted, has_photo)| {
        ItemFilters {
            show_deleted,
            location_type: None,
            has_photo,
        }
    })
}

pub fn arb_item_display() -> impl Strategy<Value = ItemDisplay> {
    (1i64..100_000, proptest::option::of("[A-Za-zА-Яа-я ]{0,16}"))
        .prop_map(|(id, name)| ItemDisplay {
            name,
            ..item(id, None)
        })
}
