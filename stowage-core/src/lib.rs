//! Stowage Core - List Types
//!
//! Pure data structures shared by the list runtime and the REST client.
//! Nothing in this crate performs I/O or spawns tasks.

pub mod entity;
pub mod error;
pub mod filters;
pub mod labels;
pub mod pagination;
pub mod params;

pub use entity::{
    BuildingDisplay, ContainerDisplay, DestinationType, EntityId, EntityKind, FurnitureDisplay,
    ItemDisplay, ListEntity, LocationDisplay, PlaceDisplay, RoomDisplay, Timestamp,
};
pub use error::{ParseError, ValidationError};
pub use filters::{
    BuildingFilters, ContainerFilters, FurnitureFilters, ItemFilters, ListFilters, PlaceFilters,
    RoomFilters,
};
pub use labels::{list_display_name, PluralForm, PluralLabels};
pub use pagination::{pagination_pages, total_pages, PageItem};
pub use params::{
    normalize_sort_by, FetchError, FetchListParams, FetchListResult, FetchResult, SortDirection,
    DEFAULT_SORT_BY,
};
