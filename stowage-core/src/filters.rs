//! Per-kind list filters
//!
//! Every filter struct carries `show_deleted`; the remaining fields are specific
//! to one list endpoint and are mapped onto its query parameters by
//! [`ListFilters::query_pairs`].

use crate::entity::{DestinationType, EntityId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter object for one kind of list screen.
pub trait ListFilters:
    Clone + fmt::Debug + Default + PartialEq + Serialize + Send + Sync + 'static
{
    fn show_deleted(&self) -> bool;

    fn set_show_deleted(&mut self, value: bool);

    /// Kind-specific query parameters. `showDeleted` is emitted by the caller.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Copy of `self` with `show_deleted` replaced.
    fn with_show_deleted(&self, value: bool) -> Self {
        let mut next = self.clone();
        next.set_show_deleted(value);
        next
    }
}

fn push_opt<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

macro_rules! show_deleted_accessors {
    () => {
        fn show_deleted(&self) -> bool {
            self.show_deleted
        }

        fn set_show_deleted(&mut self, value: bool) {
            self.show_deleted = value;
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilters {
    pub show_deleted: bool,
    pub location_type: Option<DestinationType>,
    pub has_photo: Option<bool>,
}

impl ListFilters for ItemFilters {
    show_deleted_accessors!();

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "locationType", self.location_type);
        push_opt(&mut pairs, "hasPhoto", self.has_photo);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceFilters {
    pub show_deleted: bool,
    pub entity_type_id: Option<EntityId>,
    pub room_id: Option<EntityId>,
}

impl ListFilters for PlaceFilters {
    show_deleted_accessors!();

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "entityTypeId", self.entity_type_id);
        push_opt(&mut pairs, "roomId", self.room_id);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerFilters {
    pub show_deleted: bool,
    pub entity_type_id: Option<EntityId>,
    pub has_items: Option<bool>,
    pub location_type: Option<DestinationType>,
}

impl ListFilters for ContainerFilters {
    show_deleted_accessors!();

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "entityTypeId", self.entity_type_id);
        push_opt(&mut pairs, "hasItems", self.has_items);
        push_opt(&mut pairs, "locationType", self.location_type);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilters {
    pub show_deleted: bool,
    pub building_id: Option<EntityId>,
    pub has_items: Option<bool>,
}

impl ListFilters for RoomFilters {
    show_deleted_accessors!();

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "buildingId", self.building_id);
        push_opt(&mut pairs, "hasItems", self.has_items);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingFilters {
    pub show_deleted: bool,
}

impl ListFilters for BuildingFilters {
    show_deleted_accessors!();

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureFilters {
    pub show_deleted: bool,
    pub room_id: Option<EntityId>,
}

impl ListFilters for FurnitureFilters {
    show_deleted_accessors!();

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "roomId", self.room_id);
        pairs
    }
}
