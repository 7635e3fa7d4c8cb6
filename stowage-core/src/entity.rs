//! Entity display records returned by the list endpoints

use crate::error::ParseError;
use crate::filters::{
    BuildingFilters, ContainerFilters, FurnitureFilters, ItemFilters, ListFilters, PlaceFilters,
    RoomFilters,
};
use crate::labels::PluralLabels;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database identifier of an inventory record.
pub type EntityId = i64;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

// ============================================================================
// ENTITY KIND
// ============================================================================

/// Kind of inventory record shown on a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Item,
    Place,
    Container,
    Room,
    Building,
    Furniture,
}

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Item,
            EntityKind::Place,
            EntityKind::Container,
            EntityKind::Room,
            EntityKind::Building,
            EntityKind::Furniture,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Place => "place",
            EntityKind::Container => "container",
            EntityKind::Room => "room",
            EntityKind::Building => "building",
            EntityKind::Furniture => "furniture",
        }
    }

    /// Path segment of the list endpoint, `/api/<segment>`.
    pub fn api_path(&self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::Place => "places",
            EntityKind::Container => "containers",
            EntityKind::Room => "rooms",
            EntityKind::Building => "buildings",
            EntityKind::Furniture => "furniture",
        }
    }

    /// Table name used by the soft-delete and restore endpoints.
    pub fn table(&self) -> &'static str {
        self.api_path()
    }

    /// Singular label used in fallback display names.
    pub fn type_label(&self) -> &'static str {
        match self {
            EntityKind::Item => "Вещь",
            EntityKind::Place => "Место",
            EntityKind::Container => "Контейнер",
            EntityKind::Room => "Помещение",
            EntityKind::Building => "Здание",
            EntityKind::Furniture => "Мебель",
        }
    }

    /// Count nouns for "N items" style labels.
    pub fn plural_labels(&self) -> PluralLabels {
        match self {
            EntityKind::Item => PluralLabels::new("вещь", "вещи", "вещей"),
            EntityKind::Place => PluralLabels::new("место", "места", "мест"),
            EntityKind::Container => {
                PluralLabels::new("контейнер", "контейнера", "контейнеров")
            }
            EntityKind::Room => PluralLabels::new("помещение", "помещения", "помещений"),
            EntityKind::Building => PluralLabels::new("здание", "здания", "зданий"),
            EntityKind::Furniture => PluralLabels::new(
                "предмет мебели",
                "предмета мебели",
                "предметов мебели",
            ),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ParseError;

    /// Accepts both the singular name and the API path segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        EntityKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle || kind.api_path() == needle)
            .ok_or_else(|| ParseError::UnknownEntityKind(s.to_string()))
    }
}

/// Where a movable record currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationType {
    Place,
    Container,
    Room,
    Furniture,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Place => "place",
            DestinationType::Container => "container",
            DestinationType::Room => "room",
            DestinationType::Furniture => "furniture",
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "place" => Ok(DestinationType::Place),
            "container" => Ok(DestinationType::Container),
            "room" => Ok(DestinationType::Room),
            "furniture" => Ok(DestinationType::Furniture),
            _ => Err(ParseError::UnknownDestinationType(s.to_string())),
        }
    }
}

// ============================================================================
// LIST ENTITY TRAIT
// ============================================================================

/// A record that can be listed on a list screen.
///
/// The list runtime only reads `id`, `name` and `deleted_at`; everything else on
/// the implementing struct is display data passed through to the caller.
pub trait ListEntity: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// Filter struct accepted by this kind's list endpoint.
    type Filters: ListFilters;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn name(&self) -> Option<&str>;

    fn deleted_at(&self) -> Option<Timestamp>;

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

macro_rules! impl_list_entity {
    ($ty:ty, $filters:ty, $kind:expr) => {
        impl ListEntity for $ty {
            type Filters = $filters;

            const KIND: EntityKind = $kind;

            fn id(&self) -> EntityId {
                self.id
            }

            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }

            fn deleted_at(&self) -> Option<Timestamp> {
                self.deleted_at
            }
        }
    };
}

// ============================================================================
// DISPLAY RECORDS
// ============================================================================

/// Last recorded transition of a movable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDisplay {
    pub destination_type: Option<DestinationType>,
    pub destination_id: Option<EntityId>,
    #[serde(default)]
    pub destination_name: Option<String>,
    #[serde(default)]
    pub moved_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDisplay {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub last_location: Option<LocationDisplay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDisplay {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub entity_type_name: Option<String>,
    #[serde(default)]
    pub last_location: Option<LocationDisplay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerDisplay {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub entity_type_name: Option<String>,
    #[serde(default)]
    pub items_count: Option<u64>,
    #[serde(default)]
    pub last_location: Option<LocationDisplay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDisplay {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub building_id: Option<EntityId>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default)]
    pub items_count: Option<u64>,
    #[serde(default)]
    pub places_count: Option<u64>,
    #[serde(default)]
    pub containers_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDisplay {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub rooms_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureDisplay {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub room_id: Option<EntityId>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub places_count: Option<u64>,
}

impl_list_entity!(ItemDisplay, ItemFilters, EntityKind::Item);
impl_list_entity!(PlaceDisplay, PlaceFilters, EntityKind::Place);
impl_list_entity!(ContainerDisplay, ContainerFilters, EntityKind::Container);
impl_list_entity!(RoomDisplay, RoomFilters, EntityKind::Room);
impl_list_entity!(BuildingDisplay, BuildingFilters, EntityKind::Building);
impl_list_entity!(FurnitureDisplay, FurnitureFilters, EntityKind::Furniture);
