//! Wire types for the inventory REST API.

use serde::{Deserialize, Serialize};
use stowage_core::{DestinationType, EntityId, EntityKind, ValidationError};

/// Body of every API response: either a payload or an error message.
///
/// `Error` is tried first so that `{ "error": "..." }` never decodes as an
/// empty payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Error {
        error: String,
    },
    Data {
        #[serde(default = "Option::default")]
        data: Option<T>,
        #[serde(rename = "totalCount", default)]
        total_count: Option<u64>,
    },
}

/// `{ "error": "..." }` body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserPayload {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SuccessPayload {
    pub success: bool,
}

/// Option row for a lookup filter (rooms, buildings, entity types).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
}

impl LookupOption {
    pub fn label(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("#{}", self.id),
        }
    }
}

/// Move of one record to a new destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furniture_id: Option<EntityId>,
    pub destination_type: DestinationType,
    pub destination_id: EntityId,
}

impl TransitionRequest {
    /// Rooms and buildings do not move; asking for it is a validation error,
    /// as is moving a record into itself.
    pub fn new(
        kind: EntityKind,
        id: EntityId,
        destination_type: DestinationType,
        destination_id: EntityId,
    ) -> Result<Self, ValidationError> {
        let mut request = Self {
            item_id: None,
            place_id: None,
            container_id: None,
            furniture_id: None,
            destination_type,
            destination_id,
        };
        match kind {
            EntityKind::Item => request.item_id = Some(id),
            EntityKind::Place => request.place_id = Some(id),
            EntityKind::Container => request.container_id = Some(id),
            EntityKind::Furniture => request.furniture_id = Some(id),
            EntityKind::Room | EntityKind::Building => {
                return Err(ValidationError::InvalidValue {
                    field: "kind".to_string(),
                    reason: format!("{} records cannot be moved", kind),
                });
            }
        }
        let same_kind = matches!(
            (kind, destination_type),
            (EntityKind::Place, DestinationType::Place)
                | (EntityKind::Container, DestinationType::Container)
                | (EntityKind::Furniture, DestinationType::Furniture)
        );
        if same_kind && id == destination_id {
            return Err(ValidationError::InvalidValue {
                field: "destination_id".to_string(),
                reason: "a record cannot be moved into itself".to_string(),
            });
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_prefers_error() {
        let env: ApiEnvelope<Vec<LookupOption>> =
            serde_json::from_str(r#"{"error":"Unauthorized"}"#).unwrap();
        assert!(matches!(env, ApiEnvelope::Error { error } if error == "Unauthorized"));
    }

    #[test]
    fn test_envelope_without_total_count() {
        let env: ApiEnvelope<Vec<LookupOption>> =
            serde_json::from_str(r#"{"data":[{"id":1,"name":"Кухня"}]}"#).unwrap();
        match env {
            ApiEnvelope::Data { data, total_count } => {
                assert_eq!(data.map(|d| d.len()), Some(1));
                assert_eq!(total_count, None);
            }
            ApiEnvelope::Error { .. } => panic!("expected data"),
        }
    }

    #[test]
    fn test_transition_body_names_the_moved_record() {
        let request =
            TransitionRequest::new(EntityKind::Container, 7, DestinationType::Room, 3).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["container_id"], 7);
        assert_eq!(json["destination_type"], "room");
        assert_eq!(json["destination_id"], 3);
        assert!(json.get("item_id").is_none());
    }

    #[test]
    fn test_transition_rejects_rooms_and_self_moves() {
        assert!(TransitionRequest::new(EntityKind::Room, 1, DestinationType::Room, 2).is_err());
        assert!(
            TransitionRequest::new(EntityKind::Place, 4, DestinationType::Place, 4).is_err()
        );
        assert!(TransitionRequest::new(EntityKind::Item, 4, DestinationType::Place, 4).is_ok());
    }

    #[test]
    fn test_lookup_label_falls_back_to_id() {
        let option = LookupOption { id: 9, name: Some("  ".to_string()) };
        assert_eq!(option.label(), "#9");
    }
}
