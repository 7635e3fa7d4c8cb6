use super::{show_deleted_filter, ListBehavior};
use stowage_core::{EntityKind, PlaceDisplay};
use stowage_list::{ColumnDef, FilterDef, ListActions, LookupSource};

impl ListBehavior for PlaceDisplay {
    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("name", "Название"),
            ColumnDef::new("entity_type_name", "Тип"),
            ColumnDef::new("location", "Местоположение"),
            ColumnDef::sortable("created_at", "Добавлено"),
        ]
    }

    fn filter_defs() -> Vec<FilterDef> {
        vec![
            FilterDef::lookup(
                "entityTypeId",
                "Тип места",
                LookupSource::EntityTypes(EntityKind::Place),
            ),
            FilterDef::lookup("roomId", "Помещение", LookupSource::Rooms),
            show_deleted_filter(),
        ]
    }

    fn actions() -> ListActions {
        ListActions {
            print_label: true,
            ..ListActions::default()
        }
    }

    fn move_enabled() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let place = PlaceDisplay {
            id: 11,
            name: None,
            deleted_at: None,
            created_at: None,
            photo_url: None,
            entity_type_name: Some("Полка".to_string()),
            last_location: None,
        };
        assert_eq!(place.list_display_name(), "Место #11");
    }
}
