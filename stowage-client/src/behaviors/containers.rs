use super::{location_type_filter, show_deleted_filter, ListBehavior};
use stowage_core::{ContainerDisplay, EntityKind, DEFAULT_SORT_BY};
use stowage_list::{ColumnDef, FilterDef, ListActions, LookupSource};

impl ListBehavior for ContainerDisplay {
    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("name", "Название"),
            ColumnDef::new("entity_type_name", "Тип"),
            ColumnDef::sortable("items_count", "Вещей"),
            ColumnDef::new("location", "Местоположение"),
            ColumnDef::sortable("created_at", "Добавлено"),
        ]
    }

    fn filter_defs() -> Vec<FilterDef> {
        vec![
            FilterDef::lookup(
                "entityTypeId",
                "Тип контейнера",
                LookupSource::EntityTypes(EntityKind::Container),
            ),
            FilterDef::toggle("hasItems", "Не пустые"),
            location_type_filter(),
            show_deleted_filter(),
        ]
    }

    fn sort_fields() -> Vec<&'static str> {
        vec![DEFAULT_SORT_BY, "name", "items_count"]
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
        let container = ContainerDisplay {
            id: 4,
            name: Some("\t".to_string()),
            deleted_at: None,
            created_at: None,
            photo_url: None,
            entity_type_name: None,
            items_count: Some(3),
            last_location: None,
        };
        assert_eq!(container.list_display_name(), "Контейнер #4");
    }
}
