use super::{show_deleted_filter, ListBehavior};
use stowage_core::{BuildingDisplay, DEFAULT_SORT_BY};
use stowage_list::{ColumnDef, FilterDef};

impl ListBehavior for BuildingDisplay {
    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("name", "Название"),
            ColumnDef::sortable("rooms_count", "Помещений"),
            ColumnDef::sortable("created_at", "Добавлено"),
        ]
    }

    fn filter_defs() -> Vec<FilterDef> {
        vec![show_deleted_filter()]
    }

    fn sort_fields() -> Vec<&'static str> {
        vec![DEFAULT_SORT_BY, "name", "rooms_count"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let building = BuildingDisplay {
            id: 8,
            name: Some("Дача".to_string()),
            deleted_at: None,
            created_at: None,
            photo_url: None,
            rooms_count: Some(2),
        };
        assert_eq!(building.list_display_name(), "Дача");
        let unnamed = BuildingDisplay { name: None, ..building };
        assert_eq!(unnamed.list_display_name(), "Здание #8");
    }
}
