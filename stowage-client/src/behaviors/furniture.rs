use super::{show_deleted_filter, ListBehavior};
use stowage_core::FurnitureDisplay;
use stowage_list::{ColumnDef, FilterDef, LookupSource};

impl ListBehavior for FurnitureDisplay {
    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("name", "Название"),
            ColumnDef::new("room_name", "Помещение"),
            ColumnDef::new("places_count", "Мест"),
            ColumnDef::sortable("created_at", "Добавлено"),
        ]
    }

    fn filter_defs() -> Vec<FilterDef> {
        vec![
            FilterDef::lookup("roomId", "Помещение", LookupSource::Rooms),
            show_deleted_filter(),
        ]
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
        let furniture = FurnitureDisplay {
            id: 6,
            name: Some(String::new()),
            deleted_at: None,
            created_at: None,
            photo_url: None,
            room_id: None,
            room_name: None,
            places_count: None,
        };
        assert_eq!(furniture.list_display_name(), "Мебель #6");
    }
}
