use super::{show_deleted_filter, ListBehavior};
use stowage_core::{RoomDisplay, DEFAULT_SORT_BY};
use stowage_list::{ColumnDef, FilterDef, LookupSource};

impl ListBehavior for RoomDisplay {
    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("name", "Название"),
            ColumnDef::new("building_name", "Здание"),
            ColumnDef::sortable("items_count", "Вещей"),
            ColumnDef::new("places_count", "Мест"),
            ColumnDef::new("containers_count", "Контейнеров"),
            ColumnDef::sortable("created_at", "Добавлено"),
        ]
    }

    fn filter_defs() -> Vec<FilterDef> {
        vec![
            FilterDef::lookup("buildingId", "Здание", LookupSource::Buildings),
            FilterDef::toggle("hasItems", "С вещами"),
            show_deleted_filter(),
        ]
    }

    fn sort_fields() -> Vec<&'static str> {
        vec![DEFAULT_SORT_BY, "name", "items_count"]
    }
}
