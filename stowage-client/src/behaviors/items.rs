use super::{location_type_filter, show_deleted_filter, ListBehavior};
use stowage_core::ItemDisplay;
use stowage_list::{ColumnDef, FilterDef, ListActions};

impl ListBehavior for ItemDisplay {
    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("name", "Название"),
            ColumnDef::new("location", "Местоположение"),
            ColumnDef::sortable("created_at", "Добавлено"),
        ]
    }

    fn filter_defs() -> Vec<FilterDef> {
        vec![
            location_type_filter(),
            FilterDef::toggle("hasPhoto", "С фото"),
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
