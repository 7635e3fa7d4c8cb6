use proptest::prelude::*;
use stowage_core::{
    list_display_name, pagination_pages, total_pages, FetchListParams, ItemDisplay, ItemFilters,
    PageItem, PluralForm, SortDirection,
};

fn item(id: i64, name: Option<String>) -> ItemDisplay {
    ItemDisplay {
        id,
        name,
        deleted_at: None,
        created_at: None,
        photo_url: None,
        last_location: None,
    }
}

proptest! {
    #[test]
    fn small_totals_are_listed_in_full(total in 0u32..=7, current in 1u32..=7) {
        let expected: Vec<PageItem> = (1..=total).map(PageItem::Page).collect();
        prop_assert_eq!(pagination_pages(current, total), expected);
    }

    #[test]
    fn large_totals_anchor_first_and_last(total in 8u32..5_000, offset in 0u32..5_000) {
        let current = 1 + offset % total;
        let pages = pagination_pages(current, total);

        prop_assert_eq!(pages.first(), Some(&PageItem::Page(1)));
        prop_assert_eq!(pages.last(), Some(&PageItem::Page(total)));
        prop_assert!(pages.len() == 6 || pages.len() == 7);
        prop_assert!(pages.contains(&PageItem::Page(current)));

        // No two ellipses are adjacent and page numbers strictly increase.
        let mut last_page = 0;
        let mut previous_was_ellipsis = false;
        for item in &pages {
            match item {
                PageItem::Page(n) => {
                    prop_assert!(*n > last_page);
                    last_page = *n;
                    previous_was_ellipsis = false;
                }
                PageItem::Ellipsis => {
                    prop_assert!(!previous_was_ellipsis);
                    previous_was_ellipsis = true;
                }
            }
        }
    }

    #[test]
    fn total_pages_covers_every_row(count in 0u64..1_000_000, size in 1u32..500) {
        let pages = u64::from(total_pages(count, size));
        prop_assert!(pages >= 1);
        prop_assert!(pages * u64::from(size) >= count);
        if count > 0 {
            prop_assert!((pages - 1) * u64::from(size) < count);
        }
    }

    #[test]
    fn plural_form_depends_on_last_two_digits(n in 0u64..1_000_000) {
        prop_assert_eq!(PluralForm::for_count(n), PluralForm::for_count(n % 100));
    }

    #[test]
    fn blank_names_fall_back_to_type_label(id in 1i64..1_000_000, spaces in " {0,4}") {
        prop_assert_eq!(list_display_name(&item(id, Some(spaces))), format!("Вещь #{}", id));
        prop_assert_eq!(list_display_name(&item(id, None)), format!("Вещь #{}", id));
    }

    #[test]
    fn equal_params_share_a_request_key(query in "[a-zа-я ]{0,12}", page in proptest::option::of(1u32..50), asc in any::<bool>()) {
        let build = || {
            let mut params = FetchListParams::new(ItemFilters::default());
            params.query = query.clone();
            params.page = page;
            params.sort_direction = if asc { SortDirection::Asc } else { SortDirection::Desc };
            params
        };
        prop_assert_eq!(build().request_key(), build().request_key());
    }
}
