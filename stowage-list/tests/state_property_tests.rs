use proptest::prelude::*;
use stowage_core::{FetchListParams, ItemFilters, ListFilters};
use stowage_list::{FilterState, RequestKeyGuard};
use stowage_test_utils::{arb_item_filters, arb_sort_direction};

proptest! {
    #[test]
    fn prop_external_show_deleted_always_wins(
        initial in arb_item_filters(),
        next in arb_item_filters(),
        pinned in any::<bool>(),
    ) {
        let mut state = FilterState::new(initial, Some(pinned));
        prop_assert_eq!(state.filters().show_deleted(), pinned);

        state.set_filters(next.clone());
        let effective = state.filters();
        prop_assert_eq!(effective.show_deleted, pinned);
        prop_assert_eq!(effective.has_photo, next.has_photo);
        prop_assert_eq!(effective.location_type, next.location_type);
    }

    #[test]
    fn prop_without_override_filters_pass_through(filters in arb_item_filters()) {
        let state = FilterState::new(filters.clone(), None);
        prop_assert_eq!(state.filters(), filters);
    }

    #[test]
    fn prop_guard_skips_only_the_in_flight_key(
        filters in arb_item_filters(),
        direction in arb_sort_direction(),
        page in 1u32..50,
    ) {
        let mut params = FetchListParams::new(filters);
        params.sort_direction = direction;
        params.page = Some(page);
        let key = params.request_key();

        let mut next = params.clone();
        next.page = Some(page + 1);
        let next_key = next.request_key();

        let guard = RequestKeyGuard::new();
        prop_assert!(guard.should_start(&key));
        prop_assert!(!guard.should_start(&key));
        prop_assert!(guard.should_start(&next_key));
        prop_assert!(!guard.is_latest(&key));

        guard.finish(&key);
        prop_assert!(guard.is_latest(&next_key));
        guard.finish(&next_key);
        prop_assert_eq!(guard.in_flight(), None);
        prop_assert!(guard.should_start(&key));
    }
}

#[test]
fn default_item_filters_hide_deleted() {
    let state = FilterState::new(ItemFilters::default(), None);
    assert!(!state.filters().show_deleted());
}
