use super::*;
use catalog_api::Endpoint;

// -- Parsing --

#[test]
fn empty_address_uses_defaults() {
    let state = AddressState::parse("");
    assert_eq!(state, AddressState::default());
    assert_eq!(state.page, 1);
    assert_eq!(state.category, "all");
    assert_eq!(state.sort(), None);
    assert_eq!(state.q, None);
}

#[test]
fn parse_reads_known_keys() {
    let state = AddressState::parse("?page=3&category=laptops&sortBy=price&order=desc&q=mac+book");
    assert_eq!(state.page, 3);
    assert_eq!(state.category, "laptops");
    assert_eq!(state.sort_by, Some(SortKey::Price));
    assert_eq!(state.order, Some(SortOrder::Desc));
    assert_eq!(state.q.as_deref(), Some("mac book"));
}

#[test]
fn invalid_page_falls_back_to_one() {
    for raw in ["page=0", "page=-4", "page=abc", "page=2.5", "page="] {
        assert_eq!(AddressState::parse(raw).page, 1, "address {:?}", raw);
    }
}

#[test]
fn page_must_be_integer_text() {
    let state = AddressState::parse("page=2.0&category=beauty");
    assert_eq!(state.page, 1);
    assert_eq!(state.to_query_string(), "page=1&category=beauty");
    assert_eq!(AddressState::parse("page=%202%20").page, 2);
}

#[test]
fn empty_values_are_unset() {
    let state = AddressState::parse("category=&q=&sortBy=&order=");
    assert_eq!(state.category, "all");
    assert_eq!(state.q, None);
    assert_eq!(state.sort_by, None);
    assert_eq!(state.order, None);
}

#[test]
fn unknown_sort_values_are_unset() {
    let state = AddressState::parse("sortBy=popularity&order=sideways");
    assert_eq!(state.sort_by, None);
    assert_eq!(state.order, None);
}

#[test]
fn first_occurrence_wins() {
    let state = AddressState::parse("page=2&page=9");
    assert_eq!(state.page, 2);
}

#[test]
fn round_trip_preserves_state_and_unknown_keys() {
    let state = AddressState::parse("utm_source=mail&page=4&category=smartphones&q=pro%20max");
    let again = AddressState::parse(&state.to_query_string());
    assert_eq!(again, state);
    assert!(state.to_query_string().ends_with("utm_source=mail"));
}

#[test]
fn to_query_string_omits_unset_values() {
    let state = AddressState::default();
    assert_eq!(state.to_query_string(), "page=1&category=all");
}

// -- Updates --

#[test]
fn category_change_resets_page() {
    let mut state = AddressState::parse("page=5&category=beauty");
    state.apply(AddressUpdate::category("laptops"));
    assert_eq!(state.page, 1);
    assert_eq!(state.category, "laptops");
}

#[test]
fn search_change_resets_page() {
    let mut state = AddressState::parse("page=5");
    state.apply(AddressUpdate::search("phone"));
    assert_eq!(state.page, 1);
    assert_eq!(state.q.as_deref(), Some("phone"));
}

#[test]
fn sort_change_resets_page() {
    let mut state = AddressState::parse("page=7");
    state.apply(AddressUpdate::sort(Some((SortKey::Title, SortOrder::Asc))));
    assert_eq!(state.page, 1);
    assert_eq!(state.sort(), Some((SortKey::Title, SortOrder::Asc)));
}

#[test]
fn page_change_keeps_filters() {
    let mut state = AddressState::parse("category=beauty&sortBy=rating&order=desc&q=lip");
    let before = state.clone();
    state.apply(AddressUpdate::page(6));
    assert_eq!(state.page, 6);
    assert_eq!(state.category, before.category);
    assert_eq!(state.sort(), before.sort());
    assert_eq!(state.q, before.q);
}

#[test]
fn resetting_to_same_filter_value_still_resets_page() {
    let mut state = AddressState::parse("page=3&category=beauty");
    state.apply(AddressUpdate::category("beauty"));
    assert_eq!(state.page, 1);
}

#[test]
fn empty_search_clears_q() {
    let mut state = AddressState::parse("q=shoes");
    state.apply(AddressUpdate::search(""));
    assert_eq!(state.q, None);
    assert!(!state.to_query_string().contains("q="));
}

#[test]
fn clearing_sort_removes_both_halves() {
    let mut state = AddressState::parse("sortBy=price&order=asc");
    state.apply(AddressUpdate::sort(None));
    assert_eq!(state.sort_by, None);
    assert_eq!(state.order, None);
}

#[test]
fn with_leaves_original_untouched() {
    let state = AddressState::parse("page=2");
    let next = state.with(AddressUpdate::category("laptops"));
    assert_eq!(state.page, 2);
    assert_eq!(next.page, 1);
}

// -- Product query mapping --

#[test]
fn product_query_for_category_address() {
    let query = AddressState::parse("page=2&category=phones").to_product_query(12);
    assert_eq!(query.common.page, 2);
    assert_eq!(query.common.limit, 12);
    assert_eq!(query.endpoint(), Endpoint::Category("phones".to_string()));
}

#[test]
fn product_query_for_default_address_is_unscoped() {
    let query = AddressState::default().to_product_query(12);
    assert_eq!(query.endpoint(), Endpoint::List);
    assert_eq!(query.q, None);
    assert_eq!(query.common.sort_by, None);
}

#[test]
fn half_sort_is_passed_through_but_not_a_sort() {
    let state = AddressState::parse("sortBy=price");
    assert_eq!(state.sort(), None);
    let query = state.to_product_query(12);
    assert_eq!(query.common.sort_by, Some(SortKey::Price));
    assert_eq!(query.common.order, None);
}

// -- Query keys and filters --

#[test]
fn query_key_tracks_address() {
    let a = AddressState::parse("page=2&q=phone");
    let b = AddressState::parse("q=phone&page=2&utm=x");
    assert_eq!(a.query_key(), b.query_key());
    assert_ne!(a.query_key(), a.with(AddressUpdate::page(3)).query_key());
}

#[test]
fn active_filters_lists_non_defaults() {
    let state = AddressState::parse("category=beauty&q=lip&sortBy=price");
    assert_eq!(
        state.active_filters(),
        vec![
            ActiveFilter::Search("lip".to_string()),
            ActiveFilter::Category("beauty".to_string()),
        ]
    );
}

#[test]
fn clear_filters_returns_to_default_view() {
    let mut state = AddressState::parse("page=4&category=beauty&q=lip&sortBy=price&order=asc");
    state.clear_filters();
    assert!(state.active_filters().is_empty());
    assert_eq!(state.page, 1);
}
