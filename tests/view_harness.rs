//! View layer integration harness: filter, sort, paginate.
//!
//! # What this covers
//!
//! - **Text filter**: case-insensitive substring over symbol, origin and side;
//!   an empty query matches everything.
//! - **Status filter** combined with the text filter by logical AND.
//! - **Sort**: every column, both directions; ties keep store order
//!   (stable) in both directions.
//! - **Toggle**: same field flips, new field starts descending.
//! - **Pagination**: 1-based pages, `ceil(n / size)` total, clamping of
//!   out-of-range page numbers, and pages that partition the matching set.
//!
//! # Running
//!
//! ```sh
//! cargo test --test view_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use sigmon_core::view::{self, total_pages};
use sigmon_core::{
    Monitor, SignalStatus, SortDirection, SortField, SortKey, StatusFilter, Store, ViewConfig,
};

fn seeded() -> Store {
    Store::seeded(20)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[rstest]
#[case("", 5)]
#[case("eur", 2)]
#[case("EUR", 2)]
#[case("usd", 5)]
#[case("jpy", 1)]
#[case("192.168.1.10", 5)]
#[case(".103", 1)]
#[case("sell", 2)]
#[case("xyz", 0)]
fn text_filter_counts(#[case] query: &str, #[case] expected: usize) {
    let store = seeded();
    let config = ViewConfig::default().with_query(query);
    assert_eq!(view::filtered(store.iter(), &config).len(), expected);
}

#[rstest]
#[case(StatusFilter::All, 5)]
#[case(StatusFilter::Only(SignalStatus::Sent), 3)]
#[case(StatusFilter::Only(SignalStatus::Failed), 1)]
#[case(StatusFilter::Only(SignalStatus::Pending), 1)]
fn status_filter_counts(#[case] status: StatusFilter, #[case] expected: usize) {
    let store = seeded();
    let config = ViewConfig::default().with_status(status);
    let records = view::filtered(store.iter(), &config);
    assert_eq!(records.len(), expected);
    assert_all_records!(records, |r: &sigmon_core::SignalRecord| status.matches(r.status));
}

#[test]
fn filters_combine_with_and() {
    let store = seeded();
    let config = ViewConfig::default()
        .with_query("eur")
        .with_status(StatusFilter::Only(SignalStatus::Pending));
    let records = view::filtered(store.iter(), &config);
    assert_eq!(ids(&records), [1]);

    let none = ViewConfig::default()
        .with_query("eur")
        .with_status(StatusFilter::Only(SignalStatus::Failed));
    let page = view::view(&store, &none, 1, 10);
    assert!(page.records.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.showing_range(), None);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn default_sort_is_timestamp_descending() {
    let store = seeded();
    let records = view::filtered(store.iter(), &ViewConfig::default());
    assert_eq!(ids(&records), [5, 4, 3, 2, 1]);
    assert_sorted_by!(records, |r: &sigmon_core::SignalRecord| r.timestamp, desc);
}

#[test]
fn volume_desc_then_asc() {
    let store = seeded();
    let desc = ViewConfig::default().with_sort(SortKey::new(SortField::Volume, SortDirection::Desc));
    let vols: Vec<f64> = view::filtered(store.iter(), &desc).iter().map(|r| r.volume).collect();
    assert_eq!(vols, [0.2, 0.15, 0.1, 0.08, 0.05]);

    let asc = desc.toggle_sort(SortField::Volume);
    let vols: Vec<f64> = view::filtered(store.iter(), &asc).iter().map(|r| r.volume).collect();
    assert_eq!(vols, [0.05, 0.08, 0.1, 0.15, 0.2]);
}

#[test]
fn symbol_ties_keep_store_order_in_both_directions() {
    let store = seeded();
    let asc = ViewConfig::default().with_sort(SortKey::new(SortField::Symbol, SortDirection::Asc));
    let records = view::filtered(store.iter(), &asc);
    let symbols: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, ["AUDUSD", "EURUSD", "EURUSD", "GBPUSD", "USDJPY"]);
    // The two EURUSD rows keep store order (newest first) in ascending...
    assert_eq!(ids(&records[1..3]), [5, 1]);

    let desc = asc.toggle_sort(SortField::Symbol);
    let records = view::filtered(store.iter(), &desc);
    // ...and in descending.
    assert_eq!(ids(&records), [3, 4, 5, 1, 2]);
}

#[test]
fn string_columns_compare_case_insensitively() {
    let mut store = Store::new(10);
    store.push(SignalBuilder::new("bbb").build());
    store.push(SignalBuilder::new("AAA").build());
    store.push(SignalBuilder::new("Ccc").build());
    let config = ViewConfig::default().with_sort(SortKey::new(SortField::Symbol, SortDirection::Asc));
    let symbols: Vec<String> = view::filtered(store.iter(), &config)
        .iter()
        .map(|r| r.symbol.clone())
        .collect();
    assert_eq!(symbols, ["AAA", "bbb", "Ccc"]);
}

#[rstest]
#[case(SortField::Timestamp)]
#[case(SortField::Symbol)]
#[case(SortField::Side)]
#[case(SortField::Volume)]
#[case(SortField::Price)]
#[case(SortField::Origin)]
#[case(SortField::Status)]
fn every_column_sorts_without_dropping_records(#[case] field: SortField) {
    let store = store_with(50, 50);
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let config = ViewConfig::default().with_sort(SortKey::new(field, direction));
        assert_eq!(view::filtered(store.iter(), &config).len(), 50);
    }
}

#[test]
fn toggle_semantics() {
    let key = SortKey::default();
    assert_eq!(key, SortKey::new(SortField::Timestamp, SortDirection::Desc));
    let flipped = key.toggled(SortField::Timestamp);
    assert_eq!(flipped.direction, SortDirection::Asc);
    let switched = flipped.toggled(SortField::Price);
    assert_eq!(switched, SortKey::new(SortField::Price, SortDirection::Desc));
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[rstest]
#[case(0, 10, 0)]
#[case(5, 10, 1)]
#[case(10, 10, 1)]
#[case(11, 10, 2)]
#[case(25, 10, 3)]
#[case(7, 1, 7)]
fn total_pages_is_ceiling(#[case] total: usize, #[case] size: usize, #[case] expected: usize) {
    assert_eq!(total_pages(total, size), expected);
}

#[test]
fn pages_of_twenty_five_records() {
    let store = store_with(25, 25);
    let config = ViewConfig::default();

    let p1 = view::view(&store, &config, 1, 10);
    assert_eq!(p1.records.len(), 10);
    assert_eq!(p1.total_pages, 3);
    assert_eq!(p1.showing_range(), Some((1, 10)));
    assert!(!p1.has_prev() && p1.has_next());

    let p3 = view::view(&store, &config, 3, 10);
    assert_eq!(p3.records.len(), 5);
    assert_eq!(p3.showing_range(), Some((21, 25)));
    assert!(p3.has_prev() && !p3.has_next());
}

#[test]
fn out_of_range_pages_are_clamped() {
    let store = store_with(25, 25);
    let config = ViewConfig::default();
    assert_eq!(view::view(&store, &config, 0, 10).page, 1);
    assert_eq!(view::view(&store, &config, 99, 10).page, 3);
    let zero_size = view::view(&store, &config, 1, 0);
    assert_eq!(zero_size.page_size, 1);
    assert_eq!(zero_size.records.len(), 1);
}

#[test]
fn view_does_not_mutate_the_store() {
    let mut monitor = Monitor::new(store_with(20, 20));
    let before: Vec<u64> = monitor.store().iter().map(|r| r.id).collect();
    monitor.set_sort(SortField::Price);
    monitor.set_query("usd");
    let _ = monitor.view(2, 5);
    let after: Vec<u64> = monitor.store().iter().map(|r| r.id).collect();
    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn any_field() -> impl Strategy<Value = SortField> {
    prop::sample::select(SortField::ALL.to_vec())
}

proptest! {
    #[test]
    fn pages_partition_the_matching_set(
        n in 0usize..80,
        size in 1usize..15,
        field in any_field(),
        asc in any::<bool>(),
    ) {
        let store = store_with(100, n);
        let direction = if asc { SortDirection::Asc } else { SortDirection::Desc };
        let config = ViewConfig::default().with_sort(SortKey::new(field, direction));
        let all = ids(&view::filtered(store.iter(), &config));

        let pages = total_pages(all.len(), size);
        let mut joined = Vec::new();
        for p in 1..=pages {
            joined.extend(ids(&view::view(&store, &config, p, size).records));
        }
        prop_assert_eq!(joined, all);
    }

    #[test]
    fn filtered_records_all_match(n in 0usize..60, query in "[a-z0-9.]{0,3}") {
        let store = store_with(60, n);
        let config = ViewConfig::default().with_query(query.clone());
        for r in view::filtered(store.iter(), &config) {
            let q = query.to_lowercase();
            prop_assert!(
                r.symbol.to_lowercase().contains(&q)
                    || r.origin.to_lowercase().contains(&q)
                    || r.side.label().to_lowercase().contains(&q)
            );
        }
    }
}
