//! Domain-specific assertion macros for sigmon harnesses.
//!
//! These add context-rich failure messages that say which ordering or
//! filtering rule a view broke.

use sigmon_core::SignalRecord;

/// Assert that a slice of records is ordered by a key, ascending or
/// descending.
///
/// ```rust
/// assert_sorted_by!(records, |r| r.volume, desc);
/// ```
#[macro_export]
macro_rules! assert_sorted_by {
    ($records:expr, $key:expr, asc) => {{
        let records: &[&sigmon_core::SignalRecord] = &$records;
        let key = $key;
        for pair in records.windows(2) {
            if key(pair[0]) > key(pair[1]) {
                panic!(
                    "assert_sorted_by!(asc) failed: id {} comes before id {}",
                    pair[0].id, pair[1].id
                );
            }
        }
    }};
    ($records:expr, $key:expr, desc) => {{
        let records: &[&sigmon_core::SignalRecord] = &$records;
        let key = $key;
        for pair in records.windows(2) {
            if key(pair[0]) < key(pair[1]) {
                panic!(
                    "assert_sorted_by!(desc) failed: id {} comes before id {}",
                    pair[0].id, pair[1].id
                );
            }
        }
    }};
}

/// Assert that every record in a view satisfies a predicate.
#[macro_export]
macro_rules! assert_all_records {
    ($records:expr, $pred:expr) => {{
        let records: &[&sigmon_core::SignalRecord] = &$records;
        let pred = $pred;
        let failing: Vec<u64> = records.iter().filter(|r| !pred(**r)).map(|r| r.id).collect();
        if !failing.is_empty() {
            panic!(
                "assert_all_records! failed: ids {:?} of {} records did not satisfy predicate",
                failing,
                records.len()
            );
        }
    }};
}

/// Ids of `records` in order.
pub fn ids(records: &[&SignalRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}
