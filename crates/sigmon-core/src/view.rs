//! View layer — filter, stable sort and pagination over the store.
//!
//! A [`ViewConfig`] is an immutable value describing what the caller wants to
//! see; [`view`] and [`filtered`] are pure functions of the store and that
//! value. Nothing here mutates the store.
//!
//! # Matching
//!
//! - The text query is a case-insensitive substring match against the symbol,
//!   the origin address and the side label (`BUY` / `SELL`). An empty query
//!   matches everything.
//! - The status filter is either `all` or an exact status.
//!
//! # Ordering
//!
//! Strings compare case-insensitively, numbers and timestamps by natural
//! order. The sort is stable: records with equal keys keep their relative
//! store order (newest first) in both directions.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::store::Store;
use crate::types::{SignalRecord, SignalStatus};
use crate::Error;

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(SignalStatus),
}

impl StatusFilter {
    pub fn matches(self, status: SignalStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Cycle `all → sent → failed → pending → all`.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(SignalStatus::Sent),
            StatusFilter::Only(SignalStatus::Sent) => StatusFilter::Only(SignalStatus::Failed),
            StatusFilter::Only(SignalStatus::Failed) => StatusFilter::Only(SignalStatus::Pending),
            StatusFilter::Only(SignalStatus::Pending) => StatusFilter::All,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

// ---------------------------------------------------------------------------
// Sort key
// ---------------------------------------------------------------------------

/// Column a view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Timestamp,
    Symbol,
    Side,
    Volume,
    Price,
    Origin,
    Status,
}

impl SortField {
    /// Columns in display order.
    pub const ALL: [SortField; 7] = [
        SortField::Timestamp,
        SortField::Symbol,
        SortField::Side,
        SortField::Volume,
        SortField::Price,
        SortField::Origin,
        SortField::Status,
    ];

    /// Column heading.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Timestamp => "Timestamp",
            SortField::Symbol => "Symbol",
            SortField::Side => "Type",
            SortField::Volume => "Volume",
            SortField::Price => "Price",
            SortField::Origin => "IP Address",
            SortField::Status => "Status",
        }
    }

    fn compare(self, a: &SignalRecord, b: &SignalRecord) -> Ordering {
        match self {
            SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortField::Symbol => cmp_ignore_case(&a.symbol, &b.symbol),
            SortField::Side => cmp_ignore_case(a.side.label(), b.side.label()),
            SortField::Volume => a.volume.total_cmp(&b.volume),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Origin => cmp_ignore_case(&a.origin, &b.origin),
            SortField::Status => cmp_ignore_case(a.status.label(), b.status.label()),
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "timestamp" | "time" => Ok(SortField::Timestamp),
            "symbol" => Ok(SortField::Symbol),
            "side" | "type" => Ok(SortField::Side),
            "volume" => Ok(SortField::Volume),
            "price" => Ok(SortField::Price),
            "origin" | "ip" => Ok(SortField::Origin),
            "status" => Ok(SortField::Status),
            _ => Err(Error::unknown("sort field", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self::new(SortField::Timestamp, SortDirection::Desc)
    }
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click semantics: the active field flips direction, any other
    /// field becomes active in descending order.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Desc)
        }
    }

    fn compare(self, a: &SignalRecord, b: &SignalRecord) -> Ordering {
        let ord = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// ---------------------------------------------------------------------------
// View configuration
// ---------------------------------------------------------------------------

/// Text filter, status filter and sort key for a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewConfig {
    pub query: String,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl ViewConfig {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Apply header-click semantics for `field`.
    pub fn toggle_sort(mut self, field: SortField) -> Self {
        self.sort = self.sort.toggled(field);
        self
    }

    /// True when `record` passes both the text and the status predicate.
    pub fn matches(&self, record: &SignalRecord) -> bool {
        self.status.matches(record.status) && self.matches_query(record, &self.query.to_lowercase())
    }

    fn matches_query(&self, record: &SignalRecord, needle: &str) -> bool {
        needle.is_empty()
            || contains_ignore_case(&record.symbol, needle)
            || contains_ignore_case(&record.origin, needle)
            || contains_ignore_case(record.side.label(), needle)
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One page of a view plus the bounds needed to paginate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub records: Vec<&'a SignalRecord>,
    /// 1-based page number actually served (after clamping).
    pub page: usize,
    pub page_size: usize,
    /// Number of records matching the filters, across all pages.
    pub total_matching: usize,
    pub total_pages: usize,
}

impl Page<'_> {
    /// 1-based inclusive `(first, last)` positions of this page within the
    /// matching set, or `None` when nothing matches.
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.records.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.records.len() - 1))
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `total` records, `ceil(total / page_size)`.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

// ---------------------------------------------------------------------------
// Pure view functions
// ---------------------------------------------------------------------------

/// Records passing `config`'s filters, in sorted order. Not paginated.
pub fn filtered<'a, I>(records: I, config: &ViewConfig) -> Vec<&'a SignalRecord>
where
    I: IntoIterator<Item = &'a SignalRecord>,
{
    let needle = config.query.to_lowercase();
    let mut out: Vec<&SignalRecord> = records
        .into_iter()
        .filter(|r| config.status.matches(r.status) && config.matches_query(r, &needle))
        .collect();
    // `sort_by` is stable, and reversing an `Equal` ordering keeps it `Equal`.
    out.sort_by(|a, b| config.sort.compare(a, b));
    out
}

/// Filter, sort and slice the store to a single 1-based page.
///
/// Page 0 is served as page 1, a page past the end is clamped to the last
/// page, and a page size of 0 is treated as 1.
pub fn view<'a>(store: &'a Store, config: &ViewConfig, page: usize, page_size: usize) -> Page<'a> {
    let page_size = page_size.max(1);
    let matching = filtered(store.iter(), config);
    let total_matching = matching.len();
    let total_pages = total_pages(total_matching, page_size);
    let page = page.clamp(1, total_pages.max(1));

    let records = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        records,
        page,
        page_size,
        total_matching,
        total_pages,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
