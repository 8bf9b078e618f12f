//! Filter pipeline stages that run before the table engine.
//!
//! - `predicate`: pure record tests (date bucket, plan, status)
//! - `context`: the global filter state shared by every admin view
//! - `quick`: per-view, single-select secondary filters with live counts

pub mod context;
pub mod predicate;
pub mod quick;

pub use context::{apply_global, FilterContext, FilterFields, FilterState};
pub use predicate::{
    in_date_range, in_date_range_named, matches_exact, resolve_timestamp, DateRange, ALL,
};
pub use quick::{QuickFilter, QuickFilterCount, QuickFilterSet};

use thiserror::Error;

/// Errors from filter configuration. Predicates themselves never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown date range bucket: {0}")]
    UnknownDateRange(String),

    #[error("unknown quick filter: {0}")]
    UnknownQuickFilter(String),

    #[error("duplicate quick filter id: {0}")]
    DuplicateQuickFilter(String),
}
