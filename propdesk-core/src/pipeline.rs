//! One pass of the layered filter pipeline.
//!
//! ```text
//! records ─▶ global filters ─▶ quick-filter counts
//!                      └─────▶ active quick filter ─▶ table engine
//! ```
//!
//! Badges and rows come out of the same call, so they always describe the
//! same committed global state.

use chrono::{DateTime, TimeZone};
use tracing::trace;

use crate::filter::{apply_global, FilterFields, FilterState, QuickFilterCount, QuickFilterSet};
use crate::record::Record;

/// Output of [`derive`].
#[derive(Debug, Clone)]
pub struct Derived<'a, T> {
    /// Records passing every global axis.
    pub global: Vec<&'a T>,
    /// Badge counts, computed over `global`.
    pub counts: Vec<QuickFilterCount>,
    /// `global` narrowed by the active quick filter; feeds the table engine.
    pub narrowed: Vec<&'a T>,
}

pub fn derive<'a, T: Record, Tz: TimeZone>(
    records: &'a [T],
    filters: &FilterState,
    fields: &FilterFields,
    quick: &QuickFilterSet<T>,
    now: &DateTime<Tz>,
) -> Derived<'a, T> {
    let global = apply_global(records, filters, fields, now);
    let counts = quick.counts(&global);
    let narrowed = quick.apply(&global);
    trace!(
        total = records.len(),
        global = global.len(),
        narrowed = narrowed.len(),
        quick = ?quick.active(),
        "pipeline derived"
    );
    Derived {
        global,
        counts,
        narrowed,
    }
}
