//! PropDesk Core: the data layer behind the prop-firm admin console.
//!
//! Records flow through three stages before they reach the screen:
//! - global filters (date bucket, plan, status) from the session's [`filter::FilterContext`]
//! - one optional view-local quick filter, with live count badges
//! - the [`table::DataTable`] engine: search, stable sort, selection, rendering
//!
//! Everything is synchronous and pure over borrowed records; the engine never
//! mutates its input and caches nothing between calls.

pub mod config;
pub mod domain;
pub mod filter;
pub mod pipeline;
pub mod record;
pub mod sample;
pub mod table;
pub mod value;

pub use config::{AppConfig, ConfigError};
pub use filter::{
    DateRange, FilterContext, FilterError, FilterFields, FilterState, QuickFilter,
    QuickFilterCount, QuickFilterSet, ALL,
};
pub use pipeline::{derive, Derived};
pub use record::{KeySelector, Record};
pub use table::{
    Column, DataTable, Rendered, SortDirection, SortState, TableAction, TableBody, TableConfig,
    TableError, TableEvent, TableView, Tone,
};
pub use value::CellValue;
