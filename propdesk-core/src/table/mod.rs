//! Generic tabular data engine: search, sort, selection and rendering over
//! any [`Record`](crate::record::Record) type.

pub mod column;
pub mod engine;
pub mod search;
pub mod selection;
pub mod sort;

pub use column::{Column, Rendered, Tone};
pub use engine::{
    DataTable, HeaderCell, RowView, TableAction, TableBody, TableConfig, TableEvent, TableView,
};
pub use search::{matches_search, search_records};
pub use selection::Selection;
pub use sort::{compare_nulls_last, sort_records, SortDirection, SortState};

use thiserror::Error;

/// Table construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("a table needs at least one column")]
    NoColumns,

    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),
}
