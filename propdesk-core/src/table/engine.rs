//! The tabular data engine.
//!
//! Given records that already passed the global and quick filters, the engine
//! applies, in this fixed order:
//! 1. free-text search (when enabled)
//! 2. stable column sort (when a sort key is set)
//! 3. selection accounting
//! 4. cell rendering
//!
//! State machine per mount: `Loading → {Empty, Populated}`. While loading the
//! engine renders a skeleton and ignores every interaction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::column::{Column, Rendered};
use super::search::search_records;
use super::selection::Selection;
use super::sort::{sort_records, SortDirection, SortState};
use super::TableError;
use crate::record::{KeySelector, Record};

/// Configuration surface a view sets when it embeds the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub searchable: bool,
    pub search_placeholder: String,
    pub selectable: bool,
    pub empty_message: String,
    pub skeleton_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            searchable: true,
            search_placeholder: "Search...".to_string(),
            selectable: false,
            empty_message: "No results found.".to_string(),
            skeleton_rows: 5,
        }
    }
}

/// A user interaction routed to the engine. Indices refer to the visible
/// (searched and sorted) rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    Search(String),
    ToggleSort(String),
    /// Cell-local checkbox; never activates the row.
    ToggleRow(usize),
    ToggleAll,
    /// Row click; never touches the selection.
    Activate(usize),
}

/// What an action did. One action yields exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    SearchChanged,
    SortChanged(SortState),
    SelectionChanged { selected: usize },
    RowActivated { id: String, index: usize },
    Ignored,
}

/// Header cell state for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
    pub width: Option<u16>,
}

/// One rendered row.
#[derive(Debug, Clone)]
pub struct RowView<'a, T> {
    pub id: String,
    pub record: &'a T,
    pub selected: bool,
    pub cells: Vec<Rendered>,
}

/// Body of the table. `Skeleton` wins over `Empty`.
#[derive(Debug, Clone)]
pub enum TableBody<'a, T> {
    Skeleton { rows: usize, columns: usize },
    Empty { message: String, span: usize },
    Rows(Vec<RowView<'a, T>>),
}

/// Everything a front-end needs to draw the table once.
#[derive(Debug, Clone)]
pub struct TableView<'a, T> {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody<'a, T>,
    pub selectable: bool,
    pub all_selected: bool,
    pub visible: usize,
    pub search: String,
    pub search_placeholder: String,
}

/// Generic table over records of type `T`.
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    key: KeySelector<T>,
    config: TableConfig,
    search: String,
    sort: SortState,
    selection: Selection,
    loading: bool,
}

impl<T: Record> DataTable<T> {
    /// Rejects an empty column list and duplicate column keys.
    pub fn new(
        columns: Vec<Column<T>>,
        key: KeySelector<T>,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|prev| prev.key() == col.key()) {
                return Err(TableError::DuplicateColumn(col.key().to_string()));
            }
        }
        Ok(Self {
            columns,
            key,
            config,
            search: String::new(),
            sort: SortState::default(),
            selection: Selection::new(),
            loading: false,
        })
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn row_id(&self, record: &T) -> String {
        self.key.key_of(record)
    }

    /// Number of displayed columns, counting the checkbox column.
    pub fn display_columns(&self) -> usize {
        self.columns.len() + usize::from(self.config.selectable)
    }

    /// Returns false when search is disabled or the table is loading.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        if !self.config.searchable || self.loading {
            return false;
        }
        self.search = term.into();
        debug!(search = %self.search, "table search changed");
        true
    }

    /// Returns false for unknown or non-sortable columns, and while loading.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        if self.loading {
            return false;
        }
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key() == key && c.is_sortable());
        if !sortable {
            return false;
        }
        self.sort.toggle(key);
        debug!(key, direction = %self.sort.direction, "table sort changed");
        true
    }

    /// Search, then sort. Never mutates `records`.
    pub fn visible<'a>(&self, records: &[&'a T]) -> Vec<&'a T> {
        let searched = if self.config.searchable {
            search_records(records, &self.search)
        } else {
            records.to_vec()
        };
        sort_records(searched, &self.sort)
    }

    pub fn toggle_row(&mut self, record: &T) -> bool {
        if !self.config.selectable || self.loading {
            return false;
        }
        let id = self.row_id(record);
        self.selection.toggle(&id);
        true
    }

    /// Count-based "select all" over the visible rows.
    pub fn toggle_all(&mut self, visible: &[&T]) -> bool {
        if !self.config.selectable || self.loading {
            return false;
        }
        let ids = visible.iter().map(|r| self.row_id(r)).collect();
        self.selection.toggle_all(ids);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn all_selected(&self, visible: &[&T]) -> bool {
        self.selection.covers(visible.iter().map(|r| self.row_id(r)))
    }

    /// Route one interaction. `visible` is the output of [`DataTable::visible`]
    /// for the current state.
    pub fn handle(&mut self, action: TableAction, visible: &[&T]) -> TableEvent {
        if self.loading {
            return TableEvent::Ignored;
        }
        match action {
            TableAction::Search(term) => {
                if self.set_search(term) {
                    TableEvent::SearchChanged
                } else {
                    TableEvent::Ignored
                }
            }
            TableAction::ToggleSort(key) => {
                if self.toggle_sort(&key) {
                    TableEvent::SortChanged(self.sort.clone())
                } else {
                    TableEvent::Ignored
                }
            }
            TableAction::ToggleRow(index) => match visible.get(index) {
                Some(record) if self.toggle_row(record) => TableEvent::SelectionChanged {
                    selected: self.selection.len(),
                },
                _ => TableEvent::Ignored,
            },
            TableAction::ToggleAll => {
                if self.toggle_all(visible) {
                    TableEvent::SelectionChanged {
                        selected: self.selection.len(),
                    }
                } else {
                    TableEvent::Ignored
                }
            }
            TableAction::Activate(index) => match visible.get(index) {
                Some(record) => TableEvent::RowActivated {
                    id: self.row_id(record),
                    index,
                },
                None => TableEvent::Ignored,
            },
        }
    }

    fn headers(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key().to_string(),
                label: c.header().to_string(),
                sortable: c.is_sortable(),
                sorted: self.sort.direction_for(c.key()),
                width: c.width_hint(),
            })
            .collect()
    }

    /// Render the visible rows (or the skeleton / empty state).
    pub fn view<'a>(&self, visible: &[&'a T]) -> TableView<'a, T> {
        let body = if self.loading {
            TableBody::Skeleton {
                rows: self.config.skeleton_rows,
                columns: self.display_columns(),
            }
        } else if visible.is_empty() {
            TableBody::Empty {
                message: self.config.empty_message.clone(),
                span: self.display_columns(),
            }
        } else {
            TableBody::Rows(
                visible
                    .iter()
                    .map(|record| {
                        let id = self.row_id(record);
                        RowView {
                            selected: self.selection.contains(&id),
                            id,
                            record: *record,
                            cells: self.columns.iter().map(|c| c.cell(record)).collect(),
                        }
                    })
                    .collect(),
            )
        };
        TableView {
            headers: self.headers(),
            body,
            selectable: self.config.selectable,
            all_selected: !self.loading && self.all_selected(visible),
            visible: visible.len(),
            search: self.search.clone(),
            search_placeholder: self.config.search_placeholder.clone(),
        }
    }
}

impl<T> std::fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("key", &self.key)
            .field("config", &self.config)
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("loading", &self.loading)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Tone;
    use serde_json::{json, Value};

    fn table(config: TableConfig) -> DataTable<Value> {
        DataTable::new(
            vec![
                Column::new("id", "ID").sortable(),
                Column::new("name", "Trader").sortable(),
                Column::new("dd", "DD").sortable().render(|r: &Value| {
                    let dd = r["dd"].as_f64().unwrap_or(0.0);
                    Rendered::toned(format!("{dd}%"), Tone::Warning)
                }),
                Column::new("note", "Note"),
            ],
            KeySelector::field("id"),
            config,
        )
        .unwrap()
    }

    fn selectable() -> TableConfig {
        TableConfig {
            selectable: true,
            ..TableConfig::default()
        }
    }

    fn records() -> Vec<Value> {
        vec![
            json!({"id": "A-1", "name": "John Smith", "dd": 85}),
            json!({"id": "A-2", "name": "Ana Lee", "dd": 40}),
            json!({"id": "A-3", "name": "Raj Patel", "dd": null}),
        ]
    }

    fn ids(rows: &[&Value]) -> Vec<String> {
        rows.iter().map(|r| r["id"].as_str().unwrap().to_string()).collect()
    }

    #[test]
    fn rejects_duplicate_and_missing_columns() {
        let dup = DataTable::<Value>::new(
            vec![Column::new("id", "ID"), Column::new("id", "Again")],
            KeySelector::field("id"),
            TableConfig::default(),
        );
        assert_eq!(dup.unwrap_err(), TableError::DuplicateColumn("id".into()));

        let none =
            DataTable::<Value>::new(vec![], KeySelector::field("id"), TableConfig::default());
        assert_eq!(none.unwrap_err(), TableError::NoColumns);
    }

    #[test]
    fn search_then_sort() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(TableConfig::default());
        t.set_search("a");
        t.toggle_sort("name");
        // "a" hits every row via names; sorted by name ascending.
        assert_eq!(ids(&t.visible(&refs)), vec!["A-2", "A-1", "A-3"]);
        t.set_search("SMITH");
        assert_eq!(ids(&t.visible(&refs)), vec!["A-1"]);
    }

    #[test]
    fn search_disabled_ignores_term() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(TableConfig {
            searchable: false,
            ..TableConfig::default()
        });
        assert!(!t.set_search("smith"));
        assert_eq!(t.visible(&refs).len(), 3);
    }

    #[test]
    fn non_sortable_column_does_not_change_sort() {
        let mut t = table(TableConfig::default());
        assert!(!t.toggle_sort("note"));
        assert!(!t.toggle_sort("unknown"));
        assert_eq!(t.sort(), &SortState::default());
    }

    #[test]
    fn sort_nulls_last_descending() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(TableConfig::default());
        t.toggle_sort("dd");
        t.toggle_sort("dd");
        assert_eq!(ids(&t.visible(&refs)), vec!["A-1", "A-2", "A-3"]);
    }

    #[test]
    fn render_uses_column_renderer_or_field() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let t = table(TableConfig::default());
        let visible = t.visible(&refs);
        let TableBody::Rows(rows) = t.view(&visible).body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].cells[0].text, "A-1");
        assert_eq!(rows[0].cells[2].text, "85%");
        assert_eq!(rows[0].cells[2].tone, Tone::Warning);
        assert_eq!(rows[0].cells[3].text, "");
    }

    #[test]
    fn empty_state_spans_all_columns() {
        let t = table(selectable());
        let view = t.view(&[]);
        match view.body {
            TableBody::Empty { message, span } => {
                assert_eq!(message, "No results found.");
                assert_eq!(span, 5);
            }
            other => panic!("expected empty body, got {other:?}"),
        }
        assert!(!view.all_selected);
    }

    #[test]
    fn loading_wins_over_empty_and_blocks_interaction() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(selectable());
        t.set_loading(true);

        match t.view(&[]).body {
            TableBody::Skeleton { rows, columns } => {
                assert_eq!(rows, 5);
                assert_eq!(columns, 5);
            }
            other => panic!("expected skeleton, got {other:?}"),
        }

        let visible = t.visible(&refs);
        assert_eq!(t.handle(TableAction::ToggleAll, &visible), TableEvent::Ignored);
        assert_eq!(t.handle(TableAction::Activate(0), &visible), TableEvent::Ignored);
        assert_eq!(
            t.handle(TableAction::Search("x".into()), &visible),
            TableEvent::Ignored
        );
        assert!(t.selection().is_empty());
        assert_eq!(t.search(), "");
    }

    #[test]
    fn select_all_is_count_based() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(selectable());
        let visible = t.visible(&refs);

        t.handle(TableAction::ToggleAll, &visible);
        assert_eq!(t.selection().len(), 3);
        assert!(t.view(&visible).all_selected);

        t.handle(TableAction::ToggleRow(1), &visible);
        assert_eq!(t.selection().len(), 2);

        t.handle(TableAction::ToggleAll, &visible);
        assert_eq!(t.selection().len(), 3);

        t.handle(TableAction::ToggleAll, &visible);
        assert!(t.selection().is_empty());
    }

    #[test]
    fn select_all_clears_when_rows_lack_a_key() {
        let recs = vec![
            json!({"name": "John Smith"}),
            json!({"name": "Ana Lee"}),
            json!({"name": "Raj Patel"}),
        ];
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(selectable());
        let visible = t.visible(&refs);

        t.handle(TableAction::ToggleAll, &visible);
        assert_eq!(t.selection().len(), 1);
        assert!(t.view(&visible).all_selected);

        t.handle(TableAction::ToggleAll, &visible);
        assert!(t.selection().is_empty());
    }

    #[test]
    fn select_all_covers_only_visible_rows() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(selectable());
        t.set_search("smith");
        let visible = t.visible(&refs);
        t.handle(TableAction::ToggleAll, &visible);
        assert_eq!(t.selection().to_vec(), vec!["A-1".to_string()]);
    }

    #[test]
    fn stale_selection_survives_refiltering() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(selectable());
        let visible = t.visible(&refs);
        t.handle(TableAction::ToggleRow(2), &visible);
        t.set_search("smith");
        let narrowed = t.visible(&refs);
        assert_eq!(narrowed.len(), 1);
        assert!(t.selection().contains("A-3"));
    }

    #[test]
    fn checkbox_and_row_click_are_isolated() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(selectable());
        let visible = t.visible(&refs);

        let ev = t.handle(TableAction::ToggleRow(0), &visible);
        assert_eq!(ev, TableEvent::SelectionChanged { selected: 1 });

        let ev = t.handle(TableAction::Activate(1), &visible);
        assert_eq!(
            ev,
            TableEvent::RowActivated {
                id: "A-2".into(),
                index: 1
            }
        );
        assert_eq!(t.selection().len(), 1);
        assert!(!t.selection().contains("A-2"));
    }

    #[test]
    fn selection_disabled_ignores_toggles() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(TableConfig::default());
        let visible = t.visible(&refs);
        assert_eq!(t.handle(TableAction::ToggleRow(0), &visible), TableEvent::Ignored);
        assert_eq!(t.handle(TableAction::ToggleAll, &visible), TableEvent::Ignored);
        assert_eq!(t.display_columns(), 4);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let recs = records();
        let refs: Vec<&Value> = recs.iter().collect();
        let mut t = table(selectable());
        let visible = t.visible(&refs);
        assert_eq!(t.handle(TableAction::Activate(9), &visible), TableEvent::Ignored);
        assert_eq!(t.handle(TableAction::ToggleRow(9), &visible), TableEvent::Ignored);
    }

    #[test]
    fn headers_report_sort_direction() {
        let mut t = table(TableConfig::default());
        t.handle(TableAction::ToggleSort("name".into()), &[]);
        let view = t.view(&[]);
        assert_eq!(view.headers[1].sorted, Some(SortDirection::Asc));
        assert_eq!(view.headers[0].sorted, None);
        assert!(!view.headers[3].sortable);
    }
}
