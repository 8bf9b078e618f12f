//! Admin session: the state that lives while the console is mounted.
//!
//! Entering the console creates a fresh [`AdminSession`] (new filter context,
//! new per-view table state); leaving drops it. Nothing here survives a
//! remount.

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use propdesk_core::config::AppConfig;
use propdesk_core::sample::SampleSet;
use propdesk_core::table::HeaderCell;
use propdesk_core::{
    derive, Column, DataTable, FilterContext, FilterFields, FilterState, KeySelector,
    QuickFilterSet, Record, Rendered, TableAction, TableBody, TableConfig, TableEvent,
};

use crate::views::{self, ViewKind};

/// One quick-filter pill with its live count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPill {
    pub id: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub id: String,
    pub selected: bool,
    pub cells: Vec<Rendered>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotBody {
    Skeleton { rows: usize, columns: usize },
    Empty { message: String, span: usize },
    Rows(Vec<RowSnapshot>),
}

/// Owned, type-erased render data for one view.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub kind: ViewKind,
    pub headers: Vec<HeaderCell>,
    pub body: SnapshotBody,
    pub quick: Vec<QuickPill>,
    pub search: String,
    pub search_placeholder: String,
    pub selectable: bool,
    pub all_selected: bool,
    pub selected: usize,
    pub visible: usize,
    pub global: usize,
    pub total: usize,
    pub cursor: usize,
    pub column: usize,
}

/// What the session needs from a view, independent of its record type.
pub trait AdminView {
    fn snapshot(&self, filters: &FilterState, now: &DateTime<Local>) -> ViewSnapshot;
    /// Route one table interaction over the rows currently visible.
    fn act(&mut self, action: TableAction, filters: &FilterState, now: &DateTime<Local>)
        -> TableEvent;
    fn move_cursor(&mut self, delta: isize, filters: &FilterState, now: &DateTime<Local>);
    fn move_column(&mut self, delta: isize);
    fn column_key(&self) -> Option<String>;
    fn cursor(&self) -> usize;
    fn search(&self) -> &str;
    fn cycle_quick(&mut self) -> Option<String>;
    fn clear_selection(&mut self);
    fn detail(&self, id: &str) -> Option<Vec<(String, String)>>;
}

pub struct ViewState<T> {
    kind: ViewKind,
    records: Vec<T>,
    fields: FilterFields,
    quick: QuickFilterSet<T>,
    table: DataTable<T>,
    cursor: usize,
    column: usize,
}

impl<T: Record> ViewState<T> {
    pub fn new(
        kind: ViewKind,
        columns: Vec<Column<T>>,
        quick: QuickFilterSet<T>,
        config: TableConfig,
    ) -> Result<Self> {
        let mut table = DataTable::new(columns, KeySelector::field("id"), config)?;
        table.set_loading(true);
        Ok(Self {
            kind,
            records: Vec::new(),
            fields: kind.filter_fields(),
            quick,
            table,
            cursor: 0,
            column: 0,
        })
    }

    pub fn load(&mut self, records: Vec<T>) {
        self.records = records;
        self.cursor = 0;
        self.table.set_loading(false);
    }

    fn visible<'a>(&'a self, filters: &FilterState, now: &DateTime<Local>) -> Vec<&'a T> {
        let derived = derive(&self.records, filters, &self.fields, &self.quick, now);
        self.table.visible(&derived.narrowed)
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

impl<T: Record + Serialize> AdminView for ViewState<T> {
    fn snapshot(&self, filters: &FilterState, now: &DateTime<Local>) -> ViewSnapshot {
        let derived = derive(&self.records, filters, &self.fields, &self.quick, now);
        let visible = self.table.visible(&derived.narrowed);
        let view = self.table.view(&visible);
        let active = self.quick.active();
        let quick = derived
            .counts
            .into_iter()
            .map(|c| QuickPill {
                active: active == Some(c.id.as_str()),
                id: c.id,
                label: c.label,
                count: c.count,
            })
            .collect();
        let body = match view.body {
            TableBody::Skeleton { rows, columns } => SnapshotBody::Skeleton { rows, columns },
            TableBody::Empty { message, span } => SnapshotBody::Empty { message, span },
            TableBody::Rows(rows) => SnapshotBody::Rows(
                rows.into_iter()
                    .map(|r| RowSnapshot {
                        id: r.id,
                        selected: r.selected,
                        cells: r.cells,
                    })
                    .collect(),
            ),
        };
        ViewSnapshot {
            kind: self.kind,
            headers: view.headers,
            body,
            quick,
            search: view.search,
            search_placeholder: view.search_placeholder,
            selectable: view.selectable,
            all_selected: view.all_selected,
            selected: self.table.selection().len(),
            visible: view.visible,
            global: derived.global.len(),
            total: self.records.len(),
            cursor: clamp_cursor(self.cursor, visible.len()),
            column: self.column,
        }
    }

    fn act(
        &mut self,
        action: TableAction,
        filters: &FilterState,
        now: &DateTime<Local>,
    ) -> TableEvent {
        let derived = derive(&self.records, filters, &self.fields, &self.quick, now);
        let visible = self.table.visible(&derived.narrowed);
        let event = self.table.handle(action, &visible);
        if matches!(event, TableEvent::SearchChanged | TableEvent::SortChanged(_)) {
            self.cursor = 0;
        }
        event
    }

    fn move_cursor(&mut self, delta: isize, filters: &FilterState, now: &DateTime<Local>) {
        let len = self.visible(filters, now).len();
        let current = clamp_cursor(self.cursor, len) as isize;
        self.cursor = clamp_cursor((current + delta).max(0) as usize, len);
    }

    fn move_column(&mut self, delta: isize) {
        let len = self.table.columns().len() as isize;
        self.column = (self.column as isize + delta).rem_euclid(len) as usize;
    }

    fn column_key(&self) -> Option<String> {
        self.table
            .columns()
            .get(self.column)
            .map(|c| c.key().to_string())
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn search(&self) -> &str {
        self.table.search()
    }

    fn cycle_quick(&mut self) -> Option<String> {
        self.quick.cycle();
        self.cursor = 0;
        self.quick.active().map(str::to_string)
    }

    fn clear_selection(&mut self) {
        self.table.clear_selection();
    }

    fn detail(&self, id: &str) -> Option<Vec<(String, String)>> {
        let record = self.records.iter().find(|r| self.table.row_id(r) == id)?;
        let serde_json::Value::Object(map) = serde_json::to_value(record).ok()? else {
            return None;
        };
        Some(
            map.into_iter()
                .map(|(k, v)| {
                    let text = match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (k, text)
                })
                .collect(),
        )
    }
}

// ── Session ──────────────────────────────────────────────────────────

pub struct AdminSession {
    /// Loader request this session is waiting on.
    pub request: u64,
    filters: FilterContext,
    active: ViewKind,
    loaded: bool,
    accounts: ViewState<propdesk_core::domain::Account>,
    payouts: ViewState<propdesk_core::domain::Payout>,
    alerts: ViewState<propdesk_core::domain::RiskAlert>,
}

impl AdminSession {
    pub fn new(request: u64, config: &AppConfig) -> Result<Self> {
        let table = |selectable| config.table.table_config(true, selectable);
        debug!(request, "admin session mounted");
        Ok(Self {
            request,
            filters: FilterContext::new(config.filters.clone()),
            active: ViewKind::Accounts,
            loaded: false,
            accounts: ViewState::new(
                ViewKind::Accounts,
                views::account_columns(),
                views::account_quick_filters()?,
                table(true),
            )?,
            payouts: ViewState::new(
                ViewKind::Payouts,
                views::payout_columns(),
                views::payout_quick_filters()?,
                table(true),
            )?,
            alerts: ViewState::new(
                ViewKind::Alerts,
                views::alert_columns(),
                views::alert_quick_filters()?,
                table(false),
            )?,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load(&mut self, set: SampleSet) {
        self.accounts.load(set.accounts);
        self.payouts.load(set.payouts);
        self.alerts.load(set.alerts);
        self.loaded = true;
    }

    pub fn filters(&self) -> &FilterContext {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterContext {
        &mut self.filters
    }

    pub fn active_kind(&self) -> ViewKind {
        self.active
    }

    pub fn switch_to(&mut self, kind: ViewKind) {
        self.active = kind;
    }

    pub fn view(&self) -> &dyn AdminView {
        match self.active {
            ViewKind::Accounts => &self.accounts,
            ViewKind::Payouts => &self.payouts,
            ViewKind::Alerts => &self.alerts,
        }
    }

    pub fn view_mut(&mut self) -> &mut dyn AdminView {
        match self.active {
            ViewKind::Accounts => &mut self.accounts,
            ViewKind::Payouts => &mut self.payouts,
            ViewKind::Alerts => &mut self.alerts,
        }
    }

    pub fn snapshot(&self, now: &DateTime<Local>) -> ViewSnapshot {
        self.view().snapshot(self.filters.filters(), now)
    }

    /// Route a table action to the active view with the current filters.
    pub fn act(&mut self, action: TableAction, now: &DateTime<Local>) -> TableEvent {
        let filters = self.filters.filters().clone();
        self.view_mut().act(action, &filters, now)
    }

    pub fn move_cursor(&mut self, delta: isize, now: &DateTime<Local>) {
        let filters = self.filters.filters().clone();
        self.view_mut().move_cursor(delta, &filters, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use propdesk_core::config::SampleConfig;
    use propdesk_core::sample::sample_set;
    use propdesk_core::DateRange;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    /// Id of the row under the cursor, if any.
    fn cursor_row_id(session: &AdminSession) -> Option<String> {
        let snap = session.snapshot(&now());
        match snap.body {
            SnapshotBody::Rows(rows) => rows.get(snap.cursor).map(|r| r.id.clone()),
            _ => None,
        }
    }

    fn loaded_session() -> AdminSession {
        let config = AppConfig::default();
        let mut session = AdminSession::new(1, &config).unwrap();
        let set = sample_set(&SampleConfig::default(), now().with_timezone(&chrono::Utc));
        session.load(set);
        session.filters_mut().set_date_range(DateRange::Custom);
        session
    }

    #[test]
    fn new_session_starts_loading() {
        let session = AdminSession::new(1, &AppConfig::default()).unwrap();
        assert!(!session.is_loaded());
        match session.snapshot(&now()).body {
            SnapshotBody::Skeleton { rows, columns } => {
                assert_eq!(rows, 5);
                assert_eq!(columns, views::account_columns().len() + 1);
            }
            other => panic!("expected skeleton, got {other:?}"),
        }
    }

    #[test]
    fn loading_session_ignores_actions() {
        let mut session = AdminSession::new(1, &AppConfig::default()).unwrap();
        assert_eq!(
            session.act(TableAction::ToggleAll, &now()),
            TableEvent::Ignored
        );
    }

    #[test]
    fn snapshot_counts_match_rows() {
        let mut session = loaded_session();
        let snap = session.snapshot(&now());
        assert_eq!(snap.total, 120);
        assert_eq!(snap.global, 120);
        let funded = snap.quick.iter().find(|p| p.id == "funded").unwrap().count;

        // All → high-dd → funded
        session.view_mut().cycle_quick();
        assert_eq!(session.view_mut().cycle_quick().as_deref(), Some("funded"));
        let snap = session.snapshot(&now());
        assert_eq!(snap.visible, funded);
        assert!(snap.quick.iter().any(|p| p.id == "funded" && p.active));
    }

    #[test]
    fn global_filters_are_shared_across_views() {
        let mut session = loaded_session();
        session.filters_mut().set_plan_filter("Dynasty");
        session.switch_to(ViewKind::Payouts);
        let snap = session.snapshot(&now());
        assert_eq!(snap.kind, ViewKind::Payouts);
        if let SnapshotBody::Rows(rows) = &snap.body {
            // Plan column is the fourth on the payouts view.
            assert!(rows.iter().all(|r| r.cells[3].text == "Dynasty"));
        }
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut session = loaded_session();
        session.move_cursor(-5, &now());
        assert_eq!(session.view().cursor(), 0);
        session.move_cursor(10_000, &now());
        let snap = session.snapshot(&now());
        assert_eq!(snap.cursor, snap.visible - 1);
    }

    #[test]
    fn toggle_row_uses_cursor_row() {
        let mut session = loaded_session();
        session.move_cursor(2, &now());
        let id = cursor_row_id(&session).unwrap();
        let cursor = session.view().cursor();
        let event = session.act(TableAction::ToggleRow(cursor), &now());
        assert_eq!(event, TableEvent::SelectionChanged { selected: 1 });
        match session.snapshot(&now()).body {
            SnapshotBody::Rows(rows) => assert!(rows[2].selected && rows[2].id == id),
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn column_cursor_wraps() {
        let mut session = loaded_session();
        session.view_mut().move_column(-1);
        assert_eq!(session.view().column_key().as_deref(), Some("created_at"));
        session.view_mut().move_column(1);
        assert_eq!(session.view().column_key().as_deref(), Some("id"));
    }

    #[test]
    fn detail_lists_serialized_fields() {
        let session = loaded_session();
        let id = cursor_row_id(&session).unwrap();
        let detail = session.view().detail(&id).unwrap();
        assert!(detail.iter().any(|(k, v)| k == "id" && *v == id));
        assert!(detail.iter().any(|(k, _)| k == "email"));
        assert!(session.view().detail("nope").is_none());
    }

    #[test]
    fn alerts_view_has_no_selection_column() {
        let mut session = loaded_session();
        session.switch_to(ViewKind::Alerts);
        let snap = session.snapshot(&now());
        assert!(!snap.selectable);
        assert_eq!(
            session.act(TableAction::ToggleAll, &now()),
            TableEvent::Ignored
        );
    }
}
