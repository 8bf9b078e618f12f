//! End-to-end scenarios: records through global filters, quick filters and the
//! table engine, the way an admin view drives them.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use propdesk_core::config::SampleConfig;
use propdesk_core::domain::{Account, AccountStatus};
use propdesk_core::sample::sample_set;
use propdesk_core::{
    derive, Column, DataTable, DateRange, FilterContext, FilterFields, KeySelector, QuickFilter,
    QuickFilterSet, Record, TableAction, TableBody, TableConfig, TableEvent,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

fn high_dd() -> QuickFilterSet<Value> {
    QuickFilterSet::new(vec![QuickFilter::new(
        "high-dd",
        "High Drawdown",
        |r: &Value| r["dd"].as_f64().is_some_and(|dd| dd > 80.0),
    )])
    .unwrap()
}

fn account_table() -> DataTable<Value> {
    DataTable::new(
        vec![
            Column::new("id", "ID").sortable(),
            Column::new("name", "Trader").sortable(),
            Column::new("dd", "Drawdown").sortable(),
        ],
        KeySelector::field("id"),
        TableConfig {
            selectable: true,
            ..TableConfig::default()
        },
    )
    .unwrap()
}

fn visible_ids(table: &DataTable<Value>, rows: &[&Value]) -> Vec<String> {
    match table.view(rows).body {
        TableBody::Rows(rows) => rows.into_iter().map(|r| r.id).collect(),
        _ => Vec::new(),
    }
}

// ── Scenario: high drawdown quick filter ─────────────────────────────

#[test]
fn high_drawdown_quick_filter_narrows_to_one_account() {
    // Given two accounts with 85 % and 40 % drawdown
    let records = vec![
        json!({"id": "A-1", "name": "John Smith", "dd": 85}),
        json!({"id": "A-2", "name": "Ana Lee", "dd": 40}),
    ];
    let ctx = FilterContext::default();
    let fields = FilterFields::without_date();
    let mut quick = high_dd();

    // When the high-drawdown quick filter is selected
    quick.select(Some("high-dd")).unwrap();
    let derived = derive(&records, ctx.filters(), &fields, &quick, &now());

    // Then the badge shows 1 and only A-1 is visible
    assert_eq!(derived.counts[0].count, 1);
    let table = account_table();
    let visible = table.visible(&derived.narrowed);
    assert_eq!(visible_ids(&table, &visible), vec!["A-1"]);
}

// ── Scenario: badges track global changes ────────────────────────────

#[test]
fn badge_recomputes_after_each_global_change() {
    let records = vec![
        json!({"id": "A-1", "dd": 85, "plan": "Standard", "status": "Funded",
               "created_at": (now() - Duration::days(3)).to_rfc3339()}),
        json!({"id": "A-2", "dd": 92, "plan": "Dynasty", "status": "Evaluation",
               "created_at": (now() - Duration::days(50)).to_rfc3339()}),
        json!({"id": "A-3", "dd": 95, "plan": "Standard", "status": "Evaluation",
               "created_at": (now() - Duration::hours(2)).to_rfc3339()}),
    ];
    let fields = FilterFields::new("created_at");
    let quick = high_dd();
    let mut ctx = FilterContext::default();

    let badge = |ctx: &FilterContext| derive(&records, ctx.filters(), &fields, &quick, &now()).counts[0].count;

    assert_eq!(badge(&ctx), 2);
    ctx.set_date_range(DateRange::Last90Days);
    assert_eq!(badge(&ctx), 3);
    ctx.set_date_range(DateRange::Today);
    assert_eq!(badge(&ctx), 1);
    ctx.set_date_range(DateRange::Custom);
    ctx.set_status_filter("Evaluation");
    assert_eq!(badge(&ctx), 2);
    ctx.set_plan_filter("Dynasty");
    assert_eq!(badge(&ctx), 1);
    ctx.reset();
    assert_eq!(badge(&ctx), 2);
}

// ── Scenario: search + sort + select all ─────────────────────────────

#[test]
fn search_sort_and_select_over_narrowed_rows() {
    let records = vec![
        json!({"id": "A-1", "name": "John Smith", "dd": 85}),
        json!({"id": "A-2", "name": "Ana Smithers", "dd": 40}),
        json!({"id": "A-3", "name": "Raj Patel", "dd": 90}),
    ];
    let ctx = FilterContext::default();
    let derived = derive(
        &records,
        ctx.filters(),
        &FilterFields::without_date(),
        &high_dd(),
        &now(),
    );

    let mut table = account_table();
    table.handle(TableAction::Search("SMITH".into()), &[]);
    table.handle(TableAction::ToggleSort("dd".into()), &[]);
    let visible = table.visible(&derived.narrowed);
    assert_eq!(visible_ids(&table, &visible), vec!["A-2", "A-1"]);

    let event = table.handle(TableAction::ToggleAll, &visible);
    assert_eq!(event, TableEvent::SelectionChanged { selected: 2 });
    assert!(table.view(&visible).all_selected);

    let event = table.handle(TableAction::Activate(1), &visible);
    assert_eq!(
        event,
        TableEvent::RowActivated {
            id: "A-1".into(),
            index: 1
        }
    );
}

#[test]
fn empty_result_shows_message_row() {
    let records = vec![json!({"id": "A-1", "name": "John Smith", "dd": 10})];
    let mut quick = high_dd();
    quick.select(Some("high-dd")).unwrap();
    let derived = derive(
        &records,
        FilterContext::default().filters(),
        &FilterFields::without_date(),
        &quick,
        &now(),
    );
    let table = account_table();
    match table.view(&derived.narrowed).body {
        TableBody::Empty { message, span } => {
            assert_eq!(message, "No results found.");
            assert_eq!(span, 4);
        }
        other => panic!("expected empty state, got {other:?}"),
    }
}

// ── Scenario: typed domain records ───────────────────────────────────

#[test]
fn sample_accounts_flow_through_the_pipeline() {
    let set = sample_set(&SampleConfig::default(), now());
    let fields = FilterFields::new("created_at");
    let quick = QuickFilterSet::new(vec![
        QuickFilter::new("high-dd", "High DD", Account::is_high_drawdown),
        QuickFilter::new("funded", "Funded", |a: &Account| {
            a.status == AccountStatus::Funded
        }),
    ])
    .unwrap();

    let mut ctx = FilterContext::default();
    ctx.set_date_range(DateRange::Custom);
    let derived = derive(&set.accounts, ctx.filters(), &fields, &quick, &now());
    assert_eq!(derived.global.len(), set.accounts.len());

    let expected_funded = set
        .accounts
        .iter()
        .filter(|a| a.status == AccountStatus::Funded)
        .count();
    assert_eq!(derived.counts[1].count, expected_funded);

    ctx.set_status_filter("Funded");
    let derived = derive(&set.accounts, ctx.filters(), &fields, &quick, &now());
    assert!(derived
        .global
        .iter()
        .all(|a| a.field("status").is_some_and(|s| s.to_string() == "Funded")));
    assert_eq!(derived.global.len(), expected_funded);
}
