//! PropDesk CLI: the admin filter pipeline over plain JSON files.
//!
//! Commands:
//! - `table`: global filters, search and sort over a JSON array, printed as text, CSV or JSON
//! - `sample`: print a seeded mock dataset (accounts, payouts or risk alerts) as JSON

mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use propdesk_core::config::SampleConfig;
use propdesk_core::sample::sample_set;
use propdesk_core::{
    derive, AppConfig, Column, DataTable, DateRange, FilterFields, FilterState, KeySelector,
    QuickFilterSet, SortDirection,
};

use crate::output::Format;

#[derive(Parser)]
#[command(
    name = "propdesk",
    about = "PropDesk CLI: filter, search and sort admin datasets"
)]
struct Cli {
    /// TOML config with default filters and table settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the filter pipeline over a JSON array of objects.
    Table {
        /// Input file holding a JSON array.
        file: PathBuf,

        /// Field holding each record's timestamp. Without it, dates are not filtered.
        #[arg(long)]
        date_field: Option<String>,

        /// Date bucket: today, 7d, 30d, 90d or custom.
        #[arg(long)]
        date_range: Option<DateRange>,

        /// Plan to keep ("all" keeps every plan).
        #[arg(long)]
        plan: Option<String>,

        /// Status to keep ("all" keeps every status).
        #[arg(long)]
        status: Option<String>,

        #[arg(long, default_value = "plan")]
        plan_field: String,

        #[arg(long, default_value = "status")]
        status_field: String,

        /// Case-insensitive search over every field.
        #[arg(long)]
        search: Option<String>,

        /// Sort column, optionally with direction: KEY[:asc|:desc].
        #[arg(long)]
        sort: Option<String>,

        /// Comma-separated columns. Defaults to the first record's fields.
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Field identifying a row.
        #[arg(long, default_value = "id")]
        key: String,

        /// Reference time for date buckets (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print a seeded mock dataset as JSON.
    Sample {
        #[arg(long, value_enum)]
        kind: SampleKind,

        /// Number of records (defaults to the configured size).
        #[arg(long)]
        count: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SampleKind {
    Accounts,
    Payouts,
    Alerts,
}

/// Everything `table` needs besides the records themselves.
#[derive(Debug, Clone)]
struct TableOptions {
    filters: FilterState,
    fields: FilterFields,
    search: Option<String>,
    sort: Option<(String, SortDirection)>,
    columns: Vec<String>,
    key: String,
    now: DateTime<Utc>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Table {
            file,
            date_field,
            date_range,
            plan,
            status,
            plan_field,
            status_field,
            search,
            sort,
            columns,
            key,
            now,
            format,
        } => {
            let defaults = &config.filters;
            let filters = FilterState {
                date_range: date_range.unwrap_or(defaults.date_range),
                plan: plan.unwrap_or_else(|| defaults.plan.clone()),
                status: status.unwrap_or_else(|| defaults.status.clone()),
            };
            let fields = match date_field {
                Some(field) => FilterFields::new(field),
                None => FilterFields::without_date(),
            }
            .plan_field(plan_field)
            .status_field(status_field);
            let opts = TableOptions {
                filters,
                fields,
                search,
                sort: sort.as_deref().map(parse_sort).transpose()?,
                columns,
                key,
                now: now.unwrap_or_else(Utc::now),
            };
            let records = read_records(&file)?;
            let rendered = run_table(&records, &opts, &config, format)?;
            print!("{rendered}");
            Ok(())
        }
        Commands::Sample { kind, count, seed } => {
            let json = run_sample(&config.sample, kind, count, seed, Utc::now())?;
            println!("{json}");
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_records(path: &Path) -> Result<Vec<Value>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    match value {
        Value::Array(records) => {
            debug!(path = %path.display(), records = records.len(), "records loaded");
            Ok(records)
        }
        _ => bail!("{} must hold a JSON array of objects", path.display()),
    }
}

/// `KEY`, `KEY:asc` or `KEY:desc`.
fn parse_sort(spec: &str) -> Result<(String, SortDirection)> {
    let (key, direction) = match spec.rsplit_once(':') {
        Some((key, dir)) => {
            let dir = dir.parse::<SortDirection>().map_err(anyhow::Error::msg)?;
            (key, dir)
        }
        None => (spec, SortDirection::Asc),
    };
    if key.is_empty() {
        bail!("empty sort column in '{spec}'");
    }
    Ok((key.to_string(), direction))
}

/// Column keys: the requested ones, or the first record's fields in order.
fn column_keys(records: &[Value], requested: &[String]) -> Vec<String> {
    if !requested.is_empty() {
        return requested.to_vec();
    }
    match records.first() {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

fn run_table(
    records: &[Value],
    opts: &TableOptions,
    config: &AppConfig,
    format: Format,
) -> Result<String> {
    let keys = column_keys(records, &opts.columns);
    if keys.is_empty() {
        bail!("no columns: pass --columns or provide at least one object record");
    }
    let columns: Vec<Column<Value>> = keys
        .iter()
        .map(|k| Column::new(k.as_str(), k.as_str()).sortable())
        .collect();
    let mut table = DataTable::new(
        columns,
        KeySelector::field(opts.key.as_str()),
        config.table.table_config(true, false),
    )?;

    if let Some(term) = &opts.search {
        table.set_search(term.as_str());
    }
    if let Some((key, direction)) = &opts.sort {
        if !table.toggle_sort(key) {
            bail!("cannot sort by '{key}': not one of the table's columns");
        }
        if *direction == SortDirection::Desc {
            table.toggle_sort(key);
        }
    }

    let derived = derive(
        records,
        &opts.filters,
        &opts.fields,
        &QuickFilterSet::empty(),
        &opts.now,
    );
    let visible = table.visible(&derived.narrowed);
    info!(
        total = records.len(),
        filtered = derived.global.len(),
        visible = visible.len(),
        "table rendered"
    );
    output::render(&table.view(&visible), &visible, format)
}

fn run_sample(
    base: &SampleConfig,
    kind: SampleKind,
    count: Option<usize>,
    seed: Option<u64>,
    now: DateTime<Utc>,
) -> Result<String> {
    let mut config = base.clone();
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(count) = count {
        match kind {
            SampleKind::Accounts => config.accounts = count,
            SampleKind::Payouts => config.payouts = count,
            SampleKind::Alerts => config.alerts = count,
        }
    }
    let set = sample_set(&config, now);
    let json = match kind {
        SampleKind::Accounts => serde_json::to_string_pretty(&set.accounts)?,
        SampleKind::Payouts => serde_json::to_string_pretty(&set.payouts)?,
        SampleKind::Alerts => serde_json::to_string_pretty(&set.alerts)?,
    };
    Ok(json)
}
