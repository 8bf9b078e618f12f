//! Predicate library: total, pure tests of one value against one criterion.
//!
//! Every predicate fails closed: a missing field, an unparseable timestamp or
//! an unknown bucket name yields `false`, so one bad record can never abort
//! filtering of a whole collection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::FilterError;
use crate::value::CellValue;

/// Sentinel criterion that matches every record.
pub const ALL: &str = "all";

/// Named date-range bucket of the global filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    /// No restriction.
    #[serde(rename = "custom")]
    Custom,
}

impl DateRange {
    pub const ALL: [DateRange; 5] = [
        DateRange::Today,
        DateRange::Last7Days,
        DateRange::Last30Days,
        DateRange::Last90Days,
        DateRange::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Last7Days => "7d",
            DateRange::Last30Days => "30d",
            DateRange::Last90Days => "90d",
            DateRange::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateRange::Today => "Today",
            DateRange::Last7Days => "7D",
            DateRange::Last30Days => "30D",
            DateRange::Last90Days => "90D",
            DateRange::Custom => "Custom",
        }
    }

    /// Trailing window of the bucket. `Today` is calendar-based and `Custom`
    /// is unrestricted, so neither has one.
    pub fn window(self) -> Option<Duration> {
        match self {
            DateRange::Last7Days => Some(Duration::days(7)),
            DateRange::Last30Days => Some(Duration::days(30)),
            DateRange::Last90Days => Some(Duration::days(90)),
            DateRange::Today | DateRange::Custom => None,
        }
    }

    pub fn next(self) -> DateRange {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| FilterError::UnknownDateRange(s.to_string()))
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

fn local_to_zone<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

fn parse_text_timestamp<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(tz));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return local_to_zone(naive, tz);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| local_to_zone(naive, tz))
}

/// Interpret a cell as an instant in `tz`. Naive dates and times are read as
/// local to `tz`. Anything else is not a timestamp.
pub fn resolve_timestamp<Tz: TimeZone>(value: &CellValue, tz: &Tz) -> Option<DateTime<Tz>> {
    match value {
        CellValue::Timestamp(ts) => Some(ts.with_timezone(tz)),
        CellValue::Date(d) => d.and_hms_opt(0, 0, 0).and_then(|n| local_to_zone(n, tz)),
        CellValue::Text(s) => parse_text_timestamp(s, tz),
        CellValue::Number(_) | CellValue::Bool(_) => None,
    }
}

/// Whether `value` falls in the bucket, evaluated at `now`.
///
/// Windowed buckets test `[now - window, now]`; `Today` tests the calendar
/// day of `now` in `now`'s zone; `Custom` always matches.
pub fn in_date_range<Tz: TimeZone>(
    value: Option<&CellValue>,
    range: DateRange,
    now: &DateTime<Tz>,
) -> bool {
    if range == DateRange::Custom {
        return true;
    }
    let tz = now.timezone();
    let Some(ts) = value.and_then(|v| resolve_timestamp(v, &tz)) else {
        return false;
    };
    match range.window() {
        Some(window) => ts <= *now && ts >= now.clone() - window,
        None => ts.date_naive() == now.date_naive(),
    }
}

/// Bucket test by name; unknown names fail closed.
pub fn in_date_range_named<Tz: TimeZone>(
    value: Option<&CellValue>,
    bucket: &str,
    now: &DateTime<Tz>,
) -> bool {
    bucket
        .parse::<DateRange>()
        .map(|range| in_date_range(value, range, now))
        .unwrap_or(false)
}

/// Exact, case-sensitive equality against the stringified value, with
/// [`ALL`] matching everything (including records without the field).
pub fn matches_exact(value: Option<&CellValue>, criterion: &str) -> bool {
    if criterion == ALL {
        return true;
    }
    match value {
        Some(CellValue::Text(s)) => s == criterion,
        Some(other) => other.to_string() == criterion,
        None => false,
    }
}
