//! Filter context: the global filter axes shared by every admin view.
//!
//! The context is owned by the admin session and handed to views by
//! reference. Setters are the only mutation path; each bumps `revision` so a
//! view can tell that its derived record set is out of date.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::predicate::{in_date_range, matches_exact, DateRange, ALL};
use crate::record::Record;

/// Current global filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub date_range: DateRange,
    pub plan: String,
    pub status: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            date_range: DateRange::default(),
            plan: ALL.to_string(),
            status: ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn date_matches<T: Record, Tz: TimeZone>(
        &self,
        record: &T,
        fields: &FilterFields,
        now: &DateTime<Tz>,
    ) -> bool {
        match &fields.date {
            Some(field) => in_date_range(record.field(field).as_ref(), self.date_range, now),
            None => true,
        }
    }

    pub fn plan_matches<T: Record>(&self, record: &T, fields: &FilterFields) -> bool {
        matches_exact(record.field(&fields.plan).as_ref(), &self.plan)
    }

    pub fn status_matches<T: Record>(&self, record: &T, fields: &FilterFields) -> bool {
        matches_exact(record.field(&fields.status).as_ref(), &self.status)
    }

    /// Conjunction of the three axes.
    pub fn matches<T: Record, Tz: TimeZone>(
        &self,
        record: &T,
        fields: &FilterFields,
        now: &DateTime<Tz>,
    ) -> bool {
        self.date_matches(record, fields, now)
            && self.plan_matches(record, fields)
            && self.status_matches(record, fields)
    }
}

/// Field names a view exposes to the global predicates.
///
/// Record types name their date field differently (`created_at`,
/// `requested_at`, ...), so every view supplies its own. A view with no date
/// field ignores the date axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFields {
    pub date: Option<String>,
    pub plan: String,
    pub status: String,
}

impl FilterFields {
    pub fn new(date_field: impl Into<String>) -> Self {
        Self {
            date: Some(date_field.into()),
            plan: "plan".to_string(),
            status: "status".to_string(),
        }
    }

    pub fn without_date() -> Self {
        Self {
            date: None,
            plan: "plan".to_string(),
            status: "status".to_string(),
        }
    }

    pub fn plan_field(mut self, name: impl Into<String>) -> Self {
        self.plan = name.into();
        self
    }

    pub fn status_field(mut self, name: impl Into<String>) -> Self {
        self.status = name.into();
        self
    }
}

/// Per-session global filter state with setters.
#[derive(Debug, Clone)]
pub struct FilterContext {
    defaults: FilterState,
    state: FilterState,
    revision: u64,
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

impl FilterContext {
    pub fn new(defaults: FilterState) -> Self {
        Self {
            state: defaults.clone(),
            defaults,
            revision: 0,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.state
    }

    /// Incremented on every setter call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.state.date_range = range;
        self.bump("date_range");
    }

    pub fn set_plan_filter(&mut self, plan: impl Into<String>) {
        self.state.plan = plan.into();
        self.bump("plan");
    }

    pub fn set_status_filter(&mut self, status: impl Into<String>) {
        self.state.status = status.into();
        self.bump("status");
    }

    /// Back to the defaults the context was created with.
    pub fn reset(&mut self) {
        self.state = self.defaults.clone();
        self.bump("reset");
    }

    pub fn apply<'a, T: Record, Tz: TimeZone>(
        &self,
        records: &'a [T],
        fields: &FilterFields,
        now: &DateTime<Tz>,
    ) -> Vec<&'a T> {
        apply_global(records, &self.state, fields, now)
    }

    fn bump(&mut self, axis: &'static str) {
        self.revision += 1;
        debug!(
            axis,
            revision = self.revision,
            date_range = %self.state.date_range,
            plan = %self.state.plan,
            status = %self.state.status,
            "global filter changed"
        );
    }
}

/// Records matching every global axis, in input order.
pub fn apply_global<'a, T: Record, Tz: TimeZone>(
    records: &'a [T],
    state: &FilterState,
    fields: &FilterFields,
    now: &DateTime<Tz>,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| state.matches(*r, fields, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn records() -> Vec<Value> {
        let now = now();
        vec![
            json!({"id": "A-1", "plan": "Standard", "status": "Funded",
                   "created_at": (now - Duration::days(2)).to_rfc3339()}),
            json!({"id": "A-2", "plan": "Dynasty", "status": "Evaluation",
                   "created_at": (now - Duration::days(20)).to_rfc3339()}),
            json!({"id": "A-3", "plan": "Standard", "status": "Evaluation",
                   "created_at": (now - Duration::days(60)).to_rfc3339()}),
            json!({"id": "A-4", "plan": "Standard", "status": "Funded",
                   "created_at": "garbage"}),
        ]
    }

    fn ids(rows: &[&Value]) -> Vec<String> {
        rows.iter().map(|r| r["id"].as_str().unwrap().to_string()).collect()
    }

    #[test]
    fn defaults_are_thirty_days_and_all() {
        let ctx = FilterContext::default();
        assert_eq!(ctx.filters().date_range, DateRange::Last30Days);
        assert_eq!(ctx.filters().plan, ALL);
        assert_eq!(ctx.filters().status, ALL);
        assert_eq!(ctx.revision(), 0);
    }

    #[test]
    fn setters_bump_revision() {
        let mut ctx = FilterContext::default();
        ctx.set_plan_filter("Dynasty");
        ctx.set_status_filter("Funded");
        ctx.set_date_range(DateRange::Today);
        assert_eq!(ctx.revision(), 3);
        assert_eq!(ctx.filters().plan, "Dynasty");

        ctx.reset();
        assert_eq!(ctx.filters(), &FilterState::default());
        assert_eq!(ctx.revision(), 4);
    }

    #[test]
    fn date_axis_drops_old_and_malformed_records() {
        let recs = records();
        let ctx = FilterContext::default();
        let out = ctx.apply(&recs, &FilterFields::new("created_at"), &now());
        assert_eq!(ids(&out), vec!["A-1", "A-2"]);
    }

    #[test]
    fn axes_combine_conjunctively() {
        let recs = records();
        let mut ctx = FilterContext::default();
        ctx.set_date_range(DateRange::Last90Days);
        ctx.set_plan_filter("Standard");
        ctx.set_status_filter("Evaluation");
        let out = ctx.apply(&recs, &FilterFields::new("created_at"), &now());
        assert_eq!(ids(&out), vec!["A-3"]);
    }

    #[test]
    fn view_without_date_field_ignores_date_axis() {
        let recs = records();
        let mut ctx = FilterContext::default();
        ctx.set_date_range(DateRange::Today);
        let out = ctx.apply(&recs, &FilterFields::without_date(), &now());
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn custom_field_names() {
        let recs = vec![json!({"tier": "Dynasty", "state": "Paid"})];
        let mut ctx = FilterContext::default();
        ctx.set_plan_filter("Dynasty");
        ctx.set_status_filter("Paid");
        let fields = FilterFields::without_date()
            .plan_field("tier")
            .status_field("state");
        assert_eq!(ctx.apply(&recs, &fields, &now()).len(), 1);
        assert_eq!(ctx.apply(&recs, &FilterFields::without_date(), &now()).len(), 0);
    }

    #[test]
    fn filter_state_deserializes_with_defaults() {
        let state: FilterState = toml::from_str("date_range = \"7d\"").unwrap();
        assert_eq!(state.date_range, DateRange::Last7Days);
        assert_eq!(state.plan, ALL);
    }
}
