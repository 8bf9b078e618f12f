//! The three admin views: columns, quick filters and filter vocabularies.

use propdesk_core::domain::{
    Account, AccountStatus, AlertSeverity, AlertStatus, Payout, PayoutStatus, Plan, RiskAlert,
};
use propdesk_core::{
    Column, FilterError, FilterFields, QuickFilter, QuickFilterSet, Rendered, Tone, ALL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Accounts,
    Payouts,
    Alerts,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Accounts, ViewKind::Payouts, ViewKind::Alerts];

    pub fn index(self) -> usize {
        match self {
            ViewKind::Accounts => 0,
            ViewKind::Payouts => 1,
            ViewKind::Alerts => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Accounts => "Accounts",
            ViewKind::Payouts => "Payouts",
            ViewKind::Alerts => "Risk Alerts",
        }
    }

    pub fn filter_fields(self) -> FilterFields {
        match self {
            ViewKind::Accounts => FilterFields::new("created_at"),
            ViewKind::Payouts => FilterFields::new("requested_at"),
            ViewKind::Alerts => FilterFields::new("triggered_at"),
        }
    }

    /// Values the status pill cycles through, starting with "all".
    pub fn statuses(self) -> Vec<&'static str> {
        let mut out = vec![ALL];
        match self {
            ViewKind::Accounts => out.extend(AccountStatus::ALL.iter().map(|s| s.as_str())),
            ViewKind::Payouts => out.extend(PayoutStatus::ALL.iter().map(|s| s.as_str())),
            ViewKind::Alerts => out.extend(AlertStatus::ALL.iter().map(|s| s.as_str())),
        }
        out
    }
}

/// Values the plan pill cycles through.
pub fn plans() -> Vec<&'static str> {
    let mut out = vec![ALL];
    out.extend(Plan::ALL.iter().map(|p| p.as_str()));
    out
}

/// Next entry after `current`; an unknown value restarts at the first entry.
pub fn cycle_value<'a>(options: &[&'a str], current: &str) -> &'a str {
    match options.iter().position(|o| *o == current) {
        Some(i) => options[(i + 1) % options.len()],
        None => options.first().copied().unwrap_or(ALL),
    }
}

// ── Formatting ───────────────────────────────────────────────────────

pub fn money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn date(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

// ── Accounts ─────────────────────────────────────────────────────────

pub fn account_columns() -> Vec<Column<Account>> {
    vec![
        Column::new("id", "ID").sortable().width(8),
        Column::new("trader", "Trader").sortable().width(16),
        Column::new("plan", "Plan").sortable().width(9),
        Column::new("status", "Status")
            .sortable()
            .width(11)
            .render(|a: &Account| {
                let tone = match a.status {
                    AccountStatus::Funded => Tone::Positive,
                    AccountStatus::Passed => Tone::Accent,
                    AccountStatus::Breached => Tone::Negative,
                    AccountStatus::Evaluation => Tone::Default,
                };
                Rendered::toned(a.status.as_str(), tone)
            }),
        Column::new("balance", "Balance")
            .sortable()
            .width(13)
            .render(|a: &Account| money(a.balance)),
        Column::new("drawdown", "DD")
            .sortable()
            .width(7)
            .render(|a: &Account| {
                let tone = if a.is_high_drawdown() {
                    Tone::Negative
                } else if a.drawdown > 50.0 {
                    Tone::Warning
                } else {
                    Tone::Default
                };
                Rendered::toned(format!("{:.1}%", a.drawdown), tone)
            }),
        Column::new("profit", "Profit")
            .sortable()
            .width(12)
            .render(|a: &Account| {
                let tone = if a.profit < 0.0 { Tone::Negative } else { Tone::Positive };
                Rendered::toned(money(a.profit), tone)
            }),
        Column::new("created_at", "Created")
            .sortable()
            .width(16)
            .render(|a: &Account| Rendered::toned(date(&a.created_at), Tone::Muted)),
    ]
}

pub fn account_quick_filters() -> Result<QuickFilterSet<Account>, FilterError> {
    QuickFilterSet::new(vec![
        QuickFilter::new("high-dd", "High DD >80%", Account::is_high_drawdown),
        QuickFilter::new("funded", "Funded", |a: &Account| {
            a.status == AccountStatus::Funded
        }),
        QuickFilter::new("evaluation", "In Evaluation", |a: &Account| {
            a.status == AccountStatus::Evaluation
        }),
        QuickFilter::new("breached", "Breached", |a: &Account| {
            a.status == AccountStatus::Breached
        }),
    ])
}

// ── Payouts ──────────────────────────────────────────────────────────

pub fn payout_columns() -> Vec<Column<Payout>> {
    vec![
        Column::new("id", "ID").sortable().width(8),
        Column::new("account_id", "Account").sortable().width(8),
        Column::new("trader", "Trader").sortable().width(16),
        Column::new("plan", "Plan").sortable().width(9),
        Column::new("amount", "Amount")
            .sortable()
            .width(12)
            .render(|p: &Payout| {
                let tone = if p.is_large() { Tone::Warning } else { Tone::Default };
                Rendered::toned(money(p.amount), tone)
            }),
        Column::new("method", "Method").width(13),
        Column::new("status", "Status")
            .sortable()
            .width(9)
            .render(|p: &Payout| {
                let tone = match p.status {
                    PayoutStatus::Pending => Tone::Warning,
                    PayoutStatus::Approved => Tone::Accent,
                    PayoutStatus::Paid => Tone::Positive,
                    PayoutStatus::Rejected => Tone::Negative,
                };
                Rendered::toned(p.status.as_str(), tone)
            }),
        Column::new("requested_at", "Requested")
            .sortable()
            .width(16)
            .render(|p: &Payout| Rendered::toned(date(&p.requested_at), Tone::Muted)),
    ]
}

pub fn payout_quick_filters() -> Result<QuickFilterSet<Payout>, FilterError> {
    QuickFilterSet::new(vec![
        QuickFilter::new("pending", "Pending", |p: &Payout| {
            p.status == PayoutStatus::Pending
        }),
        QuickFilter::new("large", "Large ≥$5k", Payout::is_large),
        QuickFilter::new("rejected", "Rejected", |p: &Payout| {
            p.status == PayoutStatus::Rejected
        }),
    ])
}

// ── Risk alerts ──────────────────────────────────────────────────────

pub fn alert_columns() -> Vec<Column<RiskAlert>> {
    vec![
        Column::new("id", "ID").sortable().width(8),
        Column::new("account_id", "Account").sortable().width(8),
        Column::new("trader", "Trader").sortable().width(16),
        Column::new("rule", "Rule").sortable().width(18),
        // Keyed on the rank so the sort follows severity, not spelling.
        Column::new("severity_rank", "Severity")
            .sortable()
            .width(9)
            .render(|r: &RiskAlert| {
                let tone = match r.severity {
                    AlertSeverity::Low => Tone::Muted,
                    AlertSeverity::Medium => Tone::Default,
                    AlertSeverity::High => Tone::Warning,
                    AlertSeverity::Critical => Tone::Negative,
                };
                Rendered::toned(r.severity.as_str(), tone)
            }),
        Column::new("status", "Status")
            .sortable()
            .width(13)
            .render(|r: &RiskAlert| {
                let tone = match r.status {
                    AlertStatus::Open => Tone::Warning,
                    AlertStatus::Acknowledged => Tone::Accent,
                    AlertStatus::Resolved => Tone::Muted,
                };
                Rendered::toned(r.status.as_str(), tone)
            }),
        Column::new("triggered_at", "Triggered")
            .sortable()
            .width(16)
            .render(|r: &RiskAlert| Rendered::toned(date(&r.triggered_at), Tone::Muted)),
    ]
}

pub fn alert_quick_filters() -> Result<QuickFilterSet<RiskAlert>, FilterError> {
    QuickFilterSet::new(vec![
        QuickFilter::new("open", "Open", |r: &RiskAlert| {
            r.status == AlertStatus::Open
        }),
        QuickFilter::new("critical", "Critical", |r: &RiskAlert| {
            r.severity == AlertSeverity::Critical
        }),
        QuickFilter::new("acknowledged", "Acknowledged", |r: &RiskAlert| {
            r.status == AlertStatus::Acknowledged
        }),
    ])
}
