//! Seeded mock datasets for the admin console and the CLI.
//!
//! Same seed and same `now` give byte-identical datasets. Timestamps are
//! spread over the last 120 days so every date bucket has something in it.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::SampleConfig;
use crate::domain::{
    Account, AccountStatus, AlertSeverity, AlertStatus, Payout, PayoutMethod, PayoutStatus, Plan,
    RiskAlert,
};

const FIRST_NAMES: &[&str] = &[
    "John", "Ana", "Raj", "Mei", "Lucas", "Sofia", "Omar", "Elena", "Kwame", "Hana", "Diego",
    "Priya",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Lee", "Patel", "Chen", "Moreau", "Rossi", "Haddad", "Petrova", "Mensah", "Sato",
    "Garcia", "Nair",
];

const ACCOUNT_SIZES: &[f64] = &[25_000.0, 50_000.0, 100_000.0, 200_000.0];

const RISK_RULES: &[&str] = &[
    "Daily loss limit",
    "Max drawdown",
    "Consistency rule",
    "News trading",
    "Lot size cap",
    "Copy trading",
];

/// Span of generated timestamps, in minutes.
const HISTORY_MINUTES: i64 = 120 * 24 * 60;

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

fn cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn recent(rng: &mut StdRng, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::minutes(rng.gen_range(0..HISTORY_MINUTES))
}

pub fn accounts(rng: &mut StdRng, count: usize, now: DateTime<Utc>) -> Vec<Account> {
    (0..count)
        .map(|i| {
            let first = pick(rng, FIRST_NAMES);
            let last = pick(rng, LAST_NAMES);
            let plan = pick(rng, &Plan::ALL);
            let size = pick(rng, ACCOUNT_SIZES);
            let status = match rng.gen_range(0..100) {
                0..=44 => AccountStatus::Evaluation,
                45..=74 => AccountStatus::Funded,
                75..=87 => AccountStatus::Passed,
                _ => AccountStatus::Breached,
            };
            let drawdown = if status == AccountStatus::Breached {
                100.0
            } else {
                cents(rng.gen_range(0.0..99.0))
            };
            let max_loss = size * plan.max_drawdown();
            let profit = cents(rng.gen_range(-max_loss * 0.5..size * 0.12));
            Account {
                id: format!("A-{}", 1001 + i),
                trader: format!("{first} {last}"),
                email: format!(
                    "{}.{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase()
                ),
                plan,
                status,
                balance: cents(size + profit),
                drawdown,
                profit,
                created_at: recent(rng, now),
            }
        })
        .collect()
}

/// Payouts are requested by funded or passed accounts when there are any.
pub fn payouts(
    rng: &mut StdRng,
    accounts: &[Account],
    count: usize,
    now: DateTime<Utc>,
) -> Vec<Payout> {
    let eligible: Vec<&Account> = accounts
        .iter()
        .filter(|a| matches!(a.status, AccountStatus::Funded | AccountStatus::Passed))
        .collect();
    let pool: Vec<&Account> = if eligible.is_empty() {
        accounts.iter().collect()
    } else {
        eligible
    };
    if pool.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let account = pick(rng, &pool);
            let status = match rng.gen_range(0..100) {
                0..=39 => PayoutStatus::Pending,
                40..=59 => PayoutStatus::Approved,
                60..=84 => PayoutStatus::Paid,
                _ => PayoutStatus::Rejected,
            };
            Payout {
                id: format!("P-{}", 5001 + i),
                account_id: account.id.clone(),
                trader: account.trader.clone(),
                plan: account.plan,
                amount: cents(rng.gen_range(250.0..12_000.0)),
                method: pick(rng, &PayoutMethod::ALL),
                status,
                requested_at: recent(rng, now),
            }
        })
        .collect()
}

pub fn alerts(
    rng: &mut StdRng,
    accounts: &[Account],
    count: usize,
    now: DateTime<Utc>,
) -> Vec<RiskAlert> {
    if accounts.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let account = &accounts[rng.gen_range(0..accounts.len())];
            let severity = match rng.gen_range(0..100) {
                0..=34 => AlertSeverity::Low,
                35..=64 => AlertSeverity::Medium,
                65..=87 => AlertSeverity::High,
                _ => AlertSeverity::Critical,
            };
            let status = match rng.gen_range(0..100) {
                0..=44 => AlertStatus::Open,
                45..=69 => AlertStatus::Acknowledged,
                _ => AlertStatus::Resolved,
            };
            RiskAlert {
                id: format!("R-{}", 9001 + i),
                account_id: account.id.clone(),
                trader: account.trader.clone(),
                plan: account.plan,
                rule: pick(rng, RISK_RULES).to_string(),
                severity,
                status,
                triggered_at: recent(rng, now),
            }
        })
        .collect()
}

/// All three datasets, generated from one seeded stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSet {
    pub accounts: Vec<Account>,
    pub payouts: Vec<Payout>,
    pub alerts: Vec<RiskAlert>,
}

pub fn sample_set(config: &SampleConfig, now: DateTime<Utc>) -> SampleSet {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let accounts = accounts(&mut rng, config.accounts, now);
    let payouts = payouts(&mut rng, &accounts, config.payouts, now);
    let alerts = alerts(&mut rng, &accounts, config.alerts, now);
    tracing::debug!(
        seed = config.seed,
        accounts = accounts.len(),
        payouts = payouts.len(),
        alerts = alerts.len(),
        "sample datasets generated"
    );
    SampleSet {
        accounts,
        payouts,
        alerts,
    }
}
