//! Trader accounts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Plan;
use crate::record::Record;
use crate::value::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Evaluation,
    Funded,
    Passed,
    Breached,
}

impl AccountStatus {
    pub const ALL: [AccountStatus; 4] = [
        AccountStatus::Evaluation,
        AccountStatus::Funded,
        AccountStatus::Passed,
        AccountStatus::Breached,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Evaluation => "Evaluation",
            AccountStatus::Funded => "Funded",
            AccountStatus::Passed => "Passed",
            AccountStatus::Breached => "Breached",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub trader: String,
    pub email: String,
    pub plan: Plan,
    pub status: AccountStatus,
    pub balance: f64,
    /// Share of the plan's maximum loss already used, in percent.
    pub drawdown: f64,
    pub profit: f64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_high_drawdown(&self) -> bool {
        self.drawdown > 80.0
    }
}

impl Record for Account {
    fn field(&self, key: &str) -> Option<CellValue> {
        Some(match key {
            "id" => self.id.as_str().into(),
            "trader" => self.trader.as_str().into(),
            "email" => self.email.as_str().into(),
            "plan" => self.plan.into(),
            "status" => self.status.as_str().into(),
            "balance" => self.balance.into(),
            "drawdown" => self.drawdown.into(),
            "profit" => self.profit.into(),
            "created_at" => self.created_at.into(),
            _ => return None,
        })
    }

    fn values(&self) -> Vec<CellValue> {
        vec![
            self.id.as_str().into(),
            self.trader.as_str().into(),
            self.email.as_str().into(),
            self.plan.into(),
            self.status.as_str().into(),
            self.balance.into(),
            self.drawdown.into(),
            self.profit.into(),
            self.created_at.into(),
        ]
    }
}
