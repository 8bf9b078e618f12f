//! Payout requests from funded traders.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Plan;
use crate::record::Record;
use crate::value::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutStatus {
    Pending,
    Approved,
    Paid,
    Rejected,
}

impl PayoutStatus {
    pub const ALL: [PayoutStatus; 4] = [
        PayoutStatus::Pending,
        PayoutStatus::Approved,
        PayoutStatus::Paid,
        PayoutStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PayoutStatus::Pending => "Pending",
            PayoutStatus::Approved => "Approved",
            PayoutStatus::Paid => "Paid",
            PayoutStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutMethod {
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Crypto,
    Wise,
}

impl PayoutMethod {
    pub const ALL: [PayoutMethod; 3] = [
        PayoutMethod::BankTransfer,
        PayoutMethod::Crypto,
        PayoutMethod::Wise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PayoutMethod::BankTransfer => "Bank Transfer",
            PayoutMethod::Crypto => "Crypto",
            PayoutMethod::Wise => "Wise",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    pub account_id: String,
    pub trader: String,
    pub plan: Plan,
    pub amount: f64,
    pub method: PayoutMethod,
    pub status: PayoutStatus,
    pub requested_at: DateTime<Utc>,
}

impl Payout {
    /// Threshold of the "large payout" review queue.
    pub const LARGE_AMOUNT: f64 = 5_000.0;

    pub fn is_large(&self) -> bool {
        self.amount >= Self::LARGE_AMOUNT
    }
}

impl Record for Payout {
    fn field(&self, key: &str) -> Option<CellValue> {
        Some(match key {
            "id" => self.id.as_str().into(),
            "account_id" => self.account_id.as_str().into(),
            "trader" => self.trader.as_str().into(),
            "plan" => self.plan.into(),
            "amount" => self.amount.into(),
            "method" => self.method.as_str().into(),
            "status" => self.status.as_str().into(),
            "requested_at" => self.requested_at.into(),
            _ => return None,
        })
    }

    fn values(&self) -> Vec<CellValue> {
        vec![
            self.id.as_str().into(),
            self.account_id.as_str().into(),
            self.trader.as_str().into(),
            self.plan.into(),
            self.amount.into(),
            self.method.as_str().into(),
            self.status.as_str().into(),
            self.requested_at.into(),
        ]
    }
}
