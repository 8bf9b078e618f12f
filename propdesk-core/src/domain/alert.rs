//! Risk-rule alerts raised against accounts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Plan;
use crate::record::Record;
use crate::value::CellValue;

/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 4] = [
        AlertSeverity::Low,
        AlertSeverity::Medium,
        AlertSeverity::High,
        AlertSeverity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Low => "Low",
            AlertSeverity::Medium => "Medium",
            AlertSeverity::High => "High",
            AlertSeverity::Critical => "Critical",
        }
    }

    /// Sort rank; the text form would order "Critical" first alphabetically.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertStatus {
    Open,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 3] = [
        AlertStatus::Open,
        AlertStatus::Acknowledged,
        AlertStatus::Resolved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Open => "Open",
            AlertStatus::Acknowledged => "Acknowledged",
            AlertStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub id: String,
    pub account_id: String,
    pub trader: String,
    pub plan: Plan,
    pub rule: String,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub triggered_at: DateTime<Utc>,
}

impl Record for RiskAlert {
    fn field(&self, key: &str) -> Option<CellValue> {
        Some(match key {
            "id" => self.id.as_str().into(),
            "account_id" => self.account_id.as_str().into(),
            "trader" => self.trader.as_str().into(),
            "plan" => self.plan.into(),
            "rule" => self.rule.as_str().into(),
            "severity" => self.severity.as_str().into(),
            "severity_rank" => u32::from(self.severity.rank()).into(),
            "status" => self.status.as_str().into(),
            "triggered_at" => self.triggered_at.into(),
            _ => return None,
        })
    }

    fn values(&self) -> Vec<CellValue> {
        vec![
            self.id.as_str().into(),
            self.account_id.as_str().into(),
            self.trader.as_str().into(),
            self.plan.into(),
            self.rule.as_str().into(),
            self.severity.as_str().into(),
            self.status.as_str().into(),
            self.triggered_at.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_rank_follows_declaration_order() {
        let ranks: Vec<u8> = AlertSeverity::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(AlertSeverity::Critical > AlertSeverity::High);
    }

    #[test]
    fn rank_is_a_field_but_not_searchable() {
        let alert = RiskAlert {
            id: "R-1".into(),
            account_id: "A-1".into(),
            trader: "Raj Patel".into(),
            plan: Plan::Express,
            rule: "Daily loss".into(),
            severity: AlertSeverity::Critical,
            status: AlertStatus::Open,
            triggered_at: Utc::now(),
        };
        assert_eq!(alert.field("severity_rank"), Some(CellValue::Number(3.0)));
        assert!(!alert.values().contains(&CellValue::Number(3.0)));
    }
}
