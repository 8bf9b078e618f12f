//! Admin-console record types.
//!
//! Each type implements [`Record`](crate::record::Record) by hand, exposing
//! its fields under the snake_case names the views and the CLI use.

pub mod account;
pub mod alert;
pub mod payout;

pub use account::{Account, AccountStatus};
pub use alert::{AlertSeverity, AlertStatus, RiskAlert};
pub use payout::{Payout, PayoutMethod, PayoutStatus};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Challenge program an account was bought under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    Standard,
    Dynasty,
    Express,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Standard, Plan::Dynasty, Plan::Express];

    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Standard => "Standard",
            Plan::Dynasty => "Dynasty",
            Plan::Express => "Express",
        }
    }

    /// Maximum allowed drawdown as a fraction of the starting balance.
    pub fn max_drawdown(self) -> f64 {
        match self {
            Plan::Standard => 0.10,
            Plan::Dynasty => 0.08,
            Plan::Express => 0.06,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Plan> for CellValue {
    fn from(plan: Plan) -> Self {
        CellValue::Text(plan.as_str().to_string())
    }
}
