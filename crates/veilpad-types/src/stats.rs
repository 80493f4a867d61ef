//! Dashboard statistics.

use serde::{Deserialize, Serialize};

/// Aggregate counts and sums derived from the store at request time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tokens: u64,
    pub active_presales: u64,
    /// Tokens plus participants; a rough activity proxy, not a ledger.
    pub total_transactions: u64,
    /// Sum of all presale totals, always with two fraction digits.
    pub total_value_locked: String,
}
