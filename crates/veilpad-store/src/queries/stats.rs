//! Dashboard statistics, derived from the current store contents on each call.

use rust_decimal::{Decimal, RoundingStrategy};
use veilpad_types::{DashboardStats, PresaleStatus};

use crate::Store;

/// Fraction digits in the rendered total value locked.
pub const VALUE_LOCKED_SCALE: u32 = 2;

pub fn dashboard(store: &Store) -> DashboardStats {
    let total_tokens = store.tokens.len() as u64;
    let active_presales = store
        .presales
        .iter()
        .filter(|p| p.status == PresaleStatus::Active)
        .count() as u64;
    let total_transactions = total_tokens + store.participants.len() as u64;

    let total_raised = store
        .presales
        .iter()
        .fold(Decimal::ZERO, |sum, p| sum.saturating_add(p.total_raised));

    DashboardStats {
        total_tokens,
        active_presales,
        total_transactions,
        total_value_locked: format_value_locked(total_raised),
    }
}

/// Round half away from zero and always render two fraction digits.
pub fn format_value_locked(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(VALUE_LOCKED_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(VALUE_LOCKED_SCALE);
    rounded.to_string()
}
