//! # veilpad-types
//!
//! Shared domain types used across the Veilpad workspace: the three stored
//! records (tokens, presales, participants), their insert inputs and
//! partial-update patches, dashboard statistics, and the validation rules
//! applied to everything arriving from the UI.
//!
//! All wire types serialize with camelCase field names. Amounts are
//! [`rust_decimal::Decimal`] values carried as decimal strings.

pub mod participant;
pub mod presale;
pub mod stats;
pub mod token;
pub mod validation;

pub use participant::{NewParticipant, Participant};
pub use presale::{NewPresale, Presale, PresalePatch, PresaleStatus};
pub use stats::DashboardStats;
pub use token::{NewToken, Token, TokenPatch, TokenStatus};
pub use validation::{Validate, ValidationError};

/// Common identifier aliases.
pub type TokenId = uuid::Uuid;
pub type PresaleId = uuid::Uuid;
pub type ParticipantId = uuid::Uuid;

/// Network assigned to tokens that do not name one.
pub const DEFAULT_NETWORK: &str = "sepolia";

/// Number of tokens returned by a recent-tokens listing without an explicit limit.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Hex digits in an Ethereum address (after the `0x` prefix).
pub const ADDRESS_HEX_LEN: usize = 40;

/// Hex digits in a transaction hash (after the `0x` prefix).
pub const TX_HASH_HEX_LEN: usize = 64;

/// Maximum token name length in characters.
pub const MAX_TOKEN_NAME_LEN: usize = 50;

/// Maximum token symbol length in characters.
pub const MAX_TOKEN_SYMBOL_LEN: usize = 10;

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

#[cfg(test)]
mod tests {
    #[test]
    #[ignore] // Run manually to generate bindings
    fn export_ts_bindings() {
        use ts_rs::TS;
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../bindings");
        std::fs::create_dir_all(&dir).expect("create bindings dir");
        crate::token::Token::export_all_to(&dir).expect("export Token");
        crate::token::NewToken::export_all_to(&dir).expect("export NewToken");
        crate::token::TokenPatch::export_all_to(&dir).expect("export TokenPatch");
        crate::presale::Presale::export_all_to(&dir).expect("export Presale");
        crate::presale::NewPresale::export_all_to(&dir).expect("export NewPresale");
        crate::presale::PresalePatch::export_all_to(&dir).expect("export PresalePatch");
        crate::participant::Participant::export_all_to(&dir).expect("export Participant");
        crate::participant::NewParticipant::export_all_to(&dir).expect("export NewParticipant");
        crate::stats::DashboardStats::export_all_to(&dir).expect("export DashboardStats");
    }
}
