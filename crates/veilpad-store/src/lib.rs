//! # veilpad-store
//!
//! In-memory entity store for the Veilpad daemon.
//! Holds the token, presale, and participant collections for the lifetime of
//! the process and derives dashboard statistics from them on demand.
//!
//! ## Layout
//!
//! - Each collection is a [`table::Table`]: an append-only arena plus an id index
//! - Records are never removed, so arena positions stay valid
//! - Timestamps come from an injectable [`clock::Clock`]
//! - Query functions live in [`queries`], one module per collection
//!
//! The store is plain single-owner data. Callers that share it between tasks
//! wrap it in a lock; every query function runs to completion under that lock.

pub mod clock;
pub mod queries;
pub mod seed;
pub mod table;

use uuid::Uuid;
use veilpad_types::{Participant, Presale, Token, ValidationError};

use crate::clock::{Clock, SystemClock};
use crate::table::Table;

/// Store error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("contribution must be greater than zero")]
    NonPositiveContribution,

    #[error("amount overflow")]
    AmountOverflow,

    #[error("invalid presale: {0}")]
    Invalid(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The entity store.
pub struct Store {
    pub(crate) tokens: Table<Token>,
    pub(crate) presales: Table<Presale>,
    pub(crate) participants: Table<Participant>,
    pub(crate) clock: Box<dyn Clock>,
}

impl Store {
    /// Create an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store on the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            tokens: Table::new(),
            presales: Table::new(),
            participants: Table::new(),
            clock: Box::new(clock),
        }
    }

    /// Create a store pre-populated with the demo tokens and presales.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        seed::demo_data(&mut store);
        store
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn presale_count(&self) -> usize {
        self.presales.len()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert_eq!(store.token_count(), 0);
        assert_eq!(store.presale_count(), 0);
        assert_eq!(store.participant_count(), 0);
    }

    #[test]
    fn test_seeded_store() {
        let store = Store::seeded();
        assert_eq!(store.token_count(), 2);
        assert_eq!(store.presale_count(), 2);
        assert_eq!(store.participant_count(), 0);
    }

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = StoreError::NotFound {
            kind: "presale",
            id,
        };
        assert_eq!(
            err.to_string(),
            "presale not found: 00000000-0000-0000-0000-000000000000"
        );
    }
}
