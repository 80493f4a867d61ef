//! Token query functions.

use uuid::Uuid;
use veilpad_types::{NewToken, Token, TokenPatch};

use crate::Store;

/// Insert a new token with a fresh id and the current time.
pub fn create(store: &mut Store, input: NewToken) -> Token {
    let id = store.tokens.fresh_id();
    let token = input.into_token(id, store.clock.now());
    tracing::debug!(%id, symbol = %token.symbol, "token created");
    store.tokens.insert(token.clone());
    token
}

/// Merge `patch` into the token. `None` if the id is unknown.
pub fn update(store: &mut Store, id: &Uuid, patch: TokenPatch) -> Option<Token> {
    let token = store.tokens.get_mut(id)?;
    patch.apply(token);
    tracing::debug!(%id, status = token.status.as_str(), "token updated");
    Some(token.clone())
}

pub fn get(store: &Store, id: &Uuid) -> Option<Token> {
    store.tokens.get(id).cloned()
}

/// All tokens, newest first.
pub fn all(store: &Store) -> Vec<Token> {
    store.tokens.newest_first(|_| true, |t| t.created_at)
}

/// The `limit` newest tokens.
pub fn recent(store: &Store, limit: usize) -> Vec<Token> {
    let mut tokens = all(store);
    tokens.truncate(limit);
    tokens
}

/// Tokens created by `creator_address` (case-insensitive), newest first.
pub fn by_creator(store: &Store, creator_address: &str) -> Vec<Token> {
    store.tokens.newest_first(
        |t| t.creator_address.eq_ignore_ascii_case(creator_address),
        |t| t.created_at,
    )
}
