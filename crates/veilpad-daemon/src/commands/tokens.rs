//! Token command handlers.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use veilpad_store::queries::tokens;
use veilpad_types::{NewToken, TokenPatch, DEFAULT_RECENT_LIMIT};

use super::{required_id, to_value, validated};
use crate::deploy;
use crate::events::Event;
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// All tokens, newest first.
pub async fn get_tokens(state: &Arc<DaemonState>) -> Result {
    let store = state.store.read().await;
    to_value(&tokens::all(&store))
}

/// The newest `limit` tokens (default 5).
pub async fn get_recent_tokens(state: &Arc<DaemonState>, params: &Value) -> Result {
    let limit = match params.get("limit") {
        None | Some(Value::Null) => DEFAULT_RECENT_LIMIT,
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| RpcError::invalid_params("limit must be a non-negative integer"))?,
    };

    let store = state.store.read().await;
    to_value(&tokens::recent(&store, limit))
}

pub async fn get_token(state: &Arc<DaemonState>, params: &Value) -> Result {
    let id = required_id(params, "id")?;
    let store = state.store.read().await;
    let token =
        tokens::get(&store, &id).ok_or_else(|| RpcError::not_found("token", &id.to_string()))?;
    to_value(&token)
}

/// Tokens created by an address, compared case-insensitively.
pub async fn get_tokens_by_creator(state: &Arc<DaemonState>, params: &Value) -> Result {
    let creator = params
        .get("creatorAddress")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params("creatorAddress required"))?;

    let store = state.store.read().await;
    to_value(&tokens::by_creator(&store, creator))
}

/// Create a token and schedule its simulated deployment.
pub async fn create_token(state: &Arc<DaemonState>, params: &Value) -> Result {
    let input: NewToken = validated(params)?;

    let token = {
        let mut store = state.store.write().await;
        tokens::create(&mut store, input)
    };

    info!(id = %token.id, symbol = %token.symbol, "Token created");
    state.event_bus.emit(Event::token_created(&token));
    deploy::spawn_simulated_deployment(state, token.id);

    to_value(&token)
}

/// Merge `updates` into an existing token. An empty patch announces nothing.
pub async fn update_token(state: &Arc<DaemonState>, params: &Value) -> Result {
    let id = required_id(params, "id")?;
    let patch: TokenPatch = validated(params.get("updates").unwrap_or(&Value::Null))?;
    let changed = !patch.is_empty();

    let token = {
        let mut store = state.store.write().await;
        tokens::update(&mut store, &id, patch)
    }
    .ok_or_else(|| RpcError::not_found("token", &id.to_string()))?;

    if changed {
        state.event_bus.emit(Event::token_updated(&token));
    }
    to_value(&token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{self, address};
    use crate::events::EventKind;
    use serde_json::json;
    use uuid::Uuid;

    async fn create(state: &Arc<DaemonState>, name: &str, symbol: &str) -> Value {
        create_token(state, &fixtures::new_token(name, symbol))
            .await
            .expect("create token")
    }

    #[tokio::test]
    async fn test_create_token_applies_defaults() {
        let state = fixtures::state();
        let mut rx = state.event_bus.subscribe();

        let token = create(&state, "Privacy Coin", "PRIV").await;
        assert_eq!(token["status"], "draft");
        assert_eq!(token["network"], "sepolia");
        assert_eq!(token["isEncrypted"], true);
        assert!(token["contractAddress"].is_null());
        assert!(Uuid::parse_str(token["id"].as_str().expect("id")).is_ok());

        let event = rx.try_recv().expect("created event");
        assert_eq!(event.kind, EventKind::TokenCreated);
        assert_eq!(event.summary, "Created new token: Privacy Coin (PRIV)");
    }

    #[tokio::test]
    async fn test_create_token_rejects_invalid_input() {
        let state = fixtures::state();
        let mut params = fixtures::new_token("Privacy Coin", "priv");
        let err = create_token(&state, &params).await.expect_err("lowercase symbol");
        assert_eq!(err.code, -32602);

        params["symbol"] = json!("PRIV");
        params["totalSupply"] = json!("12.5");
        let err = create_token(&state, &params).await.expect_err("fractional supply");
        assert_eq!(err.code, -32602);

        assert_eq!(state.store.read().await.token_count(), 0);
        assert_eq!(state.event_bus.sequence(), 0);
    }

    #[tokio::test]
    async fn test_get_token_and_not_found() {
        let state = fixtures::state();
        let token = create(&state, "Privacy Coin", "PRIV").await;

        let fetched = get_token(&state, &json!({"id": token["id"]}))
            .await
            .expect("get token");
        assert_eq!(fetched, token);

        let missing = Uuid::new_v4();
        let err = get_token(&state, &json!({"id": missing}))
            .await
            .expect_err("unknown id");
        assert_eq!(err, RpcError::not_found("token", &missing.to_string()));
    }

    #[tokio::test]
    async fn test_recent_tokens_limit() {
        let state = fixtures::state();
        for symbol in ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"] {
            create(&state, symbol, symbol).await;
        }

        let default = get_recent_tokens(&state, &Value::Null).await.expect("recent");
        assert_eq!(default.as_array().expect("array").len(), 5);

        let two = get_recent_tokens(&state, &json!({"limit": 2}))
            .await
            .expect("recent");
        assert_eq!(two.as_array().expect("array").len(), 2);

        let zero = get_recent_tokens(&state, &json!({"limit": 0}))
            .await
            .expect("recent");
        assert_eq!(zero, json!([]));

        let err = get_recent_tokens(&state, &json!({"limit": -1}))
            .await
            .expect_err("negative limit");
        assert_eq!(err.code, -32602);
    }

    #[tokio::test]
    async fn test_tokens_by_creator_ignores_case() {
        let state = fixtures::state();
        create(&state, "Privacy Coin", "PRIV").await;

        let mut other = fixtures::new_token("Other", "OTHR");
        other["creatorAddress"] = json!(address('a'));
        create_token(&state, &other).await.expect("create");

        let upper = format!("0x{}", "A".repeat(40));
        let found = get_tokens_by_creator(&state, &json!({"creatorAddress": upper}))
            .await
            .expect("by creator");
        let found = found.as_array().expect("array");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["symbol"], "OTHR");

        let all = get_tokens(&state).await.expect("all");
        assert_eq!(all.as_array().expect("array").len(), 2);
    }

    #[tokio::test]
    async fn test_update_token() {
        let state = fixtures::state();
        let token = create(&state, "Privacy Coin", "PRIV").await;

        let updated = update_token(
            &state,
            &json!({"id": token["id"], "updates": {"status": "deploying", "name": "Renamed"}}),
        )
        .await
        .expect("update");
        assert_eq!(updated["status"], "deploying");
        assert_eq!(updated["name"], "Renamed");
        assert_eq!(updated["symbol"], "PRIV");
        assert_eq!(updated["createdAt"], token["createdAt"]);
    }

    #[tokio::test]
    async fn test_update_token_rejects_immutable_fields() {
        let state = fixtures::state();
        let token = create(&state, "Privacy Coin", "PRIV").await;

        let err = update_token(
            &state,
            &json!({"id": token["id"], "updates": {"createdAt": "2020-01-01T00:00:00Z"}}),
        )
        .await
        .expect_err("createdAt is not patchable");
        assert_eq!(err.code, -32602);
    }

    #[tokio::test]
    async fn test_empty_update_emits_nothing() {
        let state = fixtures::state();
        let token = create(&state, "Privacy Coin", "PRIV").await;
        let sequence = state.event_bus.sequence();

        let unchanged = update_token(&state, &json!({"id": token["id"], "updates": {}}))
            .await
            .expect("empty patch");
        assert_eq!(unchanged, token);
        assert_eq!(state.event_bus.sequence(), sequence);

        update_token(&state, &json!({"id": token["id"], "updates": {"name": "Renamed"}}))
            .await
            .expect("update");
        assert_eq!(state.event_bus.sequence(), sequence + 1);
    }

    #[tokio::test]
    async fn test_update_unknown_token() {
        let state = fixtures::state();
        let missing = Uuid::new_v4();
        let err = update_token(&state, &json!({"id": missing, "updates": {"name": "X"}}))
            .await
            .expect_err("unknown id");
        assert_eq!(err.code, -32004);
        assert_eq!(state.event_bus.sequence(), 0);
    }
}
