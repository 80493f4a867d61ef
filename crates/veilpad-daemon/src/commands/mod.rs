//! RPC command handlers.
//!
//! Each submodule implements the commands for one record kind. Handlers decode
//! and validate their params, run one store operation under the store lock,
//! and emit an event for every mutation.

pub mod diagnostics;
pub mod participants;
pub mod presales;
pub mod stats;
pub mod tokens;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;
use veilpad_types::validation::Validate;

use crate::rpc::RpcError;

/// Decode `params` into a typed input.
pub(crate) fn decode<T: DeserializeOwned>(params: &Value) -> Result<T, RpcError> {
    T::deserialize(params).map_err(|e| RpcError::invalid_params(&e.to_string()))
}

/// Decode `params` and run its validation rules.
pub(crate) fn validated<T: DeserializeOwned + Validate>(params: &Value) -> Result<T, RpcError> {
    let input: T = decode(params)?;
    input
        .validate()
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    Ok(input)
}

/// Read a required UUID field from `params`.
pub(crate) fn required_id(params: &Value, field: &str) -> Result<Uuid, RpcError> {
    let raw = params
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params(&format!("{field} required")))?;
    Uuid::parse_str(raw).map_err(|_| RpcError::invalid_params(&format!("{field}: invalid id")))
}

/// Serialize a handler result.
pub(crate) fn to_value(value: &impl Serialize) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal_error(&e.to_string()))
}
