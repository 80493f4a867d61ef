//! Presale command handlers.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use veilpad_store::queries::presales;
use veilpad_types::{NewPresale, PresalePatch, PresaleStatus};

use super::{decode, required_id, to_value, validated};
use crate::events::Event;
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// All presales, newest first.
pub async fn get_presales(state: &Arc<DaemonState>) -> Result {
    let store = state.store.read().await;
    to_value(&presales::all(&store))
}

pub async fn get_active_presales(state: &Arc<DaemonState>) -> Result {
    let store = state.store.read().await;
    to_value(&presales::active(&store))
}

pub async fn get_presales_by_status(state: &Arc<DaemonState>, params: &Value) -> Result {
    let status: PresaleStatus = decode(
        params
            .get("status")
            .ok_or_else(|| RpcError::invalid_params("status required"))?,
    )?;

    let store = state.store.read().await;
    to_value(&presales::by_status(&store, status))
}

pub async fn get_presale(state: &Arc<DaemonState>, params: &Value) -> Result {
    let id = required_id(params, "id")?;
    let store = state.store.read().await;
    let presale = presales::get(&store, &id)
        .ok_or_else(|| RpcError::not_found("presale", &id.to_string()))?;
    to_value(&presale)
}

/// Create a presale. Totals start at zero whatever the client sends.
pub async fn create_presale(state: &Arc<DaemonState>, params: &Value) -> Result {
    let input: NewPresale = validated(params)?;

    let presale = {
        let mut store = state.store.write().await;
        presales::create(&mut store, input)
    };

    info!(id = %presale.id, token = %presale.token_symbol, "Presale created");
    state.event_bus.emit(Event::presale_created(&presale));
    to_value(&presale)
}

/// Merge `updates` into an existing presale.
///
/// The merged record is re-checked against the stored dates and caps. An
/// empty patch returns the presale unchanged and announces nothing.
pub async fn update_presale(state: &Arc<DaemonState>, params: &Value) -> Result {
    let id = required_id(params, "id")?;
    let patch: PresalePatch = validated(params.get("updates").unwrap_or(&Value::Null))?;
    let changed = !patch.is_empty();

    let presale = {
        let mut store = state.store.write().await;
        presales::update(&mut store, &id, patch)?
    }
    .ok_or_else(|| RpcError::not_found("presale", &id.to_string()))?;

    if changed {
        state.event_bus.emit(Event::presale_updated(&presale));
    }
    to_value(&presale)
}
