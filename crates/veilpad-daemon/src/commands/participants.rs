//! Participant command handlers.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use veilpad_store::queries::participants;
use veilpad_types::NewParticipant;

use super::{required_id, to_value, validated};
use crate::events::Event;
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Contributions to a presale, newest first. Unknown presales have none.
pub async fn get_participants(state: &Arc<DaemonState>, params: &Value) -> Result {
    let presale_id = required_id(params, "presaleId")?;
    let store = state.store.read().await;
    to_value(&participants::by_presale(&store, &presale_id))
}

pub async fn get_participant(state: &Arc<DaemonState>, params: &Value) -> Result {
    let id = required_id(params, "id")?;
    let store = state.store.read().await;
    let participant = participants::get(&store, &id)
        .ok_or_else(|| RpcError::not_found("participant", &id.to_string()))?;
    to_value(&participant)
}

/// Record a contribution and update the presale totals in one store write.
pub async fn participate(state: &Arc<DaemonState>, params: &Value) -> Result {
    let input: NewParticipant = validated(params)?;

    let participant = {
        let mut store = state.store.write().await;
        participants::create(&mut store, input)?
    };

    info!(
        presale = %participant.presale_id,
        amount = %participant.contribution_amount,
        "Participation recorded"
    );
    state
        .event_bus
        .emit(Event::participation_recorded(&participant));
    to_value(&participant)
}
