//! Diagnostics command handlers.

use std::sync::Arc;

use serde_json::Value;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Version, uptime, event count and record counts.
pub async fn get_daemon_info(state: &Arc<DaemonState>) -> Result {
    let store = state.store.read().await;
    Ok(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "event_sequence": state.event_bus.sequence(),
        "counts": {
            "tokens": store.token_count(),
            "presales": store.presale_count(),
            "participants": store.participant_count(),
        },
        "deployment_simulated": state.config.deployment.simulate,
    }))
}
