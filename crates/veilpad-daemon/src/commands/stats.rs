//! Dashboard command handler.

use std::sync::Arc;

use serde_json::Value;
use veilpad_store::queries::stats;

use super::to_value;
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Aggregate counts and total value locked, computed from current contents.
pub async fn get_dashboard_stats(state: &Arc<DaemonState>) -> Result {
    let store = state.store.read().await;
    to_value(&stats::dashboard(&store))
}
