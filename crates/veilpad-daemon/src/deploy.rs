//! Simulated contract deployment.
//!
//! There is no chain connection. A newly created token is marked deployed
//! after a fixed delay, with a random contract address and transaction hash.

use std::sync::Arc;
use std::time::Duration;

use rand::RngCore;
use tracing::{debug, info};
use uuid::Uuid;
use veilpad_store::queries::tokens;
use veilpad_types::{Token, TokenPatch, TokenStatus};

use crate::events::Event;
use crate::DaemonState;

const ADDRESS_BYTES: usize = 20;
const TX_HASH_BYTES: usize = 32;

/// `0x`-prefixed lowercase hex of `len` random bytes.
fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

/// Schedule deployment of `token_id` if simulation is enabled.
pub fn spawn_simulated_deployment(state: &Arc<DaemonState>, token_id: Uuid) {
    let settings = &state.config.deployment;
    if !settings.simulate {
        return;
    }

    let delay = Duration::from_millis(settings.delay_ms);
    let state = Arc::clone(state);
    debug!(%token_id, ?delay, "Deployment scheduled");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        finish_deployment(&state, &token_id).await;
    });
}

/// Mark the token deployed.
///
/// `None` if the token is unknown or has already left `draft`/`deploying`,
/// for example a client-supplied deployment or a later `failed` status.
pub async fn finish_deployment(state: &DaemonState, token_id: &Uuid) -> Option<Token> {
    let patch = TokenPatch {
        status: Some(TokenStatus::Deployed),
        contract_address: Some(random_hex(ADDRESS_BYTES)),
        deployment_tx_hash: Some(random_hex(TX_HASH_BYTES)),
        ..Default::default()
    };

    let token = {
        let mut store = state.store.write().await;
        let status = tokens::get(&store, token_id)?.status;
        if !matches!(status, TokenStatus::Draft | TokenStatus::Deploying) {
            debug!(%token_id, status = status.as_str(), "Deployment skipped");
            return None;
        }
        tokens::update(&mut store, token_id, patch)?
    };

    info!(
        id = %token.id,
        symbol = %token.symbol,
        contract = token.contract_address.as_deref().unwrap_or_default(),
        "Token deployed"
    );
    state.event_bus.emit(Event::token_deployed(&token));
    Some(token)
}
