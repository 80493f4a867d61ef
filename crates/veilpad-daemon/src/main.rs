//! veilpad: the Veilpad launchpad daemon.
//!
//! Single OS process running a Tokio async runtime. It owns the in-memory
//! token/presale store and serves it to the dashboard UI via newline-delimited
//! JSON-RPC over TCP.

mod commands;
mod config;
mod deploy;
mod events;
mod journal;
mod rpc;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use veilpad_store::Store;

use crate::config::DaemonConfig;
use crate::events::{Event, EventBus, EVENT_BUFFER};
use crate::rpc::RpcServer;

/// Daemon-wide shared state.
pub struct DaemonState {
    /// The entity store. Every store operation runs under this lock.
    pub store: Arc<RwLock<Store>>,
    /// Configuration.
    pub config: DaemonConfig,
    /// Event bus for announcing store changes.
    pub event_bus: EventBus,
    pub started_at: Instant,
}

impl DaemonState {
    pub fn new(store: Store, config: DaemonConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config,
            event_bus: EventBus::new(EVENT_BUFFER),
            started_at: Instant::now(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = DaemonConfig::load()?;

    // 2. Initialize tracing
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.log_directives())?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Veilpad daemon starting");

    // 3. Build the store
    let store = if config.store.seed_demo_data {
        Store::seeded()
    } else {
        Store::new()
    };

    // 4. Build daemon state
    let listen_addr = config.server.listen_addr.clone();
    let state = Arc::new(DaemonState::new(store, config));

    // 5. Start the change journal
    if state.config.journal.enabled {
        let window = Duration::from_millis(state.config.journal.debounce_ms);
        tokio::spawn(journal::run(
            state.event_bus.subscribe(),
            window,
            |entry| {
                info!(changes = entry.changes, "Journal: {}", entry.latest);
            },
        ));
    }

    // 6. Bind the RPC server
    let rpc_server = RpcServer::bind(state.clone(), &listen_addr).await?;
    let bound = rpc_server.local_addr()?;

    // 7. Emit DaemonStarted event
    state.event_bus.emit(Event::daemon_started(&bound.to_string()));

    // 8. Run the RPC server until Ctrl-C
    tokio::select! {
        result = rpc_server.run() => {
            if let Err(e) = result {
                error!("RPC server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }

    info!("Daemon stopped");
    Ok(())
}
