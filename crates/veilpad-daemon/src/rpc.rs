//! JSON-RPC server over TCP.
//!
//! Listens on a TCP socket, accepts connections, and dispatches
//! newline-delimited JSON-RPC 2.0 method calls to the command handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};
use veilpad_store::StoreError;

use crate::commands;
use crate::DaemonState;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version (must be "2.0").
    pub jsonrpc: String,
    /// Request ID.
    #[serde(default)]
    pub id: Value,
    /// Method name.
    pub method: String,
    /// Parameters.
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
pub struct RpcResponse {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// Request ID.
    pub id: Value,
    /// Result or error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    /// Error name.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

impl RpcError {
    // Standard JSON-RPC errors

    /// Parse error (-32700).
    pub fn parse_error() -> Self {
        Self {
            code: -32700,
            message: "PARSE_ERROR".to_string(),
            data: None,
        }
    }

    /// Invalid request (-32600).
    pub fn invalid_request() -> Self {
        Self {
            code: -32600,
            message: "INVALID_REQUEST".to_string(),
            data: None,
        }
    }

    /// Method not found (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "METHOD_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"method": method})),
        }
    }

    /// Invalid params (-32602).
    pub fn invalid_params(detail: &str) -> Self {
        Self {
            code: -32602,
            message: "INVALID_PARAMS".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    /// Internal error (-32603).
    pub fn internal_error(detail: &str) -> Self {
        Self {
            code: -32603,
            message: "INTERNAL_ERROR".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    // Application errors

    /// Record not found (-32004).
    pub fn not_found(kind: &str, id: &str) -> Self {
        Self {
            code: -32004,
            message: "NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"kind": kind, "id": id})),
        }
    }

    /// Presale totals would overflow (-32005).
    pub fn amount_overflow() -> Self {
        Self {
            code: -32005,
            message: "AMOUNT_OVERFLOW".to_string(),
            data: None,
        }
    }
}

impl From<StoreError> for RpcError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => Self::not_found(kind, &id.to_string()),
            StoreError::NonPositiveContribution => Self::invalid_params(&err.to_string()),
            StoreError::AmountOverflow => Self::amount_overflow(),
            StoreError::Invalid(invalid) => Self::invalid_params(&invalid.to_string()),
        }
    }
}

/// The RPC server.
pub struct RpcServer {
    state: Arc<DaemonState>,
    listener: TcpListener,
}

impl RpcServer {
    /// Bind the listener. Port 0 picks a free port.
    pub async fn bind(state: Arc<DaemonState>, addr: &str) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { state, listener })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the server, accepting connections.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("RPC server listening on {}", self.local_addr()?);

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    debug!(%peer, "Client connected");
                    let state = self.state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(state, stream).await {
                            warn!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handle a single client connection.
async fn handle_connection(state: Arc<DaemonState>, stream: TcpStream) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state.clone(), &line).await;

        let mut response_json = serde_json::to_string(&response)?;
        response_json.push('\n');
        writer.write_all(response_json.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Decode one request line and dispatch it.
pub(crate) async fn handle_line(state: Arc<DaemonState>, line: &str) -> RpcResponse {
    let raw: Value = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(_) => return RpcResponse::error(Value::Null, RpcError::parse_error()),
    };
    let id = raw.get("id").cloned().unwrap_or(Value::Null);

    match serde_json::from_value::<RpcRequest>(raw) {
        Ok(request) if request.jsonrpc == "2.0" => dispatch_request(state, request).await,
        _ => RpcResponse::error(id, RpcError::invalid_request()),
    }
}

/// Dispatch a JSON-RPC request to the appropriate command handler.
pub(crate) async fn dispatch_request(state: Arc<DaemonState>, request: RpcRequest) -> RpcResponse {
    let id = request.id.clone();
    let method = request.method.as_str();
    let params = &request.params;

    debug!("Dispatching RPC method: {}", method);

    let result = match method {
        // Dashboard
        "get_dashboard_stats" => commands::stats::get_dashboard_stats(&state).await,

        // Tokens
        "get_tokens" => commands::tokens::get_tokens(&state).await,
        "get_recent_tokens" => commands::tokens::get_recent_tokens(&state, params).await,
        "get_token" => commands::tokens::get_token(&state, params).await,
        "get_tokens_by_creator" => commands::tokens::get_tokens_by_creator(&state, params).await,
        "create_token" => commands::tokens::create_token(&state, params).await,
        "update_token" => commands::tokens::update_token(&state, params).await,

        // Presales
        "get_presales" => commands::presales::get_presales(&state).await,
        "get_active_presales" => commands::presales::get_active_presales(&state).await,
        "get_presales_by_status" => {
            commands::presales::get_presales_by_status(&state, params).await
        }
        "get_presale" => commands::presales::get_presale(&state, params).await,
        "create_presale" => commands::presales::create_presale(&state, params).await,
        "update_presale" => commands::presales::update_presale(&state, params).await,

        // Participants
        "get_participants" => commands::participants::get_participants(&state, params).await,
        "get_participant" => commands::participants::get_participant(&state, params).await,
        "participate" => commands::participants::participate(&state, params).await,

        // Diagnostics
        "get_daemon_info" => commands::diagnostics::get_daemon_info(&state).await,

        _ => Err(RpcError::method_not_found(method)),
    };

    match result {
        Ok(value) => RpcResponse::success(id, value),
        Err(err) => {
            warn!(method, code = err.code, "Request rejected: {}", err.message);
            RpcResponse::error(id, err)
        }
    }
}
