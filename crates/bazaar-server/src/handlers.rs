//! Connection handlers for the Bazaar server.
//!
//! This module handles the HTTP surface, the connection lifecycle, and
//! frame decoding. Roster state lives in the hub.

use crate::config::Config;
use crate::hub::{self, ConnectionLease, HubHandle, OpenError};
use crate::metrics::{self, ConnectionMetricsGuard};
use anyhow::{Context, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use bazaar_core::{OutboxReceiver, PresenceRouter};
use bazaar_protocol::{codec, ClientEvent, ConnectionId, FrameFormat, ServerEvent};
use bytes::BytesMut;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, error, info, warn};

/// Shared server state.
pub struct AppState {
    /// Handle to the task owning the presence router.
    pub hub: HubHandle,
    /// Server configuration.
    pub config: Config,
}

impl AppState {
    /// Create new app state and start the hub.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let (hub, _task) = hub::spawn(
            PresenceRouter::with_config(config.router_config()),
            config.limits.max_connections,
        );
        Self { hub, config }
    }
}

/// Run the HTTP/WebSocket server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config) -> Result<()> {
    if config.metrics.enabled {
        if let Err(e) = metrics::start_metrics_server(config.metrics.port) {
            error!("Failed to start metrics server: {}", e);
        }
    }

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    serve(listener, config).await
}

/// Serve on an already bound listener.
///
/// # Errors
///
/// Returns an error if the server stops abnormally.
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    let addr = listener.local_addr()?;
    let websocket_path = config.transport.websocket_path.clone();
    let app = build_app(Arc::new(AppState::new(config)));

    info!("Bazaar server listening on {}", addr);
    info!("WebSocket endpoint: ws://{}{}", addr, websocket_path);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router.
pub fn build_app(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route(&state.config.transport.websocket_path, get(ws_handler))
        .layer(cors)
        .with_state(state)
}

async fn index_handler() -> &'static str {
    "Hello World!"
}

/// Health check handler.
async fn health_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.hub.stats().await {
        Some(stats) => axum::Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "connections": stats.connections,
            "customers": stats.customers,
            "sellers": stats.sellers,
            "adminOnline": stats.admin_online,
        }))
        .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "hub stopped").into_response(),
    }
}

/// WebSocket upgrade handler.
async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    // Requests without an Origin (native clients, tools) are allowed.
    if let Some(origin) = headers.get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|o| state.config.is_origin_allowed(o))
            .unwrap_or(false);
        if !allowed {
            warn!(origin = ?origin, "Rejected WebSocket from disallowed origin");
            return StatusCode::FORBIDDEN.into_response();
        }
    }

    // The hub admits or refuses the connection. A failed upgrade drops the
    // lease, which releases the slot.
    let (lease, outbox) = match state.hub.open(ConnectionId::generate()).await {
        Ok(opened) => opened,
        Err(OpenError::AtCapacity) => {
            warn!("Rejected WebSocket: connection limit reached");
            metrics::record_error("connection_limit");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
        Err(e @ OpenError::Stopped) => {
            error!(error = %e, "Hub unavailable");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    let max_message_size = state.config.limits.max_message_size;
    ws.max_message_size(max_message_size)
        .on_upgrade(move |socket| handle_websocket(socket, state, lease, outbox))
}

/// Handle a WebSocket connection.
async fn handle_websocket(
    socket: WebSocket,
    state: Arc<AppState>,
    lease: ConnectionLease,
    mut outbox: OutboxReceiver,
) {
    let _metrics_guard = ConnectionMetricsGuard::new();
    let connection_id = lease.connection_id().clone();
    let max_frame_size = state.config.limits.max_message_size;

    info!(connection = %connection_id, "Socket connected");

    let (mut sender, mut receiver) = socket.split();

    // Replies follow the framing the client last used.
    let mut format = FrameFormat::Json;

    let handshake = ServerEvent::connected(connection_id.clone());
    if send_event(&mut sender, &handshake, format).await.is_err() {
        error!(connection = %connection_id, "Failed to send handshake");
        return;
    }

    // Read buffer for partial binary frames
    let mut read_buffer = BytesMut::with_capacity(4096);

    let heartbeat_timeout = Duration::from_millis(state.config.heartbeat.timeout_ms);
    let mut heartbeat =
        tokio::time::interval(Duration::from_millis(state.config.heartbeat.interval_ms.max(1)));
    heartbeat.tick().await;
    let mut last_seen = Instant::now();

    loop {
        tokio::select! {
            biased;

            // Events queued by the router
            Some(event) = outbox.recv() => {
                if let Err(e) = send_event(&mut sender, &event, format).await {
                    debug!(connection = %connection_id, error = %e, "Send failed");
                    break;
                }
            }

            // Receive from WebSocket
            msg = receiver.next() => {
                last_seen = Instant::now();
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        format = FrameFormat::Json;
                        match codec::decode_json::<ClientEvent>(&text) {
                            Ok(event) => state.hub.dispatch(connection_id.clone(), event),
                            Err(e) => reject(&connection_id, &e),
                        }
                    }
                    Some(Ok(Message::Binary(data))) => {
                        format = FrameFormat::MessagePack;
                        read_buffer.extend_from_slice(&data);

                        loop {
                            let decoded = codec::decode_from_limited::<ClientEvent>(
                                &mut read_buffer,
                                max_frame_size,
                            );
                            match decoded {
                                Ok(Some(event)) => state.hub.dispatch(connection_id.clone(), event),
                                Ok(None) => break,
                                Err(e) => {
                                    reject(&connection_id, &e);
                                    read_buffer.clear();
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) => {
                        debug!(connection = %connection_id, "Received close frame");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(connection = %connection_id, error = %e, "WebSocket error");
                        metrics::record_error("websocket");
                        break;
                    }
                    None => {
                        debug!(connection = %connection_id, "WebSocket stream ended");
                        break;
                    }
                }
            }

            _ = heartbeat.tick() => {
                if last_seen.elapsed() > heartbeat_timeout {
                    debug!(connection = %connection_id, "Heartbeat timed out");
                    break;
                }
                if sender.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(lease);
    info!(connection = %connection_id, "Socket disconnected");
}

fn reject(connection_id: &ConnectionId, error: &codec::ProtocolError) {
    warn!(connection = %connection_id, error = %error, "Malformed event");
    metrics::record_error("malformed_event");
}

/// Send an event to the WebSocket.
async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
    format: FrameFormat,
) -> Result<()> {
    let message = match format {
        FrameFormat::Json => Message::Text(codec::encode_json(event)?),
        FrameFormat::MessagePack => Message::Binary(codec::encode(event)?.to_vec()),
    };
    sender.send(message).await?;
    Ok(())
}
