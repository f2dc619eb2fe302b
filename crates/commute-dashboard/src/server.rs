//! HTTP server implementation using axum.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use commute_feed::SnapshotAggregator;
use commute_telemetry::Metrics;
use futures_util::stream::StreamExt;
use futures_util::SinkExt;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use crate::config::DashboardConfig;
use crate::state::DashboardState;
use crate::types::{DashboardMessage, ErrorBody};

const INDEX_HTML: &str = include_str!("../static/index.html");
/// Replaced in the page with the refresh period in milliseconds.
const REFRESH_MS_PLACEHOLDER: &str = "__REFRESH_MS__";

/// Buffered messages per WebSocket client before it is considered lagged.
const BROADCAST_CAPACITY: usize = 16;

/// Bounds the number of concurrent WebSocket connections.
pub struct ConnectionLimiter {
    current: AtomicUsize,
    max: usize,
}

impl ConnectionLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            max,
        }
    }

    /// Reserve a slot. The slot is released when the guard drops.
    pub fn try_acquire(self: &Arc<Self>) -> Option<ConnectionGuard> {
        loop {
            let current = self.current.load(Ordering::Acquire);
            if current >= self.max {
                return None;
            }
            if self
                .current
                .compare_exchange(current, current + 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                Metrics::ws_connections_set((current + 1) as i64);
                return Some(ConnectionGuard {
                    limiter: Arc::clone(self),
                });
            }
        }
    }

    pub fn current_count(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }
}

pub struct ConnectionGuard {
    limiter: Arc<ConnectionLimiter>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let previous = self.limiter.current.fetch_sub(1, Ordering::Release);
        Metrics::ws_connections_set(previous.saturating_sub(1) as i64);
    }
}

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    dashboard_state: DashboardState,
    aggregator: Arc<SnapshotAggregator>,
    broadcast_tx: broadcast::Sender<String>,
    connection_limiter: Arc<ConnectionLimiter>,
    config: DashboardConfig,
}

impl AppState {
    pub fn new(
        dashboard_state: DashboardState,
        aggregator: Arc<SnapshotAggregator>,
        broadcast_tx: broadcast::Sender<String>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            dashboard_state,
            aggregator,
            broadcast_tx,
            connection_limiter: Arc::new(ConnectionLimiter::new(config.max_connections)),
            config,
        }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    let allow_cors = state.config.allow_cors;
    let router = Router::new()
        .route("/", get(serve_index))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/latest", get(get_latest))
        .route("/ws", get(ws_handler))
        .route("/metrics", get(get_metrics))
        .with_state(state);

    if allow_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    let refresh_ms = state.config.refresh_interval_secs.max(1) * 1000;
    Html(INDEX_HTML.replace(REFRESH_MS_PLACEHOLDER, &refresh_ms.to_string()))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// Run one aggregation now and return it.
async fn get_dashboard(State(state): State<AppState>) -> Response {
    match state.aggregator.get_dashboard_snapshot().await {
        Ok(snapshot) => (
            [(header::CACHE_CONTROL, "no-store")],
            Json(snapshot),
        )
            .into_response(),
        Err(e) => {
            let status = if e.is_upstream() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, e.to_string())
        }
    }
}

/// Latest snapshot from the refresh loop.
async fn get_latest(State(state): State<AppState>) -> Response {
    match state.dashboard_state.latest() {
        Some(latest) => ([(header::CACHE_CONTROL, "no-store")], Json(latest)).into_response(),
        None => {
            let message = state
                .dashboard_state
                .last_error()
                .unwrap_or_else(|| "No snapshot available yet".to_string());
            error_response(StatusCode::SERVICE_UNAVAILABLE, message)
        }
    }
}

async fn get_metrics() -> Response {
    match Metrics::encode_text() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// WebSocket upgrade handler.
async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let Some(guard) = state.connection_limiter.try_acquire() else {
        warn!(
            current = state.connection_limiter.current_count(),
            max = state.config.max_connections,
            "WebSocket connection limit reached"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections").into_response();
    };

    info!(
        connections = state.connection_limiter.current_count(),
        "New WebSocket connection"
    );

    ws.on_upgrade(move |socket| handle_ws_connection(socket, state, guard))
}

/// Handle a WebSocket connection.
async fn handle_ws_connection(socket: WebSocket, state: AppState, _guard: ConnectionGuard) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before sending the initial snapshot so no refresh is missed.
    let mut broadcast_rx = state.broadcast_tx.subscribe();

    if let Some(latest) = state.dashboard_state.latest() {
        let initial_msg = DashboardMessage::Snapshot {
            timestamp_ms: latest.updated_at_ms,
            snapshot: latest.snapshot,
        };
        if let Ok(json) = serde_json::to_string(&initial_msg) {
            if sender.send(Message::Text(json.into())).await.is_err() {
                debug!("Failed to send initial snapshot, client disconnected");
                return;
            }
        }
    }

    // Drain incoming frames; pongs are handled by axum.
    let mut incoming_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "WebSocket receive error");
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            result = broadcast_rx.recv() => {
                match result {
                    Ok(msg) => {
                        if sender.send(Message::Text(msg.into())).await.is_err() {
                            debug!("Failed to send message, client disconnected");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "WebSocket client lagged, catching up");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }
            _ = &mut incoming_task => {
                debug!("Incoming task completed, closing connection");
                break;
            }
        }
    }

    incoming_task.abort();
    info!(
        connections = state.connection_limiter.current_count().saturating_sub(1),
        "WebSocket connection closed"
    );
}

/// Run the dashboard HTTP server and its refresh loop until the listener fails.
pub async fn run_server(
    aggregator: Arc<SnapshotAggregator>,
    config: DashboardConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (broadcast_tx, _) = broadcast::channel::<String>(BROADCAST_CAPACITY);
    let dashboard_state = DashboardState::new();

    let state = AppState::new(
        dashboard_state.clone(),
        Arc::clone(&aggregator),
        broadcast_tx.clone(),
        config.clone(),
    );
    let app = create_router(state);

    let interval = Duration::from_secs(config.refresh_interval_secs.max(1));
    let poller = tokio::spawn(crate::poller::run_poller(
        aggregator,
        dashboard_state,
        broadcast_tx,
        interval,
    ));

    let addr = config.bind_address();
    info!(address = %addr, refresh_secs = interval.as_secs(), "Starting dashboard server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let result = axum::serve(listener, app).await;
    poller.abort();
    result?;

    Ok(())
}
