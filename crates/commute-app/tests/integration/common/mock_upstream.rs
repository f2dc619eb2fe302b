//! Mock upstream server for integration tests.
//!
//! Serves canned TfL line-status, arrivals and Open-Meteo forecast bodies
//! and records every request path and query string.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};

#[derive(Clone, Default)]
struct Shared {
    bodies: Arc<Mutex<HashMap<String, Value>>>,
    failures: Arc<Mutex<HashMap<String, u16>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// A mock TfL + Open-Meteo server for testing.
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    shared: Shared,
}

impl MockUpstream {
    /// Start a new mock server on an available port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shared = Shared::default();

        let app = Router::new()
            .route("/Line/{line}/Status", get(serve))
            .route("/StopPoint/{stop}/Arrivals", get(serve))
            .route("/v1/forecast", get(serve))
            .with_state(shared.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await;
        });

        Self {
            addr,
            shutdown_tx,
            shared,
        }
    }

    /// Base URL, usable for both the TfL and weather settings.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serve `body` for requests to `path`.
    pub async fn set_body(&self, path: &str, body: Value) {
        self.shared.bodies.lock().await.insert(path.to_string(), body);
    }

    /// Answer requests to `path` with an error status.
    pub async fn set_failure(&self, path: &str, status: u16) {
        self.shared
            .failures
            .lock()
            .await
            .insert(path.to_string(), status);
    }

    /// Received requests as `path?query`.
    pub async fn requests(&self) -> Vec<String> {
        self.shared.requests.lock().await.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn serve(
    State(shared): State<Shared>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Response {
    let path = uri.path().to_string();
    shared
        .requests
        .lock()
        .await
        .push(format!("{}?{}", path, query.unwrap_or_default()));

    if let Some(status) = shared.failures.lock().await.get(&path) {
        let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "upstream failure").into_response();
    }

    let body = shared
        .bodies
        .lock()
        .await
        .get(&path)
        .cloned()
        .unwrap_or(Value::Array(vec![]));
    Json(body).into_response()
}
