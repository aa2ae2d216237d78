//! In-process JSON API standing in for the resource endpoint.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Records served per listable resource.
pub const RECORDS_PER_RESOURCE: usize = 10;

#[derive(Clone, Default)]
struct ApiState {
    hits: Arc<AtomicUsize>,
}

/// Running mock API. The server task stops when this is dropped.
pub struct MockApi {
    pub addr: SocketAddr,
    state: ApiState,
    handle: JoinHandle<()>,
}

impl MockApi {
    /// Serve on an ephemeral port.
    ///
    /// - `/posts`, `/users`: ten `{ "id", "resource" }` records
    /// - `/comments`: 500
    /// - `/profile`: a JSON object instead of a list
    /// - `/slow`: ten records after 300ms
    /// - anything else: 404
    pub async fn start() -> Self {
        let state = ApiState::default();
        let app = Router::new()
            .route("/{resource}", get(resource))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock API failed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn records(resource: &str) -> Json<Value> {
    Json(Value::Array(
        (1..=RECORDS_PER_RESOURCE)
            .map(|id| json!({ "id": id, "resource": resource }))
            .collect(),
    ))
}

async fn resource(
    State(state): State<ApiState>,
    Path(resource): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match resource.as_str() {
        "posts" | "users" => Ok(records(&resource)),
        "comments" => Err(StatusCode::INTERNAL_SERVER_ERROR),
        "profile" => Ok(Json(json!({ "name": "not a list" }))),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Ok(records(&resource))
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}
