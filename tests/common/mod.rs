#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use tinylink::{
    client::ApiClient,
    config::{ClientConfig, MissingTotalPolicy},
    management::SessionManager,
};

/// What the fake backend answers. Tests may change it between calls.
#[derive(Clone)]
pub struct Script {
    pub shorten_status: StatusCode,
    pub shorten_body: Value,
    pub shorten_delay: Duration,
    pub stats_status: StatusCode,
    pub stats_body: Value,
    pub stats_delay: Duration,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            shorten_status: StatusCode::OK,
            shorten_body: json!({ "short_url": "https://tiny.example/abc123" }),
            shorten_delay: Duration::ZERO,
            stats_status: StatusCode::OK,
            stats_body: json!({ "short_code": "abc123", "total_clicks": 7, "daily_clicks": 2 }),
            stats_delay: Duration::ZERO,
        }
    }
}

#[derive(Default)]
pub struct Backend {
    pub script: Mutex<Script>,
    pub shorten_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub last_url: Mutex<Option<String>>,
    pub last_code: Mutex<Option<String>>,
}

impl Backend {
    pub fn shorten_calls(&self) -> usize {
        self.shorten_calls.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }

    pub fn last_code(&self) -> Option<String> {
        self.last_code.lock().unwrap().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.script.lock().unwrap());
    }
}

async fn shorten(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.shorten_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_url.lock().unwrap() = body["url"].as_str().map(String::from);

    let script = backend.script.lock().unwrap().clone();
    tokio::time::sleep(script.shorten_delay).await;
    (script.shorten_status, Json(script.shorten_body))
}

async fn stats(
    State(backend): State<Arc<Backend>>,
    Path(code): Path<String>,
) -> (StatusCode, Json<Value>) {
    backend.stats_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_code.lock().unwrap() = Some(code);

    let script = backend.script.lock().unwrap().clone();
    tokio::time::sleep(script.stats_delay).await;
    (script.stats_status, Json(script.stats_body))
}

fn routes() -> Router<Arc<Backend>> {
    Router::new()
        .route("/shorten", post(shorten))
        .route("/stats/{code}", get(stats))
}

/// Starts the fake backend on an ephemeral port and returns its base URL.
/// Routes are served both at the root and under `/api`.
pub async fn spawn_backend(script: Script) -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend {
        script: Mutex::new(script),
        ..Default::default()
    });

    let app = Router::new()
        .merge(routes())
        .nest("/api", routes())
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}

pub fn client(base_url: &str) -> ApiClient {
    client_with_policy(base_url, MissingTotalPolicy::Reject)
}

pub fn client_with_policy(base_url: &str, policy: MissingTotalPolicy) -> ApiClient {
    let config = ClientConfig::new(base_url)
        .unwrap()
        .with_missing_total(policy)
        .with_timeout(Duration::from_secs(5));
    ApiClient::new(config).unwrap()
}

pub async fn session(script: Script) -> (SessionManager, Arc<Backend>) {
    let (base_url, backend) = spawn_backend(script).await;
    (SessionManager::new(client(&base_url)), backend)
}
