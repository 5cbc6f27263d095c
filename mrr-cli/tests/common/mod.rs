//! In-process mock of the MRR API for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use mrr_cli::api_client::ApiClient;
use mrr_cli::config::Config;

pub const API_KEY: &str = "test_key";
pub const API_SECRET: &str = "test_secret";

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

#[derive(Debug, Clone)]
enum Reply {
    /// 200 with the request body, or a description of the request when it
    /// had none
    Echo,
    Fixed(StatusCode, String),
}

struct ServerState {
    reply: Reply,
    recorded: Mutex<Vec<Recorded>>,
}

pub struct MockServer {
    pub base_url: String,
    state: Arc<ServerState>,
}

impl MockServer {
    pub async fn echo() -> Self {
        Self::start(Reply::Echo).await
    }

    pub async fn replying(status: StatusCode, body: impl Into<String>) -> Self {
        Self::start(Reply::Fixed(status, body.into())).await
    }

    async fn start(reply: Reply) -> Self {
        let state = Arc::new(ServerState {
            reply,
            recorded: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }

    /// Client pointed at this server, optionally below a path prefix such
    /// as `/api/v2`.
    pub fn client_with_prefix(&self, prefix: &str) -> ApiClient {
        let config = Config::new(format!("{}{prefix}", self.base_url), API_KEY, API_SECRET).unwrap();
        ApiClient::new(&config).unwrap()
    }

    pub fn client(&self) -> ApiClient {
        self.client_with_prefix("")
    }
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let (status, reply) = match &state.reply {
        Reply::Echo if body.is_empty() => (
            StatusCode::OK,
            json!({ "method": method.as_str(), "path": uri.path() }).to_string(),
        ),
        Reply::Echo => (StatusCode::OK, String::from_utf8_lossy(&body).into_owned()),
        Reply::Fixed(status, reply) => (*status, reply.clone()),
    };

    state.recorded.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    (status, [(header::CONTENT_TYPE, "application/json")], reply)
}

/// Client for a port nothing listens on.
pub async fn unreachable_client() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = Config::new(format!("http://{addr}"), API_KEY, API_SECRET).unwrap();
    ApiClient::new(&config).unwrap()
}
