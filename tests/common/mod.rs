//! Mock MPC gateway shared by the integration tests.
//!
//! Serves the credential exchange and logout endpoints itself and answers
//! every other path from scripted replies, recording each request it sees.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use mpc_sdk::{MpcClient, SdkConfig};

pub const TOKEN_PATH: &str = "/api/v1/auth/token";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";
pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";

/// Build an envelope body.
pub fn envelope(code: i64, message: &str, data: Value) -> String {
    json!({
        "code": code,
        "message": message,
        "trace_id": format!("trace-{}", code),
        "timestamp": 1_700_000_000,
        "data": data,
    })
    .to_string()
}

pub fn success(data: Value) -> String {
    envelope(200_000, "success", data)
}

/// One scripted answer.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A request as the gateway received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Default)]
struct GatewayState {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    issued: Mutex<Vec<String>>,
    revoked: Mutex<HashSet<String>>,
    exchanges: AtomicU32,
    logouts: AtomicU32,
    exchange_reply: Mutex<Option<Reply>>,
    logout_reply: Mutex<Option<Reply>>,
    exchange_delay: Mutex<Duration>,
    token_ttl: Mutex<Option<u64>>,
}

pub struct MockGateway {
    addr: SocketAddr,
    state: Arc<GatewayState>,
}

impl MockGateway {
    pub async fn start() -> Self {
        let state = Arc::new(GatewayState {
            token_ttl: Mutex::new(Some(3600)),
            ..Default::default()
        });
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> SdkConfig {
        SdkConfig::custom(self.base_url())
    }

    pub fn client(&self) -> MpcClient {
        MpcClient::new(API_KEY, API_SECRET, self.config()).unwrap()
    }

    /// Queue a reply for `method path`. The last queued reply keeps being served.
    pub fn reply(&self, method: Method, path: &str, reply: Reply) {
        self.state
            .replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Override the credential exchange answer.
    pub fn reply_to_exchange(&self, reply: Reply) {
        *self.state.exchange_reply.lock().unwrap() = Some(reply);
    }

    /// Override the logout answer.
    pub fn reply_to_logout(&self, reply: Reply) {
        *self.state.logout_reply.lock().unwrap() = Some(reply);
    }

    pub fn delay_exchange(&self, delay: Duration) {
        *self.state.exchange_delay.lock().unwrap() = delay;
    }

    /// `expires_in` handed out with new tokens; `None` omits the field.
    pub fn set_token_ttl(&self, ttl: Option<u64>) {
        *self.state.token_ttl.lock().unwrap() = ttl;
    }

    /// Reject every token issued so far with code 401000.
    pub fn revoke_issued_tokens(&self) {
        let issued = self.state.issued.lock().unwrap().clone();
        self.state.revoked.lock().unwrap().extend(issued);
    }

    pub fn exchanges(&self) -> u32 {
        self.state.exchanges.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> u32 {
        self.state.logouts.load(Ordering::SeqCst)
    }

    pub fn issued_tokens(&self) -> Vec<String> {
        self.state.issued.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests other than credential exchange and logout.
    pub fn api_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path != TOKEN_PATH && r.path != LOGOUT_PATH)
            .collect()
    }

    pub fn last_api_request(&self) -> RecordedRequest {
        self.api_requests().pop().expect("no API request recorded")
    }
}

async fn handle(
    State(state): State<Arc<GatewayState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers: headers.clone(),
        body: body.to_vec(),
    });

    if method == Method::POST && path == TOKEN_PATH {
        return exchange(&state, &body).await;
    }

    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let valid = bearer.as_ref().is_some_and(|token| {
        state.issued.lock().unwrap().contains(token) && !state.revoked.lock().unwrap().contains(token)
    });
    if !valid {
        return respond(Reply::with_status(401, envelope(401_000, "token expired", Value::Null)));
    }

    if method == Method::POST && path == LOGOUT_PATH {
        state.logouts.fetch_add(1, Ordering::SeqCst);
        if let Some(reply) = state.logout_reply.lock().unwrap().clone() {
            return respond(reply);
        }
        if let Some(token) = bearer {
            state.revoked.lock().unwrap().insert(token);
        }
        return respond(Reply::ok(success(Value::Null)));
    }

    let scripted = {
        let mut replies = state.replies.lock().unwrap();
        replies.get_mut(&(method, path)).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })
    };
    respond(scripted.unwrap_or_else(|| Reply::with_status(404, envelope(404_000, "not found", Value::Null))))
}

async fn exchange(state: &GatewayState, body: &[u8]) -> Response {
    let n = state.exchanges.fetch_add(1, Ordering::SeqCst) + 1;

    let delay = *state.exchange_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if let Some(reply) = state.exchange_reply.lock().unwrap().clone() {
        return respond(reply);
    }

    let credentials: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    if credentials["api_key"] != API_KEY || credentials["api_secret"] != API_SECRET {
        return respond(Reply::ok(envelope(400_000, "invalid credential", Value::Null)));
    }

    let token = format!("token-{}", n);
    state.issued.lock().unwrap().push(token.clone());
    let data = match *state.token_ttl.lock().unwrap() {
        Some(ttl) => json!({ "token": token, "expires_in": ttl }),
        None => json!({ "token": token }),
    };
    respond(Reply::ok(success(data)))
}

fn respond(reply: Reply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [("content-type", "application/json")], reply.body).into_response()
}
