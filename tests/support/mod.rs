//! Purpose: Loopback fake of a JSONv2 table instance for integration tests.
//! Exports: `FakeInstance`, `RecordedRequest`.
//! Role: Serve table endpoints from memory and record every request it sees.
//! Invariants: Scripted responses are consumed first, one per request, in order.
//! Invariants: Binds 127.0.0.1 on an ephemeral port; nothing leaves the host.
#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, VecDeque};
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body json")
    }
}

#[derive(Default)]
struct StoreState {
    requests: Vec<RecordedRequest>,
    scripted: VecDeque<(u16, String)>,
    tables: BTreeMap<String, Vec<Map<String, Value>>>,
    next_id: u64,
    delay: Option<Duration>,
}

type Shared = Arc<Mutex<StoreState>>;

pub struct FakeInstance {
    base_url: String,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeInstance {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.set_nonblocking(true).expect("nonblocking");
        let addr = listener.local_addr().expect("addr");
        let state: Shared = Arc::new(Mutex::new(StoreState::default()));
        let (tx, rx) = oneshot::channel::<()>();

        let app = Router::new().fallback(handle).with_state(state.clone());
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await;
            });
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Queues a raw response for the next request, bypassing the store.
    pub fn script(&self, status: u16, body: impl Into<String>) {
        self.lock().scripted.push_back((status, body.into()));
    }

    pub fn script_json(&self, status: u16, body: Value) {
        self.script(status, body.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    /// Seeds a stored row directly; returns its assigned sys_id.
    pub fn seed(&self, endpoint: &str, fields: Value) -> String {
        let mut state = self.lock();
        let Value::Object(fields) = fields else {
            panic!("seed fields must be an object");
        };
        insert_row(&mut state, endpoint, fields, None)
            .get("sys_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn rows(&self, endpoint: &str) -> Vec<Map<String, Value>> {
        self.lock().tables.get(endpoint).cloned().unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.lock().requests.last().cloned().expect("at least one request")
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Drop for FakeInstance {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let delay = state.lock().unwrap_or_else(|p| p.into_inner()).delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: header_text(header::AUTHORIZATION),
        content_type: header_text(header::CONTENT_TYPE),
        body: body.to_vec(),
    };

    let mut guard = state.lock().unwrap_or_else(|p| p.into_inner());
    guard.requests.push(request.clone());
    let (status, body) = match guard.scripted.pop_front() {
        Some(scripted) => scripted,
        None => serve_table(&mut guard, &request),
    };
    drop(guard);

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn serve_table(state: &mut StoreState, request: &RecordedRequest) -> (u16, String) {
    let endpoint = request.path.trim_start_matches('/').to_string();
    let params: Vec<(String, String)> = url::form_urlencoded::parse(request.query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if params.first().map(|(key, _)| key.as_str()) != Some("JSONv2") {
        return (400, "JSONv2 marker required".to_string());
    }
    let param = |name: &str| {
        params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };
    let filter = param("sysparm_query").map(|query| parse_encoded_query(&query));

    let records: Vec<Value> = match param("sysparm_action").as_deref() {
        Some("insert") => {
            let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&request.body) else {
                return (400, "insert body must be an object".to_string());
            };
            let row = insert_row(state, &endpoint, fields, param("sysparm_record_scope"));
            vec![with_success(row)]
        }
        Some("update") => {
            let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&request.body) else {
                return (400, "update body must be an object".to_string());
            };
            let Some(filter) = filter else {
                return (400, "update requires sysparm_query".to_string());
            };
            let rows = state.tables.entry(endpoint).or_default();
            match rows.iter_mut().find(|row| filter_matches(row, &filter)) {
                Some(row) => {
                    for (key, value) in fields {
                        if key != "sys_id" {
                            row.insert(key, value);
                        }
                    }
                    vec![with_success(row.clone())]
                }
                None => Vec::new(),
            }
        }
        Some("deleteRecord") => {
            let id = param("sysparm_sys_id").unwrap_or_default();
            let rows = state.tables.entry(endpoint).or_default();
            match rows.iter().position(|row| row_matches(row, "sys_id", &id)) {
                Some(idx) => vec![with_success(rows.remove(idx))],
                None => Vec::new(),
            }
        }
        Some(other) => return (400, format!("unknown action {other}")),
        None => {
            let rows = state.tables.get(&endpoint).cloned().unwrap_or_default();
            rows.into_iter()
                .filter(|row| match &filter {
                    Some(filter) => filter_matches(row, filter),
                    None => true,
                })
                .map(with_success)
                .collect()
        }
    };
    (200, json!({ "records": records }).to_string())
}

fn insert_row(
    state: &mut StoreState,
    endpoint: &str,
    mut fields: Map<String, Value>,
    scope: Option<String>,
) -> Map<String, Value> {
    state.next_id += 1;
    let id = format!("{:032x}", state.next_id);
    fields.insert("sys_id".to_string(), json!(id));
    let scope = scope.unwrap_or_else(|| "global".to_string());
    fields.insert("sys_scope".to_string(), json!(scope));
    fields.remove("__status");
    fields.remove("__error");
    state
        .tables
        .entry(endpoint.to_string())
        .or_default()
        .push(fields.clone());
    fields
}

/// Equality clauses grouped into `^OR` alternatives.
type EncodedQuery = Vec<Vec<(String, String)>>;

/// Parses an encoded query the way the instance does: a single `^` separates
/// clauses, `^OR` starts an alternative, and `^^` is a literal caret.
fn parse_encoded_query(query: &str) -> EncodedQuery {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut chars = query.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '^' if chars.peek() == Some(&'^') => {
                chars.next();
                current.push('^');
            }
            '^' => clauses.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    clauses.push(current);

    let mut groups: EncodedQuery = vec![Vec::new()];
    for clause in clauses {
        let clause = match clause.strip_prefix("OR") {
            Some(rest) => {
                groups.push(Vec::new());
                rest.to_string()
            }
            None => clause,
        };
        if let Some((field, value)) = clause.split_once('=') {
            groups
                .last_mut()
                .expect("group")
                .push((field.to_string(), value.to_string()));
        }
    }
    groups
}

fn filter_matches(row: &Map<String, Value>, filter: &EncodedQuery) -> bool {
    filter.iter().any(|group| {
        group
            .iter()
            .all(|(field, value)| row_matches(row, field, value))
    })
}

fn row_matches(row: &Map<String, Value>, field: &str, value: &str) -> bool {
    row.get(field).and_then(Value::as_str) == Some(value)
}

fn with_success(mut row: Map<String, Value>) -> Value {
    row.insert("__status".to_string(), json!("success"));
    Value::Object(row)
}
