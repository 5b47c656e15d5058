//! Integration test harness for the invitation site.
//!
//! Tests run the real site and admin routers on ephemeral ports against
//! [`MockBackend`], an in-process stand-in for the hosted PostgREST API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p invite-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `gateway` - Repository calls against the mock backend
//! - `site` - Public pages and the RSVP flow
//! - `admin` - Login, dashboard, settings, gifts and the guest list

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use chrono::{Duration, TimeZone, Utc};
use invite_core::backend::{Gateway, GatewayConfig};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;

/// Anon key the mock accepts.
pub const ANON_KEY: &str = "test-anon-key";

/// Password configured for the admin under test.
pub const ADMIN_PASSWORD: &str = "festa-do-henry";

/// One request received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub table: String,
    /// The `apikey` header, if sent.
    pub apikey: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    confirmations: Vec<Value>,
    admin_settings: Vec<Value>,
    gifts: Vec<Value>,
    requests: Vec<RecordedRequest>,
    /// Columns of `confirmations` the schema does not have yet.
    missing_columns: HashSet<String>,
    /// Tables that answer every request with a 500.
    failing_tables: HashSet<String>,
    next_id: u64,
}

impl MockState {
    fn rows(&mut self, table: &str) -> Option<&mut Vec<Value>> {
        match table {
            "confirmations" => Some(&mut self.confirmations),
            "admin_settings" => Some(&mut self.admin_settings),
            "gifts" => Some(&mut self.gifts),
            _ => None,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process PostgREST stand-in serving `/rest/v1/{table}`.
///
/// Supports `eq.` filters, `order`, `limit` and `select` column lists,
/// and returns affected rows for writes. Rows keep insertion order and get
/// increasing `created_at` stamps.
#[derive(Clone)]
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Start the mock on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new()
            .route("/rest/v1/{table}", any(handle))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    /// Base URL to configure as `BACKEND_URL`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Gateway configuration pointing at this mock.
    #[must_use]
    pub fn config(&self) -> GatewayConfig {
        GatewayConfig::new(&self.url(), ANON_KEY).expect("mock gateway config")
    }

    /// Gateway client pointing at this mock.
    #[must_use]
    pub fn gateway(&self) -> Gateway {
        Gateway::new(&self.config()).expect("mock gateway")
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state lock")
    }

    /// Insert a settings row.
    pub fn seed_settings(&self, max_guests: u32, registration_enabled: bool) {
        let mut state = self.lock();
        let id = state.next_id();
        let row = stamp(
            json!({
                "id": id,
                "max_guests": max_guests,
                "registration_enabled": registration_enabled,
                "updated_at": null,
            }),
            id,
        );
        state.admin_settings.push(row);
    }

    /// Insert a confirmation row as-is (missing columns stay missing).
    pub fn seed_confirmation(&self, row: Value) -> String {
        let mut state = self.lock();
        let id = state.next_id();
        let row = stamp(row, id);
        state.confirmations.push(row);
        id.to_string()
    }

    /// Insert a gift and return its id.
    pub fn seed_gift(&self, name: &str, is_active: bool, sort_order: i32) -> String {
        let mut state = self.lock();
        let id = format!("gift-{}", state.next_id());
        let seq = state.next_id;
        let row = stamp(
            json!({
                "id": id,
                "name": name,
                "description": null,
                "is_active": is_active,
                "sort_order": sort_order,
            }),
            seq,
        );
        state.gifts.push(row);
        id
    }

    /// Pretend `confirmations` is on the first schema revision.
    pub fn drop_extended_columns(&self) {
        self.lock().missing_columns.extend(
            invite_core::backend::confirmations::EXTENDED_COLUMNS
                .iter()
                .map(ToString::to_string),
        );
    }

    /// Make every request to `table` fail with a 500.
    pub fn fail_table(&self, table: &str) {
        self.lock().failing_tables.insert(table.to_string());
    }

    /// Rows currently stored in `table`.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().rows(table).cloned().unwrap_or_default()
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests that changed data (anything but GET).
    #[must_use]
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }
}

/// Give a row an `id` (unless present) and a `created_at` that grows with `seq`.
fn stamp(mut row: Value, seq: u64) -> Value {
    let base = Utc
        .with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid base timestamp");
    let created_at = base + Duration::minutes(i64::try_from(seq).unwrap_or_default());
    if let Some(object) = row.as_object_mut() {
        object.entry("id").or_insert_with(|| json!(seq));
        object
            .entry("created_at")
            .or_insert_with(|| json!(created_at.to_rfc3339()));
    }
    row
}

fn api_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    headers: HeaderMap,
    Path(table): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let mut state = state.lock().expect("mock state lock");

    state.requests.push(RecordedRequest {
        method: method.clone(),
        table: table.clone(),
        apikey: headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query: query.clone(),
        body: body.clone(),
    });

    if state.failing_tables.contains(&table) {
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "XX000",
            "simulated outage",
        );
    }

    let missing = if table == "confirmations" {
        state.missing_columns.clone()
    } else {
        HashSet::new()
    };

    let mut filters = Vec::new();
    let mut order = None;
    let mut limit = None;
    let mut select = None;
    for (key, value) in &query {
        match key.as_str() {
            "order" => order = Some(value.clone()),
            "limit" => limit = value.parse::<usize>().ok(),
            "select" => select = Some(value.clone()),
            _ => {
                if let Some(expected) = value.strip_prefix("eq.") {
                    filters.push((key.clone(), expected.to_string()));
                }
            }
        }
    }

    if method == Method::POST {
        let Some(Value::Object(object)) = body else {
            return api_error(StatusCode::BAD_REQUEST, "PGRST102", "Empty or invalid json");
        };
        if let Some(column) = object.keys().find(|k| missing.contains(*k)) {
            return api_error(
                StatusCode::BAD_REQUEST,
                "PGRST204",
                &format!("Could not find the '{column}' column of '{table}' in the schema cache"),
            );
        }
        let seq = state.next_id();
        let mut object = object;
        if table == "gifts" {
            object.insert("id".to_string(), json!(format!("gift-{seq}")));
        }
        let row = stamp(Value::Object(object), seq);
        let Some(rows) = state.rows(&table) else {
            return api_error(StatusCode::NOT_FOUND, "42P01", "relation does not exist");
        };
        rows.push(row.clone());
        return (StatusCode::CREATED, Json(json!([row]))).into_response();
    }

    if let Some(columns) = &select
        && let Some(column) = columns.split(',').find(|c| missing.contains(*c))
    {
        return api_error(
            StatusCode::BAD_REQUEST,
            "42703",
            &format!("column {table}.{column} does not exist"),
        );
    }

    let Some(rows) = state.rows(&table) else {
        return api_error(StatusCode::NOT_FOUND, "42P01", "relation does not exist");
    };

    let result: Vec<Value> = match method {
        Method::GET => {
            let mut found: Vec<Value> = rows
                .iter()
                .filter(|r| row_matches(r, &filters))
                .cloned()
                .collect();
            if let Some(order) = &order {
                sort_rows(&mut found, order);
            }
            if let Some(limit) = limit {
                found.truncate(limit);
            }
            match select.as_deref() {
                None | Some("*") => found,
                Some(columns) => found.iter().map(|r| project(r, columns)).collect(),
            }
        }
        Method::PATCH => {
            let patch = body.and_then(|b| b.as_object().cloned()).unwrap_or_default();
            rows.iter_mut()
                .filter(|r| row_matches(r, &filters))
                .map(|row| {
                    if let Some(object) = row.as_object_mut() {
                        object.extend(patch.clone());
                    }
                    row.clone()
                })
                .collect()
        }
        Method::DELETE => {
            let (removed, kept): (Vec<Value>, Vec<Value>) =
                rows.drain(..).partition(|r| row_matches(r, &filters));
            *rows = kept;
            removed
        }
        _ => return StatusCode::METHOD_NOT_ALLOWED.into_response(),
    };

    Json(Value::Array(result)).into_response()
}

fn row_matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(column, expected)| row.get(column).map(render).as_ref() == Some(expected))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sort_rows(rows: &mut [Value], order: &str) {
    let (column, direction) = order.split_once('.').unwrap_or((order, "asc"));
    rows.sort_by(|a, b| {
        let a = a.get(column).map(render).unwrap_or_default();
        let b = b.get(column).map(render).unwrap_or_default();
        match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.total_cmp(&y),
            _ => a.cmp(&b),
        }
    });
    if direction == "desc" {
        rows.reverse();
    }
}

fn project(row: &Value, columns: &str) -> Value {
    let mut out = Map::new();
    for column in columns.split(',') {
        if let Some(value) = row.get(column) {
            out.insert(column.to_string(), value.clone());
        }
    }
    Value::Object(out)
}

// =============================================================================
// Application servers
// =============================================================================

/// Serve `app` on an ephemeral port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind app listener");
    let addr = listener.local_addr().expect("app address");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .ok();
    });
    format!("http://{addr}")
}

/// Start the public site against `backend`; returns its base URL.
pub async fn spawn_site(backend: &MockBackend) -> String {
    let config = invite_site::config::SiteConfig::new(backend.config());
    let state = invite_site::state::AppState::new(config).expect("site state");
    serve(invite_site::app(state)).await
}

/// Start the admin dashboard against `backend`; returns its base URL.
pub async fn spawn_admin(backend: &MockBackend) -> String {
    let phc = invite_admin::services::hash_password(ADMIN_PASSWORD).expect("hash password");
    let hash = invite_admin::config::PasswordHashString::parse(&phc).expect("parse hash");
    let config = invite_admin::config::AdminConfig::new(backend.config(), hash);
    let state = invite_admin::state::AppState::new(config).expect("admin state");
    serve(invite_admin::app(state)).await
}

/// HTTP client that keeps cookies and does not follow redirects.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build test client")
}

/// Client already logged into the admin at `admin_url`.
pub async fn admin_client(admin_url: &str) -> reqwest::Client {
    let client = client();
    let response = client
        .post(format!("{admin_url}/auth/login"))
        .form(&[("password", ADMIN_PASSWORD)])
        .send()
        .await
        .expect("login request");
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    client
}
