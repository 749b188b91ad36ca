//! In-process stand-in for the order backend, shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";
/// `Basic base64("admin:secret")`
pub const ADMIN_BASIC_HEADER: &str = "Basic YWRtaW46c2VjcmV0";
pub const STAFF_TOKEN: &str = "jwt-staff";

/// Id and view token handed out by `POST /orders`.
pub const CREATED_ID: &str = "665f1c2ab7e4d91a2c3f4e5d";
pub const CREATED_TOKEN: &str = "view-token-1";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedCall {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct MockState {
    calls: Mutex<Vec<RecordedCall>>,
    /// Canned `GET /orders/{id}` answers: status code and body.
    orders: Mutex<HashMap<String, (u16, Value)>>,
    admin_revoked: AtomicBool,
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    /// Last call to `method path`.
    pub fn last_call(&self, method: &str, path: &str) -> Option<RecordedCall> {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.method == method && c.path == path)
    }

    /// `Authorization` header of the last `method path` call.
    pub fn authorization_for(&self, method: &str, path: &str) -> Option<String> {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.method == method && c.path == path)
            .and_then(|c| c.authorization)
    }

    pub fn set_order(&self, id: &str, status: u16, body: Value) {
        self.state
            .orders
            .lock()
            .unwrap()
            .insert(id.to_string(), (status, body));
    }

    pub fn set_order_status(&self, id: &str, status: &str) {
        self.set_order(id, 200, order_json(id, status));
    }

    /// From now on every basic-auth call is answered with 401.
    pub fn revoke_admin(&self) {
        self.state.admin_revoked.store(true, Ordering::SeqCst);
    }
}

pub fn order_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "client": { "name": "Jan Kowalski", "phone": "+48123456789" },
        "address": { "street": "ul. Floriańska 1", "city": "Kraków" },
        "status": status,
        "createdAt": "2026-10-19T08:00:00Z"
    })
}

fn reply(status: u16, body: Value) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(body)).into_response()
}

fn unauthorized() -> Response {
    reply(401, json!({ "error": "Unauthorized" }))
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    state.calls.lock().unwrap().push(RecordedCall {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: authorization.clone(),
        body,
    });

    let admin_ok = authorization.as_deref() == Some(ADMIN_BASIC_HEADER)
        && !state.admin_revoked.load(Ordering::SeqCst);
    let bearer = format!("Bearer {}", STAFF_TOKEN);
    let staff_ok = authorization.as_deref() == Some(bearer.as_str());
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["orders"]) => reply(
            201,
            json!({
                "orderId": CREATED_ID,
                "viewUrl": format!("http://localhost:5173/orders/{}?t={}", CREATED_ID, CREATED_TOKEN),
            }),
        ),
        ("POST", ["admin", "verify"]) => {
            if admin_ok {
                reply(200, json!({ "ok": true }))
            } else {
                unauthorized()
            }
        }
        ("GET", ["orders", "all"]) => {
            if admin_ok {
                reply(
                    200,
                    json!({ "orders": [order_json("a1", "pending"), order_json("b2", "done")] }),
                )
            } else {
                unauthorized()
            }
        }
        ("POST", ["orders", "create"])
        | ("POST", ["orders", _, "mark-done"])
        | ("DELETE", ["orders", _, "delete"]) => {
            if admin_ok {
                reply(200, json!({ "ok": true }))
            } else {
                unauthorized()
            }
        }
        ("GET", ["orders", _, "status-public"]) => reply(
            200,
            json!({ "status": "assigned", "updatedAt": "2026-10-19T09:00:00Z" }),
        ),
        ("GET", ["admin", "orders"]) => {
            if admin_ok {
                reply(
                    200,
                    json!({ "orders": [order_json("a1", "pending"), order_json("c3", "assigned")], "total": 12 }),
                )
            } else {
                unauthorized()
            }
        }
        ("POST", ["admin", "orders"]) => {
            if admin_ok {
                reply(201, order_json("adm-1", "new"))
            } else {
                unauthorized()
            }
        }
        ("GET", ["admin", "orders", id]) => {
            if admin_ok {
                reply(200, order_json(id, "assigned"))
            } else {
                unauthorized()
            }
        }
        ("PUT", ["admin", "orders", _])
        | ("DELETE", ["admin", "orders", _])
        | ("POST", ["admin", "orders", _, "assign" | "status"]) => {
            if admin_ok {
                reply(200, json!({ "ok": true }))
            } else {
                unauthorized()
            }
        }
        ("GET", ["orders", id]) => {
            let canned = state.orders.lock().unwrap().get(*id).cloned();
            match canned {
                Some((status, body)) => reply(status, body),
                None => reply(404, json!({ "error": "Order not found" })),
            }
        }
        ("POST", ["auth", "login"]) => reply(
            200,
            json!({ "token": STAFF_TOKEN, "user": { "username": "staff", "role": "admin" } }),
        ),
        ("GET", ["auth", "me"]) => {
            if staff_ok {
                reply(200, json!({ "_id": "u1", "username": "staff", "role": "admin" }))
            } else {
                unauthorized()
            }
        }
        _ => reply(404, json!({ "error": "Not found" })),
    }
}
