//! Request and response bodies, one struct per endpoint.
//!
//! Response structs only name the fields this client reads; anything else the
//! backend sends is ignored.

use chrono::{DateTime, Utc};
use lockopener_common::{Address, Consent, Customer, Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Body of `POST /orders`, `POST /orders/create` and `POST /admin/orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrder {
    pub client: Customer,
    pub address: Address,
    pub consent: Consent,
}

/// Response of `POST /orders`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Customer tracking link; its `t` query parameter is the view token.
    pub view_url: String,
}

/// Response of `GET /orders/{id}/status-public`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatus {
    pub status: OrderStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response of `GET /orders/all` and `GET /admin/orders`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Filters for `GET /admin/orders`.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct AdminOrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body of `POST /admin/orders/{id}/assign`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignTechnician {
    pub tech_id: String,
    pub eta: Option<String>,
}

/// Body of `POST /admin/orders/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub final_price: Option<f64>,
}

/// Body of `PUT /admin/orders/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<CurrentUser>,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CurrentUser {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Failure body shape: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
