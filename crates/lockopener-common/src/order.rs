use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle as reported by the backend.
///
/// The backend owns the exact enumeration; anything this client does not know
/// decodes to [`OrderStatus::Unknown`] and is treated as active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Pending,
    Assigned,
    #[serde(alias = "in-progress")]
    InProgress,
    Done,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// Done and cancelled orders are no longer worth tracking.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Customer {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Consent {
    pub gdpr: bool,
}

/// A service order as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub client: Customer,
    pub address: Address,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "techId", skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
}

impl Order {
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Display number used on cards and headers, e.g. `#a1b2c3`.
    pub fn number(&self) -> String {
        short_number(&self.id)
    }
}

/// A tracking record kept on the customer's machine.
///
/// Only the id/token pair matters to the backend; `created_at` is the local
/// time the order was registered and drives the elapsed-time display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalOrder {
    pub id: String,
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl LocalOrder {
    pub fn new(id: impl Into<String>, token: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            created_at,
        }
    }

    /// Client-side route of the order detail page.
    pub fn tracking_path(&self) -> String {
        format!("/orders/{}?t={}", self.id, self.token)
    }
}

/// `#` followed by the last six characters of an order id.
pub fn short_number(id: &str) -> String {
    let count = id.chars().count();
    let tail: String = id.chars().skip(count.saturating_sub(6)).collect();
    format!("#{}", tail)
}
