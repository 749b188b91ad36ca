use chrono::{DateTime, Utc};
use lockopener_common::{Order, format_elapsed};
use tracing::warn;

use crate::api::{ApiClient, PublicStatus};
use crate::errors::{ApiError, ViewError};
use crate::i18n::Messages;

/// A single order as shown to the customer who placed it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order: Order,
}

impl OrderDetail {
    pub fn number(&self) -> String {
        self.order.number()
    }

    /// Time since the backend created the order, e.g. `1h 2m 3s`.
    pub fn elapsed(&self, now: DateTime<Utc>) -> String {
        format_elapsed(self.order.created_at, now)
    }
}

/// Load an order by id and access token.
///
/// A missing token is reported without contacting the backend.
pub async fn load_order_detail(
    api: &ApiClient,
    id: &str,
    token: Option<&str>,
    messages: &Messages,
) -> Result<OrderDetail, ViewError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Err(ViewError::AccessTokenMissing(
            messages.access_token_missing.to_string(),
        ));
    };

    match api.get_order_by_token(id, token).await {
        Ok(order) => Ok(OrderDetail { order }),
        Err(e) => {
            warn!(order_id = id, error = %e, "Failed to load order");
            Err(backend_error(e, messages))
        }
    }
}

/// Status of an order without its personal data. Needs no token.
pub async fn load_public_status(
    api: &ApiClient,
    id: &str,
    messages: &Messages,
) -> Result<PublicStatus, ViewError> {
    api.get_public_status(id).await.map_err(|e| {
        warn!(order_id = id, error = %e, "Failed to load order status");
        backend_error(e, messages)
    })
}

fn backend_error(e: ApiError, messages: &Messages) -> ViewError {
    let fallback = if e.is_not_found() {
        messages.order_not_found
    } else {
        messages.load_order_failed
    };
    ViewError::Backend {
        message: e.user_message(fallback),
        source: e,
    }
}
