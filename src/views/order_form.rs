use tracing::{info, warn};

use super::Navigation;
use crate::api::{ApiClient, extract_view_token};
use crate::errors::ViewError;
use crate::forms::OrderForm;
use crate::i18n::Messages;

/// Validate and submit a customer order.
///
/// Nothing is sent when validation fails. On success the view token is taken
/// from the `t` parameter of the returned tracking link.
pub async fn submit_order(
    api: &ApiClient,
    form: OrderForm,
    messages: &Messages,
) -> Result<Navigation, ViewError> {
    let order = form.into_new_order(messages)?;

    let created = api.create_order(&order).await.map_err(|e| {
        warn!(error = %e, "Order submission failed");
        ViewError::Backend {
            message: e.user_message(messages.create_order_failed),
            source: e,
        }
    })?;

    let view_token = extract_view_token(&created.view_url).map_err(|e| ViewError::Backend {
        message: messages.create_order_failed.to_string(),
        source: e,
    })?;

    info!(order_id = %created.order_id, "Order created");
    Ok(Navigation::OrderSuccess {
        order_id: created.order_id,
        view_token,
    })
}
