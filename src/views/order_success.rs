use chrono::{DateTime, Utc};
use lockopener_common::{LocalOrder, short_number};

use crate::errors::ViewError;
use crate::i18n::Messages;
use crate::registry::OrderRegistry;

/// Confirmation shown after an order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessPage {
    pub order_id: String,
    /// `#` plus the last six characters of the id.
    pub number: String,
    /// Whether a tracking record exists for the order.
    pub tracked: bool,
}

pub struct OrderSuccess<'a> {
    registry: &'a OrderRegistry,
}

impl<'a> OrderSuccess<'a> {
    pub fn new(registry: &'a OrderRegistry) -> Self {
        Self { registry }
    }

    /// Register the new order locally and build the confirmation.
    ///
    /// Without an order id there is nothing to confirm. Without a token the
    /// order cannot be tracked, so it is confirmed but not registered.
    pub fn enter(
        &self,
        order_id: Option<&str>,
        view_token: Option<&str>,
        now: DateTime<Utc>,
        messages: &Messages,
    ) -> Result<SuccessPage, ViewError> {
        let order_id = order_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ViewError::MissingData(messages.order_data_missing.to_string()))?;

        let tracked = match view_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.registry.add(LocalOrder::new(order_id, token, now))?;
                true
            }
            None => false,
        };

        Ok(SuccessPage {
            order_id: order_id.to_string(),
            number: short_number(order_id),
            tracked,
        })
    }
}
