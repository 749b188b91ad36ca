//! Staff login and order board.
//!
//! Authentication is plain HTTP basic auth checked by the backend on every
//! call. The session only caches the credentials in local storage after the
//! backend accepted them, and drops them as soon as the backend stops
//! accepting them.

use std::sync::LazyLock;

use lockopener_common::{Order, OrderStatus};
use regex::Regex;
use tracing::{info, warn};

use crate::api::{AdminOrderQuery, ApiClient, AssignTechnician, OrderList, StatusUpdate};
use crate::errors::{AdminError, ApiError};
use crate::forms::{AdminOrderForm, DEFAULT_CITY, OrderEdit};
use crate::i18n::Messages;
use crate::storage::{admin_credentials, clear_admin_credentials, save_admin_credentials};

static PHONE_GROUPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3})(\d{3})(\d{3})").unwrap());

/// Split the first run of nine digits into `123-456-789`.
pub fn format_phone(phone: &str) -> String {
    PHONE_GROUPS.replace(phone, "$1-$2-$3").into_owned()
}

/// Google Maps search link for an address; a blank city means Kraków.
pub fn map_url(street: &str, city: &str) -> String {
    let city = if city.trim().is_empty() { DEFAULT_CITY } else { city };
    let query = format!("{}, {}", street, city);
    match reqwest::Url::parse_with_params(
        "https://www.google.com/maps/search/",
        &[("api", "1"), ("query", query.as_str())],
    ) {
        Ok(url) => url.to_string(),
        // The base is a constant, so this arm only guards against a typo.
        Err(_) => format!("https://www.google.com/maps/search/?api=1&query={}", query),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated { username: String },
}

/// Orders split the way the panel shows them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminBoard {
    pub active: Vec<Order>,
    pub completed: Vec<Order>,
}

impl AdminBoard {
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let (active, completed) = orders.into_iter().partition(Order::is_active);
        Self { active, completed }
    }

    pub fn find(&self, id: &str) -> Option<&Order> {
        self.active
            .iter()
            .chain(self.completed.iter())
            .find(|o| o.id == id)
    }
}

pub struct AdminSession {
    api: ApiClient,
    messages: &'static Messages,
    default_city: String,
    state: AuthState,
}

impl AdminSession {
    pub fn new(api: ApiClient, messages: &'static Messages, default_city: impl Into<String>) -> Self {
        Self {
            api,
            messages,
            default_city: default_city.into(),
            state: AuthState::Anonymous,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    /// Re-verify cached credentials.
    ///
    /// Rejected credentials are discarded. A transport failure is only
    /// logged: the credentials stay cached and the session stays anonymous
    /// until the next check.
    pub async fn check_auth(&mut self) -> Result<&AuthState, AdminError> {
        self.state = AuthState::Anonymous;
        let Some((username, password)) = admin_credentials(self.api.store().as_ref())? else {
            return Ok(&self.state);
        };

        match self.api.verify_admin(&username, &password).await {
            Ok(()) => {
                self.state = AuthState::Authenticated { username };
            }
            Err(e @ ApiError::Status { .. }) => {
                info!(status = ?e.status(), "Cached admin credentials rejected; discarding");
                clear_admin_credentials(self.api.store().as_ref())?;
            }
            Err(e) => {
                warn!(error = %e, "Could not verify admin credentials");
            }
        }
        Ok(&self.state)
    }

    /// Verify and, only when accepted, cache the credentials.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AdminError> {
        match self.api.verify_admin(username, password).await {
            Ok(()) => {
                save_admin_credentials(self.api.store().as_ref(), username, password)?;
                info!(username, "Admin logged in");
                self.state = AuthState::Authenticated {
                    username: username.to_string(),
                };
                Ok(())
            }
            Err(ApiError::Status { status, .. }) => {
                info!(status, "Admin login rejected");
                Err(AdminError::InvalidCredentials(
                    self.messages.invalid_credentials.to_string(),
                ))
            }
            Err(e) => Err(AdminError::Connection {
                message: self.messages.connection_error.to_string(),
                source: e,
            }),
        }
    }

    pub fn logout(&mut self) -> Result<(), AdminError> {
        clear_admin_credentials(self.api.store().as_ref())?;
        self.state = AuthState::Anonymous;
        Ok(())
    }

    pub async fn load_board(&mut self) -> Result<AdminBoard, AdminError> {
        self.require_auth()?;
        let fallback = self.messages.admin_load_failed;
        let result = self.api.list_all_orders().await;
        match result {
            Ok(list) => Ok(AdminBoard::from_orders(list.orders)),
            Err(e) => self.fail(e, fallback),
        }
    }

    pub async fn mark_done(&mut self, id: &str) -> Result<(), AdminError> {
        self.require_auth()?;
        let fallback = self.messages.update_status_failed;
        let result = self.api.mark_as_done(id).await;
        match result {
            Ok(()) => {
                info!(order_id = id, "Order marked as done");
                Ok(())
            }
            Err(e) => self.fail(e, fallback),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), AdminError> {
        self.require_auth()?;
        let fallback = self.messages.delete_order_failed;
        let result = self.api.delete_order(id).await;
        match result {
            Ok(()) => {
                info!(order_id = id, "Order deleted");
                Ok(())
            }
            Err(e) => self.fail(e, fallback),
        }
    }

    /// Create an order on a customer's behalf (e.g. taken over the phone).
    pub async fn create(&mut self, form: AdminOrderForm) -> Result<(), AdminError> {
        self.require_auth()?;
        let order = form.into_new_order(&self.default_city, self.messages)?;
        let fallback = self.messages.admin_create_failed;
        let result = self.api.admin_create_order(&order).await;
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e, fallback),
        }
    }

    pub async fn get(&mut self, id: &str) -> Result<Order, AdminError> {
        self.require_auth()?;
        let fallback = self.messages.load_order_failed;
        let result = self.api.admin_get_order(id).await;
        match result {
            Ok(order) => Ok(order),
            Err(e) => self.fail(e, fallback),
        }
    }

    pub async fn assign(
        &mut self,
        id: &str,
        tech_id: &str,
        eta: Option<String>,
    ) -> Result<(), AdminError> {
        self.require_auth()?;
        let body = AssignTechnician {
            tech_id: tech_id.to_string(),
            eta,
        };
        let fallback = self.messages.update_status_failed;
        let result = self.api.assign_technician(id, &body).await;
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e, fallback),
        }
    }

    pub async fn set_status(
        &mut self,
        id: &str,
        status: OrderStatus,
        final_price: Option<f64>,
    ) -> Result<(), AdminError> {
        self.require_auth()?;
        let body = StatusUpdate {
            status,
            final_price,
        };
        let fallback = self.messages.update_status_failed;
        let result = self.api.update_status(id, &body).await;
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e, fallback),
        }
    }

    /// Filtered, paginated listing from the admin API.
    pub async fn list(&mut self, query: &AdminOrderQuery) -> Result<OrderList, AdminError> {
        self.require_auth()?;
        let fallback = self.messages.admin_load_failed;
        let result = self.api.admin_list_orders(query).await;
        match result {
            Ok(list) => Ok(list),
            Err(e) => self.fail(e, fallback),
        }
    }

    /// Correct the customer's contact details or address.
    ///
    /// Nothing is sent when the edit is invalid. Otherwise the current order
    /// is fetched first so untouched fields are sent back unchanged.
    pub async fn edit(&mut self, id: &str, edit: OrderEdit) -> Result<(), AdminError> {
        self.require_auth()?;
        edit.validate(self.messages)?;
        let current = self.get(id).await?;
        let patch = edit.merge(&current);
        let fallback = self.messages.edit_order_failed;
        let result = self.api.update_order(id, &patch).await;
        match result {
            Ok(()) => {
                info!(order_id = id, "Order updated");
                Ok(())
            }
            Err(e) => self.fail(e, fallback),
        }
    }

    /// Delete through the admin API rather than the panel endpoint.
    pub async fn purge(&mut self, id: &str) -> Result<(), AdminError> {
        self.require_auth()?;
        let fallback = self.messages.delete_order_failed;
        let result = self.api.admin_delete_order(id).await;
        match result {
            Ok(()) => {
                info!(order_id = id, "Order purged");
                Ok(())
            }
            Err(e) => self.fail(e, fallback),
        }
    }

    fn require_auth(&self) -> Result<(), AdminError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AdminError::NotAuthenticated)
        }
    }

    /// Turn a failed admin call into the error to show. A 401 means the
    /// cached credentials stopped working, so they are discarded.
    fn fail<T>(&mut self, e: ApiError, fallback: &str) -> Result<T, AdminError> {
        if e.is_unauthorized() {
            warn!("Admin credentials no longer accepted; logging out");
            self.logout()?;
            return Err(AdminError::SessionExpired(
                self.messages.session_expired.to_string(),
            ));
        }
        Err(AdminError::Backend {
            message: e.user_message(fallback),
            source: e,
        })
    }
}
