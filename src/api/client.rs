use std::time::Duration;

use lockopener_common::Order;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::auth::Credentials;
use super::types::{
    AdminOrderQuery, AssignTechnician, CreateOrderResponse, CurrentUser, ErrorBody, LoginRequest,
    LoginResponse, NewOrder, OrderList, OrderPatch, PublicStatus, StatusUpdate,
};
use crate::errors::ApiError;
use crate::storage::SharedStore;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the Lockopener backend.
///
/// Credentials are looked up in the store on every request, so a login or
/// logout takes effect immediately for all clones of the client. Responses
/// are passed through as-is: no retries, no interception of error statuses.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    base_url: String,
    store: SharedStore,
}

impl ApiClient {
    pub fn new(base_url: &str, store: SharedStore) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, store, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        store: SharedStore,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lockopener/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: "client setup".to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // ── Customer endpoints ───────────────────────────────────────────

    pub async fn create_order(&self, order: &NewOrder) -> Result<CreateOrderResponse, ApiError> {
        let (endpoint, req) = self.request(Method::POST, "/orders", &[])?;
        self.send_json(&endpoint, req.json(order)).await
    }

    pub async fn get_order_by_token(&self, id: &str, token: &str) -> Result<Order, ApiError> {
        let (endpoint, req) = self.request(Method::GET, "/orders/:id", &[id])?;
        self.send_json(&endpoint, req.query(&[("token", token)])).await
    }

    pub async fn get_public_status(&self, id: &str) -> Result<PublicStatus, ApiError> {
        let (endpoint, req) = self.request(Method::GET, "/orders/:id/status-public", &[id])?;
        self.send_json(&endpoint, req).await
    }

    // ── Order management (basic auth) ────────────────────────────────

    pub async fn list_all_orders(&self) -> Result<OrderList, ApiError> {
        let (endpoint, req) = self.request(Method::GET, "/orders/all", &[])?;
        self.send_json(&endpoint, req).await
    }

    pub async fn mark_as_done(&self, id: &str) -> Result<(), ApiError> {
        let (endpoint, req) = self.request(Method::POST, "/orders/:id/mark-done", &[id])?;
        self.send_unit(&endpoint, req).await
    }

    pub async fn admin_create_order(&self, order: &NewOrder) -> Result<(), ApiError> {
        let (endpoint, req) = self.request(Method::POST, "/orders/create", &[])?;
        self.send_unit(&endpoint, req.json(order)).await
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), ApiError> {
        let (endpoint, req) = self.request(Method::DELETE, "/orders/:id/delete", &[id])?;
        self.send_unit(&endpoint, req).await
    }

    // ── Admin panel API ──────────────────────────────────────────────

    pub async fn admin_list_orders(&self, query: &AdminOrderQuery) -> Result<OrderList, ApiError> {
        let (endpoint, req) = self.request(Method::GET, "/admin/orders", &[])?;
        self.send_json(&endpoint, req.query(query)).await
    }

    pub async fn admin_create(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let (endpoint, req) = self.request(Method::POST, "/admin/orders", &[])?;
        self.send_json(&endpoint, req.json(order)).await
    }

    pub async fn admin_get_order(&self, id: &str) -> Result<Order, ApiError> {
        let (endpoint, req) = self.request(Method::GET, "/admin/orders/:id", &[id])?;
        self.send_json(&endpoint, req).await
    }

    pub async fn assign_technician(
        &self,
        id: &str,
        assignment: &AssignTechnician,
    ) -> Result<(), ApiError> {
        let (endpoint, req) = self.request(Method::POST, "/admin/orders/:id/assign", &[id])?;
        self.send_unit(&endpoint, req.json(assignment)).await
    }

    pub async fn update_status(&self, id: &str, update: &StatusUpdate) -> Result<(), ApiError> {
        let (endpoint, req) = self.request(Method::POST, "/admin/orders/:id/status", &[id])?;
        self.send_unit(&endpoint, req.json(update)).await
    }

    pub async fn update_order(&self, id: &str, patch: &OrderPatch) -> Result<(), ApiError> {
        let (endpoint, req) = self.request(Method::PUT, "/admin/orders/:id", &[id])?;
        self.send_unit(&endpoint, req.json(patch)).await
    }

    pub async fn admin_delete_order(&self, id: &str) -> Result<(), ApiError> {
        let (endpoint, req) = self.request(Method::DELETE, "/admin/orders/:id", &[id])?;
        self.send_unit(&endpoint, req).await
    }

    /// Check a username/password pair without storing it.
    ///
    /// The credentials are sent explicitly rather than taken from the store,
    /// since verification happens before anything is cached.
    pub async fn verify_admin(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let url = self.url("/admin/verify", &[])?;
        let req = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .basic_auth(username, Some(password));
        self.send_unit("POST /admin/verify", req).await
    }

    // ── Bearer auth ──────────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let (endpoint, req) = self.request(Method::POST, "/auth/login", &[])?;
        let req = req.json(&LoginRequest { username, password });
        self.send_json(&endpoint, req).await
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let (endpoint, req) = self.request(Method::GET, "/auth/me", &[])?;
        self.send_json(&endpoint, req).await
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    /// Concrete URL for `route`, with each `:id` replaced by the next entry
    /// of `ids` as one percent-encoded path segment.
    fn url(&self, route: &str, ids: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.clone()))?;
            segments.pop_if_empty();
            let mut ids = ids.iter();
            for part in route.split('/').filter(|p| !p.is_empty()) {
                if part == ":id" {
                    segments.push(ids.next().copied().unwrap_or_default());
                } else {
                    segments.push(part);
                }
            }
        }
        Ok(url)
    }

    /// Build a request with the credentials `route` calls for.
    ///
    /// Credentials are chosen from the route pattern, never from the
    /// concrete path, so an id such as `all` cannot pick up admin auth.
    /// Also returns the `METHOD route` label used in logs and errors.
    fn request(
        &self,
        method: Method,
        route: &str,
        ids: &[&str],
    ) -> Result<(String, RequestBuilder), ApiError> {
        let endpoint = format!("{} {}", method, route);
        let builder = self.http.request(method.clone(), self.url(route, ids)?);
        let builder = match Credentials::resolve(self.store.as_ref(), &method, route) {
            Ok(credentials) => credentials.apply(builder),
            Err(e) => {
                warn!(error = %e, route, "Could not read stored credentials; sending request without them");
                builder
            }
        };
        Ok((endpoint, builder))
    }

    /// Send and return the raw body of a 2xx response.
    async fn send_raw(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        debug!(endpoint, "Sending request");
        let transport = |source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "Received response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send_raw(endpoint, request).await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn send_unit(&self, endpoint: &str, request: RequestBuilder) -> Result<(), ApiError> {
        self.send_raw(endpoint, request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", MemoryStore::shared()),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://example.com/api", MemoryStore::shared()),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3001/api/", MemoryStore::shared()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001/api");
        assert_eq!(
            client.url("/orders", &[]).unwrap().as_str(),
            "http://localhost:3001/api/orders"
        );
    }

    #[test]
    fn test_ids_are_encoded_as_one_segment() {
        let client = ApiClient::new("http://localhost:3001/api", MemoryStore::shared()).unwrap();
        let url = client.url("/orders/:id/mark-done", &["a/b?c#d"]).unwrap();
        assert_eq!(url.path(), "/api/orders/a%2Fb%3Fc%23d/mark-done");
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is closed in practically every environment.
        let client = ApiClient::with_timeout(
            "http://127.0.0.1:9/api",
            MemoryStore::shared(),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.get_order_by_token("abc", "tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
        assert_eq!(err.status(), None);
    }
}
