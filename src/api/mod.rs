//! Lockopener backend API client.
//!
//! ```text
//! ApiClient ── request(method, path) ── Credentials::resolve(store) ── reqwest
//!                                          │
//!                         Basic (admin allow-list) / Bearer / none
//! ```

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{AuthScheme, Credentials, scheme_for};
pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use types::{
    AdminOrderQuery, AssignTechnician, CreateOrderResponse, CurrentUser, LoginResponse, NewOrder,
    OrderList, OrderPatch, PublicStatus, StatusUpdate,
};

use crate::errors::ApiError;

/// Pull the view token (the `t` query parameter) out of a tracking link.
pub fn extract_view_token(view_url: &str) -> Result<String, ApiError> {
    let invalid = |reason: &str| ApiError::InvalidViewUrl {
        url: view_url.to_string(),
        reason: reason.to_string(),
    };
    let url = reqwest::Url::parse(view_url).map_err(|e| invalid(&e.to_string()))?;
    url.query_pairs()
        .find(|(key, _)| key == "t")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| invalid("missing 't' parameter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_view_token() {
        assert_eq!(
            extract_view_token("https://lockopener.pl/orders/665f1c?t=abc123").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_view_token("http://localhost:5173/orders/1?x=1&t=tok%2B1").unwrap(),
            "tok+1"
        );
    }

    #[test]
    fn test_extract_view_token_rejects_missing_or_empty() {
        for url in [
            "https://lockopener.pl/orders/1",
            "https://lockopener.pl/orders/1?t=",
            "/orders/1?t=abc",
        ] {
            assert!(
                matches!(extract_view_token(url), Err(ApiError::InvalidViewUrl { .. })),
                "{url}"
            );
        }
    }
}
