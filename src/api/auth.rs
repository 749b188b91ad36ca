//! Per-endpoint credential selection.
//!
//! Customer endpoints get the bearer token (if any); order-management and
//! `/admin/` endpoints get the cached basic-auth credentials. The split is a
//! static allow-list matched against the route pattern relative to the API
//! base URL, with ids written as `:id` (`/orders/:id/mark-done`).

use reqwest::Method;

use crate::errors::StorageError;
use crate::storage::{ADMIN_TOKEN, KeyValueStore, admin_credentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Basic,
    Bearer,
}

/// One allow-list entry: every listed fragment must appear in the path and,
/// when set, the method must match.
struct BasicAuthRule {
    contains: &'static [&'static str],
    method: Option<&'static str>,
}

const BASIC_AUTH_RULES: &[BasicAuthRule] = &[
    BasicAuthRule {
        contains: &["/orders/all"],
        method: None,
    },
    BasicAuthRule {
        contains: &["/orders/create"],
        method: None,
    },
    BasicAuthRule {
        contains: &["/orders/"],
        method: Some("DELETE"),
    },
    BasicAuthRule {
        contains: &["/orders/", "/mark-done"],
        method: Some("POST"),
    },
    BasicAuthRule {
        contains: &["/admin/"],
        method: None,
    },
];

impl BasicAuthRule {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.is_none_or(|m| m == method.as_str())
            && self.contains.iter().all(|fragment| path.contains(fragment))
    }
}

/// Which scheme applies to `method path`.
pub fn scheme_for(method: &Method, path: &str) -> AuthScheme {
    if BASIC_AUTH_RULES.iter().any(|rule| rule.matches(method, path)) {
        AuthScheme::Basic
    } else {
        AuthScheme::Bearer
    }
}

/// Credentials to attach to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer(String),
    None,
}

impl Credentials {
    /// Resolve credentials for `method path` from the store.
    ///
    /// A missing credential means no `Authorization` header at all; the
    /// backend decides what an anonymous request may do.
    pub fn resolve(
        store: &dyn KeyValueStore,
        method: &Method,
        path: &str,
    ) -> Result<Self, StorageError> {
        Ok(match scheme_for(method, path) {
            AuthScheme::Basic => match admin_credentials(store)? {
                Some((username, password)) => Credentials::Basic { username, password },
                None => Credentials::None,
            },
            AuthScheme::Bearer => match store.get(ADMIN_TOKEN)? {
                Some(token) if !token.is_empty() => Credentials::Bearer(token),
                _ => Credentials::None,
            },
        })
    }

    pub fn apply(self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Credentials::Basic { username, password } => request.basic_auth(username, Some(password)),
            Credentials::Bearer(token) => request.bearer_auth(token),
            Credentials::None => request,
        }
    }
}
