//! Typed error hierarchy for the Lockopener client.
//!
//! - `ApiError`: transport, HTTP status and decode failures from the backend
//! - `StorageError`: the local key/value store
//! - `ValidationErrors`: client-side form checks that block submission
//! - `ViewError` / `AdminError`: what the views report to the user

use thiserror::Error;

/// Errors from a single backend call. Nothing here is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}{}", detail_suffix(&.message))]
    Status {
        endpoint: String,
        status: u16,
        /// The `error` field of the response body, when the backend sent one.
        message: Option<String>,
    },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid view URL '{url}': {reason}")]
    InvalidViewUrl { url: String, reason: String },

    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message to show the user: the backend's `error` field when present,
    /// otherwise the given localized fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Errors from the local key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// One failed form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Client-side validation failures. Submission is blocked while non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Error, Default)]
#[error("{}", join_field_errors(&.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Failures shown by the customer-facing views.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Backend or transport failure, already turned into a user-facing message.
    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("{0}")]
    AccessTokenMissing(String),

    #[error("{0}")]
    MissingData(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures from the admin login and panel.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{message}")]
    Connection {
        message: String,
        #[source]
        source: ApiError,
    },

    /// A previously accepted login was rejected; cached credentials were removed.
    #[error("{0}")]
    SessionExpired(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
