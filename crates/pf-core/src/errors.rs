use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

/// PlayFab client error types
#[derive(Error, Debug)]
pub enum PlayFabError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("HTTP error {status}: {body_snippet}")]
    Http {
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("exchange: {0}")]
    Exchange(#[source] Box<PlayFabError>),

    #[error("exchange token in background: {0}")]
    BackgroundRefresh(#[source] Arc<PlayFabError>),

    #[error("request xbox live token: {0}")]
    XboxToken(#[source] anyhow::Error),
}

impl PlayFabError {
    /// Structured service error carried by this error or any error it wraps
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            Self::Exchange(inner) => inner.service_error(),
            Self::BackgroundRefresh(inner) => inner.service_error(),
            _ => None,
        }
    }

    /// Numeric PlayFab error code (see [`crate::codes`]), if any
    pub fn service_code(&self) -> Option<i32> {
        self.service_error().map(|err| err.code)
    }

    /// Whether this is the sticky failure of a background refresh
    pub fn is_background_refresh(&self) -> bool {
        matches!(self, Self::BackgroundRefresh(_))
    }
}

/// Error envelope returned by PlayFab on any non-2xx response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceError {
    /// HTTP status code echoed by the service
    #[serde(rename = "code", default)]
    pub status_code: u16,
    /// Short error name, e.g. "ItemNotFound"
    #[serde(rename = "error", default)]
    pub kind: String,
    #[serde(rename = "errorCode", default)]
    pub code: i32,
    /// Field-level validation details
    #[serde(rename = "errorDetails", default)]
    pub details: HashMap<String, Vec<String>>,
    #[serde(rename = "errorMessage", default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playfab: {}", self.code)?;
        if !self.kind.is_empty() {
            write!(f, " ({})", self.kind)?;
        }
        if !self.message.is_empty() && self.message != self.kind {
            write!(f, ": {:?}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

pub type Result<T> = std::result::Result<T, PlayFabError>;
