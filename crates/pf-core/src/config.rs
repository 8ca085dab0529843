use std::time::Duration;
use url::Url;

/// PlayFab API paths, joined onto the title URL
pub mod endpoints {
    pub const GET_ENTITY_TOKEN: &str = "/Authentication/GetEntityToken";
    pub const CATALOG_GET_ITEM: &str = "/Catalog/GetItem";
    pub const CATALOG_SEARCH_ITEMS: &str = "/Catalog/SearchItems";
    pub const LOGIN_WITH_XBOX: &str = "/Client/LoginWithXbox";
    pub const LOGIN_WITH_CUSTOM_ID: &str = "/Client/LoginWithCustomID";
}

/// Domain every title is hosted under
pub const SERVICE_DOMAIN: &str = "playfabapi.com";

/// Header carrying the entity token on authorized calls
pub const ENTITY_TOKEN_HEADER: &str = "X-EntityToken";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            request: Duration::from_secs(30),
        }
    }
}

/// Configuration for PlayFabClient
#[derive(Debug, Clone)]
pub struct PlayFabConfig {
    /// HTTP client timeouts
    pub http_timeouts: HttpTimeouts,

    /// Custom user agent (optional)
    pub user_agent: Option<String>,

    /// Overrides the per-title URL for every request. API paths are appended
    /// to its path, so a gateway prefix like `/playfab` is kept.
    pub base_url: Option<Url>,
}

impl PlayFabConfig {
    /// Config that sends every request to `base_url` instead of the title host
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url: Some(base_url),
            ..Self::default()
        }
    }
}

impl Default for PlayFabConfig {
    fn default() -> Self {
        Self {
            http_timeouts: HttpTimeouts::default(),
            user_agent: Some("playfab-rs".to_string()),
            base_url: None,
        }
    }
}
