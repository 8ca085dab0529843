use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use pf_core::config::endpoints;
use pf_core::{PlayFabClient, PlayFabError, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::login::{Identity, IdentityProvider, LoginConfig};

/// Party the XSTS token handed to [`XboxLiveProvider`] must rely on.
/// Tokens for any other party fail with an error about decrypting the token body.
pub const RELYING_PARTY: &str = "http://playfab.xboxlive.com/";

/// XSTS token for [`RELYING_PARTY`]
#[derive(Clone, PartialEq, Eq)]
pub struct XboxToken {
    /// User hash from the token's display claims
    pub uhs: String,
    pub token: String,
}

/// `XBL3.0 x=<uhs>;<token>`, the form PlayFab expects in `XboxToken`
impl fmt::Display for XboxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XBL3.0 x={};{}", self.uhs, self.token)
    }
}

impl fmt::Debug for XboxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XboxToken")
            .field("uhs", &self.uhs)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Supplies XSTS tokens, typically from an Xbox Live authentication flow
#[async_trait]
pub trait XboxTokenSource: Send + Sync {
    async fn xbox_token(&self) -> anyhow::Result<XboxToken>;
}

#[derive(Serialize)]
struct XboxLoginRequest<'a> {
    #[serde(flatten)]
    config: &'a LoginConfig,
    #[serde(rename = "XboxToken")]
    xbox_token: String,
}

/// Signs in through `/Client/LoginWithXbox`
#[derive(Clone, Default)]
pub struct XboxLiveProvider {
    pub token_source: Option<Arc<dyn XboxTokenSource>>,
}

impl XboxLiveProvider {
    pub fn new(token_source: Arc<dyn XboxTokenSource>) -> Self {
        Self {
            token_source: Some(token_source),
        }
    }
}

#[async_trait]
impl IdentityProvider for XboxLiveProvider {
    #[instrument(skip_all, fields(title = %config.title))]
    async fn login(&self, client: &PlayFabClient, config: &LoginConfig) -> Result<Identity> {
        let source = self.token_source.as_ref().ok_or_else(|| {
            PlayFabError::Config("XboxLiveProvider: token source not set".to_string())
        })?;

        debug!("Requesting Xbox Live token");
        let token = source.xbox_token().await.map_err(PlayFabError::XboxToken)?;

        let request = XboxLoginRequest {
            config,
            xbox_token: token.to_string(),
        };
        config.login(client, endpoints::LOGIN_WITH_XBOX, &request).await
    }
}
