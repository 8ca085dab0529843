use async_trait::async_trait;
use pf_core::config::endpoints;
use pf_core::{PlayFabClient, PlayFabError, Result};
use serde::Serialize;
use tracing::instrument;

use crate::login::{Identity, IdentityProvider, LoginConfig};

#[derive(Serialize)]
struct CustomIdLoginRequest<'a> {
    #[serde(flatten)]
    config: &'a LoginConfig,
    #[serde(rename = "CustomId")]
    custom_id: &'a str,
}

/// Signs in through `/Client/LoginWithCustomID` with a title-defined identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomIdProvider {
    pub custom_id: String,
}

impl CustomIdProvider {
    pub fn new(custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for CustomIdProvider {
    #[instrument(skip_all, fields(title = %config.title))]
    async fn login(&self, client: &PlayFabClient, config: &LoginConfig) -> Result<Identity> {
        if self.custom_id.is_empty() {
            return Err(PlayFabError::Config("CustomIdProvider: custom ID not set".to_string()));
        }

        let request = CustomIdLoginRequest {
            config,
            custom_id: &self.custom_id,
        };
        config.login(client, endpoints::LOGIN_WITH_CUSTOM_ID, &request).await
    }
}
