use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pf_core::{PlayFabClient, PlayFabError, Result, Title};
use pf_entity::{ExchangeTokenSource, Token};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Fields shared by every `/Client/LoginWith*` request.
///
/// Providers flatten it into their request body next to their own credential
/// fields.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginConfig {
    #[serde(rename = "TitleId")]
    pub title: Title,
    /// Create a PlayFab account if none is linked to the credential yet
    #[serde(skip_serializing_if = "is_false")]
    pub create_account: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_tags: Option<HashMap<String, serde_json::Value>>,
    /// Base64 body encrypted with the title's public RSA key (Enterprise only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_request: Option<String>,
    #[serde(rename = "InfoRequestParameters", skip_serializing_if = "Option::is_none")]
    pub request_parameters: Option<RequestParameters>,
    /// Secret used to verify request signatures (Enterprise only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_secret: Option<String>,
}

impl LoginConfig {
    pub fn new(title: impl Into<Title>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sign in by POSTing `body` to `path`, normally `/Client/LoginWith<Method>`.
    ///
    /// `body` is usually a provider struct flattening this config.
    #[instrument(skip(self, client, body), fields(title = %self.title))]
    pub async fn login<B>(&self, client: &PlayFabClient, path: &str, body: &B) -> Result<Identity>
    where
        B: Serialize + ?Sized + Sync,
    {
        if self.title.is_empty() {
            return Err(PlayFabError::Config("LoginConfig: title not set".to_string()));
        }

        let url = client.endpoint(&self.title, path)?;
        debug!("Signing in to PlayFab");
        client.post(url, body, |req| req).await
    }
}

/// Extra data to return in [`Identity::info_result_payload`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestParameters {
    #[serde(skip_serializing_if = "is_false")]
    pub get_character_inventories: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_character_list: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_player_profile: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_player_statistics: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_title_data: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_user_account_info: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_user_data: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_user_inventory: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_user_read_only_data: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub get_user_virtual_currency: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub player_statistic_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_constraints: Option<ProfileConstraints>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title_data_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_data_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_read_only_data_keys: Vec<String>,
}

/// Player profile properties to return when `get_player_profile` is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileConstraints {
    #[serde(skip_serializing_if = "is_false")]
    pub show_avatar_url: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_banned_until: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_campaign_attributions: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_contact_email_addresses: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_created: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_display_name: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_experiment_variants: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_last_login: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_linked_accounts: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_locations: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_memberships: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_origination: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_push_notification_registrations: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_statistics: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_tags: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_total_value_to_date_in_usd: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub show_values_to_date: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Result of a successful login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Identity {
    /// Authorizes legacy Client API calls (`X-Authorization`)
    pub session_ticket: String,
    /// Master player account ID
    #[serde(rename = "PlayFabId")]
    pub playfab_id: String,
    pub newly_created: bool,
    pub last_login_time: Option<DateTime<Utc>>,
    /// Title player account token
    pub entity_token: Option<Token>,
    pub settings_for_user: Option<UserSettings>,
    /// Data requested through [`LoginConfig::request_parameters`]
    pub info_result_payload: Option<serde_json::Value>,
}

impl Identity {
    /// Token source serving master player account tokens for this player,
    /// seeded with the login's entity token.
    ///
    /// Fails with [`PlayFabError::Config`] outside a Tokio runtime, since the
    /// source spawns its refresh task.
    pub fn token_source(
        &self,
        cancel: &CancellationToken,
        client: PlayFabClient,
        title: Title,
    ) -> Result<ExchangeTokenSource> {
        let seed = self
            .entity_token
            .clone()
            .ok_or_else(|| PlayFabError::Config("Identity: entity token missing".to_string()))?;
        if self.playfab_id.is_empty() {
            return Err(PlayFabError::Config("Identity: PlayFab ID missing".to_string()));
        }
        if Handle::try_current().is_err() {
            return Err(PlayFabError::Config(
                "Identity: token source needs a Tokio runtime".to_string(),
            ));
        }

        Ok(ExchangeTokenSource::for_title(
            cancel,
            seed,
            client,
            title,
            self.playfab_id.clone(),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserSettings {
    pub gather_device_info: bool,
    pub gather_focus_info: bool,
    pub needs_attribution: bool,
}

/// A way of signing in to PlayFab with a platform identity
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, client: &PlayFabClient, config: &LoginConfig) -> Result<Identity>;
}
