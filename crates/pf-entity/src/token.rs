use std::fmt;

use chrono::{DateTime, Utc};
use pf_core::config::ENTITY_TOKEN_HEADER;
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

/// Kind of principal an entity token is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Namespace,
    Title,
    MasterPlayerAccount,
    TitlePlayerAccount,
    Character,
    Group,
    Service,
    #[serde(untagged)]
    Other(String),
}

/// Identifies an entity: its type and opaque ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Type")]
    pub entity_type: EntityType,
}

impl EntityKey {
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type,
        }
    }

    pub fn master_player_account(id: impl Into<String>) -> Self {
        Self::new(EntityType::MasterPlayerAccount, id)
    }
}

/// Entity token used to authorize calls on behalf of an entity.
///
/// Tokens are immutable; refreshing one always produces a new value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "Entity")]
    pub entity: EntityKey,
    #[serde(rename = "EntityToken")]
    token: String,
    #[serde(rename = "TokenExpiration")]
    pub expiration: DateTime<Utc>,
}

impl Token {
    pub fn new(entity: EntityKey, token: impl Into<String>, expiration: DateTime<Utc>) -> Self {
        Self {
            entity,
            token: token.into(),
            expiration,
        }
    }

    /// Raw secret sent in the `X-EntityToken` header
    pub fn header_value(&self) -> &str {
        &self.token
    }

    /// Expired once `now` reaches the expiration, inclusive
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Authorize `request` with `token`; unauthenticated calls pass `None`.
    pub fn apply_auth_header(token: Option<&Self>, request: RequestBuilder) -> RequestBuilder {
        match token {
            Some(token) => request.header(ENTITY_TOKEN_HEADER, &token.token),
            None => request,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("entity", &self.entity)
            .field("token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn token_expiring_at(expiration: DateTime<Utc>) -> Token {
        Token::new(
            EntityKey::new(EntityType::TitlePlayerAccount, "ABCDEF"),
            "secret",
            expiration,
        )
    }

    #[test]
    fn test_expiry_boundary_is_expired() {
        let now = Utc::now();
        let token = token_expiring_at(now);

        assert!(token.is_expired_at(now));
        assert!(token.is_expired_at(now + Duration::seconds(1)));
        assert!(!token.is_expired_at(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_is_expired_uses_current_time() {
        assert!(token_expiring_at(Utc::now() - Duration::seconds(1)).is_expired());
        assert!(!token_expiring_at(Utc::now() + Duration::hours(1)).is_expired());
    }

    #[test]
    fn test_apply_auth_header() {
        let client = reqwest::Client::new();
        let token = token_expiring_at(Utc::now());

        let request = Token::apply_auth_header(Some(&token), client.post("https://example.com"))
            .build()
            .unwrap();
        assert_eq!(request.headers()[ENTITY_TOKEN_HEADER], "secret");

        let request = Token::apply_auth_header(None, client.post("https://example.com"))
            .build()
            .unwrap();
        assert!(request.headers().get(ENTITY_TOKEN_HEADER).is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let token = token_expiring_at(Utc::now());
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_entity_token_response() {
        let token: Token = serde_json::from_value(json!({
            "EntityToken": "NHxabc",
            "TokenExpiration": "2024-05-01T12:00:00Z",
            "Entity": { "Id": "F00D", "Type": "master_player_account" }
        }))
        .unwrap();

        assert_eq!(token.header_value(), "NHxabc");
        assert_eq!(token.entity, EntityKey::master_player_account("F00D"));
        assert_eq!(token.expiration.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_unknown_entity_type_is_preserved() {
        let key: EntityKey =
            serde_json::from_value(json!({ "Id": "1", "Type": "cloud_root" })).unwrap();
        assert_eq!(key.entity_type, EntityType::Other("cloud_root".to_string()));
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({ "Id": "1", "Type": "cloud_root" })
        );
    }
}
