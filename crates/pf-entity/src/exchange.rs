use async_trait::async_trait;
use pf_core::config::endpoints;
use pf_core::{PlayFabClient, PlayFabError, Result, Title};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::token::{EntityKey, Token};

#[derive(Debug, Serialize)]
struct ExchangeRequest {
    #[serde(rename = "Entity")]
    entity: EntityKey,
}

impl Token {
    /// Exchange this token for one scoped to the master player account `id`.
    #[instrument(skip(self, client), fields(from = ?self.entity.entity_type))]
    pub async fn exchange(&self, client: &PlayFabClient, title: &Title, id: &str) -> Result<Token> {
        if id.is_empty() {
            return Err(PlayFabError::Config(
                "master player account ID not set".to_string(),
            ));
        }

        let url = client.endpoint(title, endpoints::GET_ENTITY_TOKEN)?;
        let request = ExchangeRequest {
            entity: EntityKey::master_player_account(id),
        };

        debug!("Exchanging entity token");
        client
            .post(url, &request, |req| Token::apply_auth_header(Some(self), req))
            .await
    }
}

/// Trades a token for one scoped to a target entity
#[async_trait]
pub trait Exchanger: Send + Sync {
    async fn exchange(&self, token: &Token, id: &str) -> Result<Token>;
}

/// Exchanges tokens against a title's `/Authentication/GetEntityToken`
#[derive(Debug, Clone)]
pub struct TitleExchanger {
    client: PlayFabClient,
    title: Title,
}

impl TitleExchanger {
    pub fn new(client: PlayFabClient, title: Title) -> Self {
        Self { client, title }
    }
}

#[async_trait]
impl Exchanger for TitleExchanger {
    async fn exchange(&self, token: &Token, id: &str) -> Result<Token> {
        token.exchange(&self.client, &self.title, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::EntityType;
    use chrono::{Duration, Utc};
    use pf_core::PlayFabConfig;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PlayFabClient {
        let base = Url::parse(&server.uri()).unwrap();
        PlayFabClient::new(PlayFabConfig::with_base_url(base)).unwrap()
    }

    fn title_player_token() -> Token {
        Token::new(
            EntityKey::new(EntityType::TitlePlayerAccount, "TPA1"),
            "title-player-secret",
            Utc::now() + Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_exchange_for_master_player_account() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Authentication/GetEntityToken"))
            .and(header("X-EntityToken", "title-player-secret"))
            .and(body_json(json!({
                "Entity": { "Id": "MPA1", "Type": "master_player_account" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "status": "OK",
                "data": {
                    "EntityToken": "master-secret",
                    "TokenExpiration": "2030-01-01T00:00:00Z",
                    "Entity": { "Id": "MPA1", "Type": "master_player_account" }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let exchanger = TitleExchanger::new(client_for(&server), Title::new("ABCD"));
        let token = exchanger.exchange(&title_player_token(), "MPA1").await.unwrap();

        assert_eq!(token.header_value(), "master-secret");
        assert_eq!(token.entity, EntityKey::master_player_account("MPA1"));
    }

    #[tokio::test]
    async fn test_exchange_surfaces_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 401,
                "status": "Unauthorized",
                "error": "NotAuthenticated",
                "errorCode": 1074,
                "errorMessage": "This API method does not allow anonymous callers."
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = title_player_token()
            .exchange(&client, &Title::new("ABCD"), "MPA1")
            .await
            .unwrap_err();

        assert_eq!(err.service_code(), Some(1074));
    }

    #[tokio::test]
    async fn test_exchange_requires_target_id() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        let err = title_player_token()
            .exchange(&client, &Title::new("ABCD"), "")
            .await
            .unwrap_err();

        assert!(matches!(err, PlayFabError::Config(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
