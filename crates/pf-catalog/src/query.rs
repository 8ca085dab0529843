use std::collections::HashMap;

use pf_core::config::endpoints;
use pf_core::{PlayFabClient, Result, Title};
use pf_entity::{EntityKey, Token};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::item::{AlternateId, Item};

/// Lookup of a single catalog item, by ID or alternate ID
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<AlternateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_tags: Option<HashMap<String, serde_json::Value>>,
    /// Filled from the token's entity when left empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "Item", default)]
    item: Item,
}

impl Query {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Fetch the item directly rather than from the search cache.
    /// References of the item are still cached briefly.
    #[instrument(skip(self, client, token), fields(id = ?self.id))]
    pub async fn item(
        &self,
        client: &PlayFabClient,
        title: &Title,
        token: Option<&Token>,
    ) -> Result<Item> {
        let mut query = self.clone();
        if query.entity.is_none() {
            query.entity = token.map(|token| token.entity.clone());
        }

        let url = client.endpoint(title, endpoints::CATALOG_GET_ITEM)?;
        debug!("Fetching catalog item");
        let response: QueryResponse = client
            .post(url, &query, |req| Token::apply_auth_header(token, req))
            .await?;
        Ok(response.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pf_core::{PlayFabConfig, codes};
    use pf_entity::EntityType;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PlayFabClient {
        let base = Url::parse(&server.uri()).unwrap();
        PlayFabClient::new(PlayFabConfig::with_base_url(base)).unwrap()
    }

    #[tokio::test]
    async fn test_item_by_alternate_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Catalog/GetItem"))
            .and(header("X-EntityToken", "player-secret"))
            .and(body_json(json!({
                "AlternateId": { "Type": "FriendlyId", "Value": "cool-cape" },
                "Entity": { "Id": "TPA1", "Type": "title_player_account" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "status": "OK",
                "data": { "Item": { "Id": "9f2a", "Type": "catalogItem" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = Token::new(
            EntityKey::new(EntityType::TitlePlayerAccount, "TPA1"),
            "player-secret",
            Utc::now() + Duration::hours(1),
        );
        let query = Query {
            alternate_id: Some(AlternateId {
                id_type: "FriendlyId".to_string(),
                value: "cool-cape".to_string(),
            }),
            ..Default::default()
        };
        let item = query
            .item(&client_for(&server), &Title::new("ABCD"), Some(&token))
            .await
            .unwrap();

        assert_eq!(item.id, "9f2a");
    }

    #[tokio::test]
    async fn test_missing_item() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Catalog/GetItem"))
            .and(body_json(json!({ "Id": "missing" })))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 404,
                "status": "NotFound",
                "error": "ItemNotFound",
                "errorCode": 1047,
                "errorMessage": "ItemNotFound"
            })))
            .mount(&server)
            .await;

        let err = Query::by_id("missing")
            .item(&client_for(&server), &Title::new("ABCD"), None)
            .await
            .unwrap_err();

        assert_eq!(err.service_code(), Some(codes::ITEM_NOT_FOUND));
        assert_eq!(err.to_string(), "playfab: 1047 (ItemNotFound)");
    }
}
