use std::collections::HashMap;

use pf_core::config::endpoints;
use pf_core::{PlayFabClient, PlayFabError, Result, Title};
use pf_entity::{EntityKey, Token};
use reqwest::header::ACCEPT_LANGUAGE;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::item::{Item, StoreReference};

/// Largest page size accepted by `/Catalog/SearchItems`
pub const MAX_SEARCH_COUNT: u32 = 50;

/// Search parameters for the public catalog
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    /// Page size, at most [`MAX_SEARCH_COUNT`]. The service defaults to 10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Usually taken from [`SearchResult::continuation_token`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_tags: Option<HashMap<String, serde_json::Value>>,
    /// Filled from the token's entity when left empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
    /// OData filter, e.g. `ContentType eq 'PersonaDurable'`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Locale of the returned dictionaries, also sent as `Accept-Language`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// OData sort query; relevance when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(rename = "Search", skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// OData selection of returned fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreReference>,
}

/// One page of search results
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SearchResult {
    /// Pass back through [`Filter::continuation_token`] for the next page
    pub continuation_token: Option<String>,
    pub items: Vec<Item>,
}

impl Filter {
    /// Search the public catalog.
    ///
    /// Served from a cache, so item updates can take a few minutes to show
    /// up; use [`crate::Query::item`] for recent changes.
    #[instrument(skip(self, client, token))]
    pub async fn search(
        &self,
        client: &PlayFabClient,
        title: &Title,
        token: Option<&Token>,
    ) -> Result<SearchResult> {
        if let Some(count) = self.count.filter(|&count| count > MAX_SEARCH_COUNT) {
            return Err(PlayFabError::Config(format!(
                "Filter: count must be <= {MAX_SEARCH_COUNT}, got {count}"
            )));
        }

        let mut filter = self.clone();
        if filter.entity.is_none() {
            filter.entity = token.map(|token| token.entity.clone());
        }

        let url = client.endpoint(title, endpoints::CATALOG_SEARCH_ITEMS)?;
        debug!(term = ?filter.term, "Searching catalog");
        client
            .post(url, &filter, |req| {
                let req = Token::apply_auth_header(token, req);
                match &filter.language {
                    Some(language) => req.header(ACCEPT_LANGUAGE, language),
                    None => req,
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pf_core::PlayFabConfig;
    use pf_entity::EntityType;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PlayFabClient {
        let base = Url::parse(&server.uri()).unwrap();
        PlayFabClient::new(PlayFabConfig::with_base_url(base)).unwrap()
    }

    fn player_token() -> Token {
        Token::new(
            EntityKey::new(EntityType::TitlePlayerAccount, "TPA1"),
            "player-secret",
            Utc::now() + Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_search_fills_entity_and_language() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Catalog/SearchItems"))
            .and(header("X-EntityToken", "player-secret"))
            .and(header("Accept-Language", "en-US"))
            .and(body_json(json!({
                "Count": 2,
                "Entity": { "Id": "TPA1", "Type": "title_player_account" },
                "Language": "en-US",
                "Search": "cape"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "status": "OK",
                "data": {
                    "ContinuationToken": "next",
                    "Items": [{ "Id": "a" }, { "Id": "b" }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter = Filter {
            count: Some(2),
            language: Some("en-US".to_string()),
            term: Some("cape".to_string()),
            ..Default::default()
        };
        let token = player_token();
        let result = filter
            .search(&client_for(&server), &Title::new("ABCD"), Some(&token))
            .await
            .unwrap();

        assert_eq!(result.continuation_token.as_deref(), Some("next"));
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[1].id, "b");
    }

    #[tokio::test]
    async fn test_search_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Catalog/SearchItems"))
            .and(body_json(json!({ "Filter": "ContentType eq 'PersonaDurable'" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "status": "OK",
                "data": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter = Filter {
            filter: Some("ContentType eq 'PersonaDurable'".to_string()),
            ..Default::default()
        };
        let result = filter
            .search(&client_for(&server), &Title::new("ABCD"), None)
            .await
            .unwrap();

        assert!(result.items.is_empty());
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("X-EntityToken").is_none());
    }

    #[test]
    fn test_store_by_id_omits_alternate_id() {
        let filter = Filter {
            store: Some(StoreReference {
                id: Some("store1".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value, json!({ "Store": { "Id": "store1" } }));
    }

    #[tokio::test]
    async fn test_search_rejects_large_count() {
        let server = MockServer::start().await;
        let filter = Filter {
            count: Some(51),
            ..Default::default()
        };

        let err = filter
            .search(&client_for(&server), &Title::new("ABCD"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, PlayFabError::Config(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
