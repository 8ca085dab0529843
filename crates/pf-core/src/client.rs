use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::PlayFabConfig;
use crate::errors::{PlayFabError, Result, ServiceError};
use crate::title::Title;

/// Success envelope wrapping every 200/201 response body
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "code", default)]
    pub status_code: u16,
    pub data: T,
    #[serde(default)]
    pub status: String,
}

/// HTTP executor shared by every PlayFab call
#[derive(Debug, Clone)]
pub struct PlayFabClient {
    config: PlayFabConfig,
    http: Client,
}

impl PlayFabClient {
    /// Create a new client
    pub fn new(config: PlayFabConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.http_timeouts.connect)
            .timeout(config.http_timeouts.request)
            .user_agent(config.user_agent.as_deref().unwrap_or("playfab-rs"))
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &PlayFabConfig {
        &self.config
    }

    /// Base URL requests for `title` are sent to
    pub fn title_url(&self, title: &Title) -> Result<Url> {
        match &self.config.base_url {
            Some(base) => Ok(base.clone()),
            None => title.url(),
        }
    }

    /// Full URL of an API path for `title`.
    ///
    /// `path` is appended to any path already on the base URL.
    pub fn endpoint(&self, title: &Title, path: &str) -> Result<Url> {
        if title.is_empty() {
            return Err(PlayFabError::Config("title ID not set".to_string()));
        }

        let mut base = self.title_url(title)?;
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// POST `body` as JSON and decode the `data` field of the response.
    ///
    /// `mutate` runs on the request right before it is sent, e.g. to add the
    /// entity token header.
    #[instrument(skip(self, url, body, mutate), fields(url = %url))]
    pub async fn post<B, T, F>(&self, url: Url, body: &B, mutate: F) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let request = self
            .http
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body);

        debug!("Sending request");
        let response = mutate(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let envelope: Envelope<T> =
                    serde_json::from_slice(&bytes).map_err(|source| PlayFabError::Decode {
                        context: format!("POST {url}: {}", snippet(&bytes)),
                        source,
                    })?;
                Ok(envelope.data)
            }
            _ => match serde_json::from_slice::<ServiceError>(&bytes) {
                Ok(err) => {
                    warn!(code = err.code, kind = %err.kind, "PlayFab returned an error");
                    Err(err.into())
                }
                Err(_) => Err(PlayFabError::Http {
                    status,
                    body_snippet: snippet(&bytes),
                }),
            },
        }
    }
}

fn snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(200).collect()
}
