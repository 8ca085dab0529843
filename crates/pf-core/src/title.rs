use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::SERVICE_DOMAIN;
use crate::errors::{PlayFabError, Result};

/// A PlayFab title, identified by its hexadecimal title ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Base URL of the title: `https://<lowercase id>.playfabapi.com`
    pub fn url(&self) -> Result<Url> {
        if self.is_empty() {
            return Err(PlayFabError::Config("title ID not set".to_string()));
        }
        let host = format!("https://{}.{}", self.0.to_lowercase(), SERVICE_DOMAIN);
        Ok(Url::parse(&host)?)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Title {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Title {
    fn from(id: String) -> Self {
        Self(id)
    }
}
