//! Typed async client for the PlayFab game backend
//!
//! # Login and entity tokens
//!
//! ```no_run
//! use playfab::{CustomIdProvider, IdentityProvider, LoginConfig, PlayFabClient, PlayFabConfig};
//! use playfab::entity::TokenSource;
//! use playfab::catalog::Filter;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> playfab::Result<()> {
//!     let client = PlayFabClient::new(PlayFabConfig::default())?;
//!     let config = LoginConfig {
//!         create_account: true,
//!         ..LoginConfig::new("20CA2")
//!     };
//!
//!     let identity = CustomIdProvider::new("device-42").login(&client, &config).await?;
//!
//!     // Keep a master player account token fresh in the background
//!     let cancel = CancellationToken::new();
//!     let tokens = identity.token_source(&cancel, client.clone(), config.title.clone())?;
//!
//!     let token = tokens.token().await?;
//!     let page = Filter {
//!         term: Some("cape".to_string()),
//!         count: Some(10),
//!         ..Default::default()
//!     }
//!     .search(&client, &config.title, Some(&token))
//!     .await?;
//!     println!("found {} items", page.items.len());
//!
//!     cancel.cancel();
//!     Ok(())
//! }
//! ```
//!
//! # Important Notes
//!
//! - Tokens are secrets: `Debug` output of token types is redacted, never log them
//! - A token source whose background refresh failed keeps returning that error;
//!   build a new one (for example by logging in again) to recover
//! - Nothing is retried internally, retry policy is up to the caller

pub mod custom_id;
pub mod login;
pub mod xbox_live;

#[cfg(test)]
mod test_support;

pub use pf_catalog as catalog;
pub use pf_core::{PlayFabClient, PlayFabConfig, PlayFabError, Result, ServiceError, Title, codes};
pub use pf_entity as entity;

// Re-export main types
pub use custom_id::CustomIdProvider;
pub use login::{Identity, IdentityProvider, LoginConfig, ProfileConstraints, RequestParameters};
pub use xbox_live::{RELYING_PARTY, XboxLiveProvider, XboxToken, XboxTokenSource};
