//! PlayFab entity tokens
//!
//! An entity token authorizes calls on behalf of an entity (a player, a title,
//! a group...). This crate provides:
//!
//! - [`Token`] and [`EntityKey`]: the token value and the principal it is scoped to
//! - [`Token::exchange`]: trades a token for one scoped to a master player account
//! - [`ExchangeTokenSource`]: keeps such a token fresh in the background and
//!   hands out valid copies to any number of concurrent callers
//!
//! # Example
//!
//! ```no_run
//! use pf_core::{PlayFabClient, PlayFabConfig, Title};
//! use pf_entity::{ExchangeTokenSource, Token, TokenSource};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(login_token: Token) -> pf_core::Result<()> {
//! let client = PlayFabClient::new(PlayFabConfig::default())?;
//! let cancel = CancellationToken::new();
//!
//! let source = ExchangeTokenSource::for_title(
//!     &cancel,
//!     login_token,
//!     client,
//!     Title::new("20CA2"),
//!     "MASTER_PLAYER_ID",
//! );
//!
//! let token = source.token().await?;
//! println!("token valid until {}", token.expiration);
//!
//! // Stop refreshing in the background
//! cancel.cancel();
//! # Ok(())
//! # }
//! ```

pub mod exchange;
pub mod source;
pub mod token;

pub use exchange::{Exchanger, TitleExchanger};
pub use source::{DEFAULT_REFRESH_INTERVAL, ExchangeTokenSource, TokenSource};
pub use token::{EntityKey, EntityType, Token};
