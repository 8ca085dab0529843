use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pf_core::{PlayFabClient, PlayFabError, Result, Title};
use tokio::sync::Mutex;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, instrument, warn};

use crate::exchange::{Exchanger, TitleExchanger};
use crate::token::{EntityType, Token};

/// How often the background loop exchanges the held token
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Source of entity tokens that are valid at the time they are returned
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<Token>;
}

struct State {
    token: Token,
    /// Set once by a failed background refresh and never cleared
    err: Option<Arc<PlayFabError>>,
}

struct Shared {
    state: Mutex<State>,
    exchanger: Arc<dyn Exchanger>,
    master_id: String,
}

/// Token source that keeps a master player account token fresh.
///
/// A background task exchanges the held token every interval until the
/// cancellation token passed at construction is cancelled or the source is
/// dropped. The first failed background exchange stops the task and is
/// returned from every later [`TokenSource::token`] call; build a new source
/// to recover.
pub struct ExchangeTokenSource {
    shared: Arc<Shared>,
    _loop_guard: DropGuard,
}

impl fmt::Debug for ExchangeTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeTokenSource")
            .field("master_id", &self.shared.master_id)
            .finish_non_exhaustive()
    }
}

impl ExchangeTokenSource {
    /// Refresh every [`DEFAULT_REFRESH_INTERVAL`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new(
        cancel: &CancellationToken,
        seed: Token,
        exchanger: Arc<dyn Exchanger>,
        master_id: impl Into<String>,
    ) -> Self {
        Self::with_interval(cancel, seed, exchanger, master_id, DEFAULT_REFRESH_INTERVAL)
    }

    /// Exchange against `title` through `client`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn for_title(
        cancel: &CancellationToken,
        seed: Token,
        client: PlayFabClient,
        title: Title,
        master_id: impl Into<String>,
    ) -> Self {
        let exchanger = Arc::new(TitleExchanger::new(client, title));
        Self::new(cancel, seed, exchanger, master_id)
    }

    /// Refresh every `interval` instead of the default.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn with_interval(
        cancel: &CancellationToken,
        seed: Token,
        exchanger: Arc<dyn Exchanger>,
        master_id: impl Into<String>,
        interval: Duration,
    ) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                token: seed,
                err: None,
            }),
            exchanger,
            master_id: master_id.into(),
        });

        let shutdown = cancel.child_token();
        tokio::spawn(refresh_loop(Arc::clone(&shared), shutdown.clone(), interval));

        Self {
            shared,
            _loop_guard: shutdown.drop_guard(),
        }
    }
}

#[instrument(skip_all, fields(master_id = %shared.master_id))]
async fn refresh_loop(shared: Arc<Shared>, shutdown: CancellationToken, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("shutdown, stopping refresh loop");
                return;
            }
            _ = ticker.tick() => {
                let mut state = shared.state.lock().await;
                match shared.exchanger.exchange(&state.token, &shared.master_id).await {
                    Ok(token) => {
                        debug!(expiration = %token.expiration, "entity token refreshed");
                        state.token = token;
                    }
                    Err(err) => {
                        warn!("background token refresh failed, stopping refresh loop: {}", err);
                        state.err = Some(Arc::new(err));
                        return;
                    }
                }
            }
        }
    }
}

#[async_trait]
impl TokenSource for ExchangeTokenSource {
    async fn token(&self) -> Result<Token> {
        let mut state = self.shared.state.lock().await;
        if let Some(err) = &state.err {
            return Err(PlayFabError::BackgroundRefresh(Arc::clone(err)));
        }

        if state.token.is_expired()
            || state.token.entity.entity_type != EntityType::MasterPlayerAccount
        {
            info!(
                entity_type = ?state.token.entity.entity_type,
                expiration = %state.token.expiration,
                "held token unusable, exchanging"
            );
            let token = self
                .shared
                .exchanger
                .exchange(&state.token, &self.shared.master_id)
                .await
                .map_err(|err| PlayFabError::Exchange(Box::new(err)))?;
            state.token = token;
        }
        Ok(state.token.clone())
    }
}
