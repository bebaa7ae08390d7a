//! Session manager.
//!
//! Owns the authoritative [`Session`] and is the only component that moves it
//! between states:
//!
//! ```text
//! Unresolved ──restore──▶ Authenticated ◀──login/logout──▶ Anonymous
//!      └─────────restore──────────────────────────────────────▲
//! ```
//!
//! Screens hold an `Arc<SessionManager>`, read snapshots with
//! [`SessionManager::session`] and get notified of transitions through
//! [`SessionManager::subscribe`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use submanager_domain::{Identity, Session, SessionStatus};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::gateway::{ApiError, GatewayEvent};
use crate::ports::{AuthApi, TokenStore, TokenStoreError};

/// Errors surfaced by [`SessionManager::login`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The credentials were rejected, or the identity behind a freshly issued
    /// credential could not be loaded.
    #[error("authentication failed")]
    AuthenticationFailure {
        /// The failed backend call.
        #[source]
        source: ApiError,
    },

    /// The credential could not be persisted.
    #[error("could not store credential: {0}")]
    Storage(#[from] TokenStoreError),
}

impl SessionError {
    const fn authentication(source: ApiError) -> Self {
        Self::AuthenticationFailure { source }
    }
}

/// Owner of the session state machine.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    auth: Arc<dyn AuthApi>,
    state: watch::Sender<Session>,
    restore_started: AtomicBool,
}

impl SessionManager {
    /// Creates a manager in the `Unresolved` state.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, auth: Arc<dyn AuthApi>) -> Self {
        let (state, _) = watch::channel(Session::unresolved());
        Self {
            store,
            auth,
            state,
            restore_started: AtomicBool::new(false),
        }
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Returns a receiver notified on every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    fn transition(&self, next: Session) {
        let to = next.status();
        let from = self.state.send_replace(next).status();
        debug!(?from, ?to, "session transition");
    }

    /// Resolves the startup session from the stored credential.
    ///
    /// Runs once; later calls return immediately. Never fails: a missing,
    /// unreadable or rejected credential ends in `Anonymous`, and a rejected
    /// one is also cleared from the store.
    pub async fn restore(&self) {
        if self.restore_started.swap(true, Ordering::SeqCst) {
            debug!("session restore already ran");
            return;
        }

        let credential = match self.store.read().await {
            Ok(credential) => credential,
            Err(error) => {
                warn!(%error, "could not read stored credential");
                None
            }
        };

        let Some(credential) = credential else {
            debug!("no stored credential");
            self.transition(Session::anonymous());
            return;
        };

        debug!(credential = %credential.preview(), "restoring session");
        match self.auth.fetch_current_identity().await {
            Ok(identity) => {
                info!(email = %identity.email, "session restored");
                self.transition(Session::authenticated(identity));
            }
            Err(error) => {
                debug!(%error, "session restore failed");
                self.clear_store().await;
                self.transition(Session::anonymous());
            }
        }
    }

    /// Logs in with an email and password.
    ///
    /// Both inputs are expected to be non-empty; the caller validates them.
    /// On success the credential is stored and the session becomes
    /// `Authenticated`. If authentication fails nothing changes. If the
    /// identity lookup afterwards fails, the freshly stored credential is
    /// removed again and the session is `Anonymous`.
    ///
    /// # Errors
    /// Returns [`SessionError::AuthenticationFailure`] when either backend call
    /// fails, or [`SessionError::Storage`] when the credential cannot be saved.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let credential = self
            .auth
            .authenticate(email, password)
            .await
            .map_err(SessionError::authentication)?;

        self.store.save(&credential).await?;

        match self.auth.fetch_current_identity().await {
            Ok(identity) => {
                info!(email = %identity.email, admin = identity.is_admin, "logged in");
                self.transition(Session::authenticated(identity.clone()));
                Ok(identity)
            }
            Err(error) => {
                warn!(%error, "identity lookup failed after login, discarding credential");
                self.clear_store().await;
                self.transition(Session::anonymous());
                Err(SessionError::authentication(error))
            }
        }
    }

    /// Logs out. Always ends `Anonymous`, whatever the previous state.
    pub async fn logout(&self) {
        self.clear_store().await;
        self.transition(Session::anonymous());
        info!("logged out");
    }

    /// Reacts to the gateway having rejected the stored credential.
    ///
    /// The gateway has already cleared the store. While the startup restore is
    /// still running the signal is ignored, since restore resolves the session
    /// itself.
    pub fn handle_invalidation(&self) {
        if self.state.borrow().status() == SessionStatus::Unresolved {
            debug!("invalidation during restore ignored");
            return;
        }
        self.transition(Session::anonymous());
    }

    /// Spawns a task applying [`Self::handle_invalidation`] for every gateway
    /// event until the channel closes.
    pub fn listen(self: &Arc<Self>, mut events: broadcast::Receiver<GatewayEvent>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(GatewayEvent::SessionInvalidated) => manager.handle_invalidation(),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "missed gateway events");
                        manager.handle_invalidation();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    async fn clear_store(&self) {
        if let Err(error) = self.store.clear().await {
            warn!(%error, "could not clear stored credential");
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
