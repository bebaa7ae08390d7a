//! Wiring shared by every screen.

use std::error::Error;
use std::sync::Arc;

use submanager_application::gateway::{GatewayEvent, InvalidationSignal};
use submanager_application::ports::{AuthApi, TokenStore};
use submanager_application::{Navigation, Navigator, ScreenTicket, SessionManager};
use submanager_domain::{Route, Session};
use submanager_infrastructure::{AppConfig, BackendClient, FileTokenStore};
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Long-lived collaborators for one invocation.
pub struct AppContext {
    pub config: AppConfig,
    pub backend: Arc<BackendClient>,
    pub session: Arc<SessionManager>,
    navigator: Arc<Mutex<Navigator>>,
    listeners: Vec<JoinHandle<()>>,
}

impl AppContext {
    /// Builds the gateway and session manager, then resolves the stored session.
    pub async fn start(config: AppConfig) -> Result<Self, Box<dyn Error>> {
        let store: Arc<dyn TokenStore> = match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(FileTokenStore::in_config_dir()?),
        };

        let signal = InvalidationSignal::new();
        let backend = Arc::new(BackendClient::new(
            &config.api_base_url,
            config.request_timeout(),
            Arc::clone(&store),
            signal.clone(),
        )?);
        let auth: Arc<dyn AuthApi> = backend.clone();
        let session = Arc::new(SessionManager::new(store, auth));
        let navigator = Arc::new(Mutex::new(Navigator::default()));

        let listeners = vec![
            session.listen(signal.subscribe()),
            follow_invalidations(Arc::clone(&navigator), signal.subscribe()),
        ];

        session.restore().await;
        debug!(status = ?session.session().status(), "startup session resolved");

        Ok(Self {
            config,
            backend,
            session,
            navigator,
            listeners,
        })
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.session.session()
    }

    /// Moves to `route` through the guard.
    pub async fn enter(&self, route: Route) -> Navigation {
        let session = self.snapshot();
        self.navigator.lock().await.navigate(&session, route)
    }

    /// Ticket for responses belonging to the current screen.
    pub async fn ticket(&self) -> ScreenTicket {
        self.navigator.lock().await.ticket()
    }

    /// Route currently showing.
    pub async fn current_route(&self) -> Route {
        self.navigator.lock().await.current()
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

/// Sends the navigator to login whenever the gateway rejects the credential.
fn follow_invalidations(
    navigator: Arc<Mutex<Navigator>>,
    mut events: broadcast::Receiver<GatewayEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(GatewayEvent::SessionInvalidated) => {
                    if let Some(route) = navigator.lock().await.on_invalidated() {
                        debug!(?route, "session invalidated, leaving screen");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "missed gateway events");
                    navigator.lock().await.on_invalidated();
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
