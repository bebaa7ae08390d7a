//! Navigation state driven by the route guard.
//!
//! The navigator remembers which screen is showing and stamps every move with
//! an epoch. Screens take a [`ScreenTicket`] before starting a request and
//! check it when the response arrives: once the user has navigated elsewhere
//! the ticket is stale and the response is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use submanager_domain::{GuardDecision, Route, Session};
use tracing::debug;

/// Redirects followed in one navigation. Admin → home → login is the longest chain.
const MAX_REDIRECTS: usize = 2;

/// Result of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Guard decision for the requested route.
    pub decision: GuardDecision,
    /// Route that ended up showing after redirects.
    pub route: Route,
}

impl Navigation {
    /// Returns true when the requested route itself may render.
    #[must_use]
    pub const fn rendered(&self) -> bool {
        matches!(self.decision, GuardDecision::Render)
    }
}

/// Tracks the current route and navigation epoch.
#[derive(Debug)]
pub struct Navigator {
    current: Route,
    epoch: Arc<AtomicU64>,
}

impl Navigator {
    /// Starts on `initial` without evaluating the guard.
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Route currently showing.
    #[must_use]
    pub const fn current(&self) -> Route {
        self.current
    }

    /// Navigates to `target`, following guard redirects.
    ///
    /// A `Pending` decision keeps the target as the current route; the screen
    /// is expected to show a loading state until the session resolves and
    /// navigate again.
    pub fn navigate(&mut self, session: &Session, target: Route) -> Navigation {
        let decision = target.guard(session);

        let mut route = target;
        let mut step = decision;
        for _ in 0..MAX_REDIRECTS {
            let Some(next) = step.redirect_target() else {
                break;
            };
            route = next;
            step = route.guard(session);
        }

        debug!(?target, ?decision, landed = ?route, "navigate");
        self.move_to(route);
        Navigation { decision, route }
    }

    /// Navigates to a path; unknown paths go home.
    pub fn navigate_path(&mut self, session: &Session, path: &str) -> Navigation {
        let target = Route::from_path(path).unwrap_or(Route::Dashboard);
        self.navigate(session, target)
    }

    /// Moves to the login screen after the session was invalidated.
    ///
    /// Returns `None` when already on the login screen.
    pub fn on_invalidated(&mut self) -> Option<Route> {
        if self.current == Route::Login {
            return None;
        }
        self.move_to(Route::Login);
        Some(Route::Login)
    }

    /// Issues a ticket for the current screen.
    #[must_use]
    pub fn ticket(&self) -> ScreenTicket {
        ScreenTicket {
            issued: self.epoch.load(Ordering::SeqCst),
            epoch: Arc::clone(&self.epoch),
        }
    }

    fn move_to(&mut self, route: Route) {
        self.current = route;
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

/// Proof that a screen is still the one the user is looking at.
#[derive(Debug, Clone)]
pub struct ScreenTicket {
    issued: u64,
    epoch: Arc<AtomicU64>,
}

impl ScreenTicket {
    /// Returns true while no navigation has happened since the ticket was issued.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.issued
    }

    /// Passes `value` through only if the ticket is still current.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            debug!("discarding response for a screen that is no longer showing");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use submanager_domain::Identity;

    fn member() -> Session {
        Session::authenticated(Identity::new("u@x.com", false))
    }

    #[test]
    fn test_anonymous_lands_on_login() {
        let mut navigator = Navigator::default();
        let navigation = navigator.navigate(&Session::anonymous(), Route::Users);
        assert_eq!(navigation.decision, GuardDecision::RedirectLogin);
        assert_eq!(navigation.route, Route::Login);
        assert_eq!(navigator.current(), Route::Login);
    }

    #[test]
    fn test_member_bounced_home_from_admin() {
        let mut navigator = Navigator::default();
        let navigation = navigator.navigate(&member(), Route::Admin);
        assert_eq!(navigation.decision, GuardDecision::RedirectHome);
        assert_eq!(navigation.route, Route::Dashboard);
        assert!(!navigation.rendered());
    }

    #[test]
    fn test_pending_keeps_target() {
        let mut navigator = Navigator::new(Route::Login);
        let navigation = navigator.navigate(&Session::unresolved(), Route::Dashboard);
        assert_eq!(navigation.decision, GuardDecision::Pending);
        assert_eq!(navigation.route, Route::Dashboard);
    }

    #[test]
    fn test_unknown_path_goes_home() {
        let mut navigator = Navigator::new(Route::Login);
        let navigation = navigator.navigate_path(&member(), "/settings");
        assert_eq!(navigation.route, Route::Dashboard);
        assert!(navigation.rendered());
    }

    #[test]
    fn test_invalidation_redirects_unless_on_login() {
        let mut navigator = Navigator::new(Route::Dashboard);
        assert_eq!(navigator.on_invalidated(), Some(Route::Login));
        assert_eq!(navigator.current(), Route::Login);
        assert_eq!(navigator.on_invalidated(), None);
    }

    #[test]
    fn test_ticket_goes_stale_after_navigation() {
        let mut navigator = Navigator::default();
        navigator.navigate(&member(), Route::Dashboard);
        let ticket = navigator.ticket();
        assert!(ticket.is_current());
        assert_eq!(ticket.accept(3), Some(3));

        navigator.navigate(&member(), Route::Login);
        assert!(!ticket.is_current());
        assert_eq!(ticket.accept(3), None);
    }
}
