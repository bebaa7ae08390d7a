//! Routes and the access guard.
//!
//! [`decide`] is the whole guard: a pure function of the session snapshot and
//! the route's declared requirement, re-evaluated on every navigation.

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionStatus};

/// Access policy declared by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteRequirement {
    /// Anyone may see the route.
    Public,
    /// Requires a logged-in user.
    AuthenticatedOnly,
    /// Requires a logged-in administrator.
    AdminOnly,
}

/// Outcome of evaluating a route against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardDecision {
    /// Session restore still running: show a loading indicator, render nothing
    /// and do not redirect.
    Pending,
    /// Render the target.
    Render,
    /// Send the user to the login screen.
    RedirectLogin,
    /// Send the user to the home screen.
    RedirectHome,
}

impl GuardDecision {
    /// Returns the route this decision redirects to, if any.
    #[must_use]
    pub const fn redirect_target(self) -> Option<Route> {
        match self {
            Self::RedirectLogin => Some(Route::Login),
            Self::RedirectHome => Some(Route::Dashboard),
            Self::Pending | Self::Render => None,
        }
    }
}

/// Decides whether a route may render for the given session.
#[must_use]
pub fn decide(session: &Session, requirement: RouteRequirement) -> GuardDecision {
    match (session.status(), requirement) {
        (SessionStatus::Unresolved, _) => GuardDecision::Pending,
        (_, RouteRequirement::Public) => GuardDecision::Render,
        (SessionStatus::Anonymous, _) => GuardDecision::RedirectLogin,
        (SessionStatus::Authenticated, RouteRequirement::AdminOnly) if !session.is_admin() => {
            GuardDecision::RedirectHome
        }
        (SessionStatus::Authenticated, _) => GuardDecision::Render,
    }
}

/// Navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Login form.
    Login,
    /// Password-reset wizard.
    ForgotPassword,
    /// Subscription dashboard (home).
    Dashboard,
    /// User management.
    Users,
    /// Administrator overview.
    Admin,
}

impl Route {
    /// All routes in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Login,
        Self::ForgotPassword,
        Self::Dashboard,
        Self::Users,
        Self::Admin,
    ];

    /// Path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::ForgotPassword => "/forgot-password",
            Self::Dashboard => "/",
            Self::Users => "/users",
            Self::Admin => "/admin",
        }
    }

    /// Access requirement declared for the route.
    #[must_use]
    pub const fn requirement(self) -> RouteRequirement {
        match self {
            Self::Login | Self::ForgotPassword => RouteRequirement::Public,
            Self::Dashboard => RouteRequirement::AuthenticatedOnly,
            Self::Users | Self::Admin => RouteRequirement::AdminOnly,
        }
    }

    /// Resolves a path, ignoring a trailing slash and any query string.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Evaluates the guard for this route.
    #[must_use]
    pub fn guard(self, session: &Session) -> GuardDecision {
        decide(session, self.requirement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Identity;

    const REQUIREMENTS: [RouteRequirement; 3] = [
        RouteRequirement::Public,
        RouteRequirement::AuthenticatedOnly,
        RouteRequirement::AdminOnly,
    ];

    fn member() -> Session {
        Session::authenticated(Identity::new("u@x.com", false))
    }

    fn admin() -> Session {
        Session::authenticated(Identity::new("root@x.com", true))
    }

    #[test]
    fn test_unresolved_is_always_pending() {
        for requirement in REQUIREMENTS {
            assert_eq!(
                decide(&Session::unresolved(), requirement),
                GuardDecision::Pending
            );
        }
    }

    #[test]
    fn test_public_renders_for_everyone_resolved() {
        for session in [Session::anonymous(), member(), admin()] {
            assert_eq!(
                decide(&session, RouteRequirement::Public),
                GuardDecision::Render
            );
        }
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        assert_eq!(
            decide(&Session::anonymous(), RouteRequirement::AuthenticatedOnly),
            GuardDecision::RedirectLogin
        );
        assert_eq!(
            decide(&Session::anonymous(), RouteRequirement::AdminOnly),
            GuardDecision::RedirectLogin
        );
    }

    #[test]
    fn test_non_admin_redirects_home_from_admin_routes() {
        assert_eq!(
            decide(&member(), RouteRequirement::AdminOnly),
            GuardDecision::RedirectHome
        );
        assert_eq!(
            decide(&member(), RouteRequirement::AuthenticatedOnly),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_admin_renders_everything() {
        for requirement in REQUIREMENTS {
            assert_eq!(decide(&admin(), requirement), GuardDecision::Render);
        }
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(
            GuardDecision::RedirectLogin.redirect_target(),
            Some(Route::Login)
        );
        assert_eq!(
            GuardDecision::RedirectHome.redirect_target(),
            Some(Route::Dashboard)
        );
        assert_eq!(GuardDecision::Pending.redirect_target(), None);
        assert_eq!(GuardDecision::Render.redirect_target(), None);
    }

    #[test]
    fn test_route_table() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path(""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/login"), Some(Route::Login));
        assert_eq!(Route::from_path("/users/"), Some(Route::Users));
        assert_eq!(Route::from_path("/admin?tab=users"), Some(Route::Admin));
        assert_eq!(Route::from_path("/nope"), None);

        assert_eq!(Route::Users.requirement(), RouteRequirement::AdminOnly);
        assert_eq!(Route::ForgotPassword.requirement(), RouteRequirement::Public);
    }
}
