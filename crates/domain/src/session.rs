//! Session state types.
//!
//! A [`Session`] is the read-only snapshot screens observe. Its fields are
//! private so the identity/status pairing can only be built through the
//! constructors below: an identity exists exactly when the session is
//! authenticated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer credential issued by the backend.
///
/// `Debug` and `Display` only ever show a short preview.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Get a preview of the token (first 8 chars + ...).
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.chars().count() > 12 {
            let head: String = self.0.chars().take(8).collect();
            format!("{head}...")
        } else {
            "***".to_string()
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.preview()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview())
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    /// The issued access token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenGrant {
    /// Converts the grant into a [`Credential`].
    #[must_use]
    pub fn into_credential(self) -> Credential {
        Credential::new(self.access_token)
    }
}

/// The resolved user behind a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user id, when the backend reports one.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Login email.
    pub email: String,
    /// Whether the user may access administrator screens.
    #[serde(default)]
    pub is_admin: bool,
}

impl Identity {
    /// Creates an identity without a backend id.
    #[must_use]
    pub fn new(email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id: None,
            email: email.into(),
            is_admin,
        }
    }
}

/// Resolution status of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The startup restore has not finished yet.
    Unresolved,
    /// A credential is stored and its identity is known.
    Authenticated,
    /// No usable credential.
    Anonymous,
}

/// Snapshot of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    status: SessionStatus,
    identity: Option<Identity>,
}

impl Session {
    /// The state at process start, before restore has run.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self {
            status: SessionStatus::Unresolved,
            identity: None,
        }
    }

    /// A logged-out session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            identity: None,
        }
    }

    /// A logged-in session for `identity`.
    #[must_use]
    pub const fn authenticated(identity: Identity) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            identity: Some(identity),
        }
    }

    /// Returns the resolution status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the identity when authenticated.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns true once restore has finished.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self.status, SessionStatus::Unresolved)
    }

    /// Returns true if the session is authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated)
    }

    /// Returns true if the session belongs to an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.is_admin)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unresolved()
    }
}
