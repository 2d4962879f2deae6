//! Session data model.
//!
//! [`Session`] is the authoritative record of the current user's
//! authentication state and derived permissions. It is owned by
//! [`SessionStore`](crate::session::SessionStore) and only mutated through the
//! store's transition methods; everything else reads cloned snapshots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account identifier
pub type UserId = Uuid;

/// The user record as resolved by the authentication API.
///
/// Roles arrive as free-form strings; administrative capability is derived
/// from them, never stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Login form payload submitted to the auth gateway.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Snapshot of the current session state.
///
/// `has_admin_permission` and `roles` are derived fields: they are only
/// written by the permission deriver or by a reset, and they are cleared in
/// the same transition that clears `user` so no stale capability survives a
/// logout or failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// True while a login/refresh/logout call is in flight
    pub loading: bool,
    /// Message describing the last failed operation, if any
    pub error: Option<String>,
    pub has_admin_permission: bool,
    /// Mirrors `user.roles` when known, empty otherwise
    pub roles: Vec<String>,
    /// Permission-check-in-progress flag, deliberately decoupled from
    /// `loading` so a permission re-check after initial session load does not
    /// disturb the primary spinner.
    pub admin_permission_loading: bool,
}

impl Default for Session {
    /// Anonymous defaults: the state at application start and after any
    /// logout or failure.
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: false,
            error: None,
            has_admin_permission: false,
            roles: Vec::new(),
            admin_permission_loading: false,
        }
    }
}

impl Session {
    /// Clear identity and everything derived from it in one step.
    ///
    /// Invariant: `user`, `is_authenticated`, `has_admin_permission` and
    /// `roles` always change together when a session ends.
    pub(crate) fn clear_identity(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.has_admin_permission = false;
        self.roles.clear();
    }
}
