//! The authoritative session state container.
//!
//! [`SessionStore`] owns the process-wide [`Session`] value under a
//! single-writer discipline: every mutation goes through one of the named
//! transition methods, each of which is a synchronous read-modify-write and
//! therefore atomic under cooperative scheduling. The async drivers
//! ([`SessionStore::login`], [`SessionStore::refresh_session`],
//! [`SessionStore::logout`], [`SessionStore::check_admin_permissions`]) call
//! the injected [`AuthGateway`] and fold the outcome into exactly one
//! transition.
//!
//! Concurrent login/refresh attempts are not deduplicated at this layer: the
//! last attempt to resolve wins, which can leave `loading` or `error`
//! reflecting a stale attempt. That contract is pinned by test rather than
//! guarded by a lock the single-threaded model does not need.

use std::sync::Arc;

use crate::session::gateway::AuthGateway;
use crate::session::models::{Credentials, Session, User};
use crate::session::observer::UserContextObserver;
use crate::session::permissions::derive_admin_access;
use crate::session::storage::{TokenStorage, clear_session_tokens};

pub struct SessionStore {
    session: Session,
    gateway: Arc<dyn AuthGateway>,
    storage: Arc<dyn TokenStorage>,
    observer: Arc<dyn UserContextObserver>,
}

impl SessionStore {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        storage: Arc<dyn TokenStorage>,
        observer: Arc<dyn UserContextObserver>,
    ) -> Self {
        Self {
            session: Session::default(),
            gateway,
            storage,
            observer,
        }
    }

    /// Snapshot of the current session for presentation code.
    pub fn session(&self) -> Session {
        self.session.clone()
    }

    // --- transitions -----------------------------------------------------
    //
    // Each method below is one atomic state transition. They are public so a
    // host that performs its own gateway calls can still drive the store.

    pub fn begin_login(&mut self) {
        self.session.loading = true;
        self.session.error = None;
    }

    /// A login call resolved with a user. Derived permissions are reset, not
    /// recomputed: a fresh permission check is forced rather than trusting
    /// values from a previous session.
    pub fn login_succeeded(&mut self, user: User) {
        self.session.loading = false;
        self.session.error = None;
        self.session.user = Some(user);
        self.session.is_authenticated = true;
        self.session.has_admin_permission = false;
        self.session.roles.clear();
    }

    pub fn login_failed(&mut self, message: impl Into<String>) {
        self.session.loading = false;
        self.session.error = Some(message.into());
        self.session.clear_identity();
    }

    pub fn begin_session_refresh(&mut self) {
        self.session.loading = true;
    }

    /// A session refresh resolved with a user: permissions are derived from
    /// the fresh role list and the user-context observer is notified.
    pub fn session_refresh_succeeded(&mut self, user: User) {
        let access = derive_admin_access(Some(&user.roles));
        self.session.loading = false;
        self.session.has_admin_permission = access.is_admin;
        self.session.roles = access.roles;
        self.session.is_authenticated = true;
        self.session.user = Some(user);
        self.observer.user_resolved(self.session.user.as_ref());
    }

    pub fn session_refresh_failed(&mut self) {
        self.session.loading = false;
        self.session.clear_identity();
        self.observer.user_resolved(None);
    }

    pub fn begin_logout(&mut self) {
        self.session.loading = true;
        self.session.error = None;
    }

    /// Logout resolved. Local state and persisted tokens are cleared on both
    /// outcomes: the user's intent is to end the session on this client
    /// regardless of server-side acknowledgement.
    pub fn logout_succeeded(&mut self) {
        self.session.loading = false;
        self.session.clear_identity();
        clear_session_tokens(&*self.storage);
        self.observer.user_resolved(None);
    }

    pub fn logout_failed(&mut self, message: impl Into<String>) {
        self.session.loading = false;
        self.session.error = Some(message.into());
        self.session.clear_identity();
        clear_session_tokens(&*self.storage);
        self.observer.user_resolved(None);
    }

    /// Direct setter for permission checks performed independently of a full
    /// session fetch.
    pub fn set_admin_permissions(&mut self, is_admin: bool, roles: Vec<String>) {
        self.session.has_admin_permission = is_admin;
        self.session.roles = roles;
    }

    pub fn set_admin_permission_loading(&mut self, loading: bool) {
        self.session.admin_permission_loading = loading;
    }

    pub fn clear_admin_permissions(&mut self) {
        self.session.has_admin_permission = false;
        self.session.roles.clear();
    }

    /// Clear `error` without touching any other field.
    pub fn clear_error(&mut self) {
        self.session.error = None;
    }

    // --- async drivers ---------------------------------------------------

    /// Attempt a login. The outcome is visible in the session snapshot; a
    /// failure also removes any persisted tokens so a stale credential cannot
    /// outlive a rejected login.
    pub async fn login(&mut self, credentials: &Credentials) {
        self.begin_login();
        let gateway = Arc::clone(&self.gateway);
        match gateway.login(credentials).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Login succeeded");
                self.login_succeeded(user);
            }
            Err(err) => {
                tracing::warn!("Login failed: {err}");
                clear_session_tokens(&*self.storage);
                self.login_failed(err.user_message());
            }
        }
    }

    /// Re-validate an existing session, e.g. on application start.
    pub async fn refresh_session(&mut self) {
        self.begin_session_refresh();
        let gateway = Arc::clone(&self.gateway);
        match gateway.fetch_current_user().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Session refreshed");
                self.session_refresh_succeeded(user);
            }
            Err(err) => {
                tracing::info!("Session refresh failed: {err}");
                self.session_refresh_failed();
            }
        }
    }

    /// End the session. Local state always ends anonymous; a remote failure
    /// only leaves its message in `error`.
    pub async fn logout(&mut self) {
        self.begin_logout();
        let gateway = Arc::clone(&self.gateway);
        match gateway.logout().await {
            Ok(()) => {
                tracing::info!("Logout succeeded");
                self.logout_succeeded();
            }
            Err(err) => {
                tracing::warn!("Remote logout failed, ending session locally: {err}");
                self.logout_failed(err.user_message());
            }
        }
    }

    /// Re-check administrative capability without disturbing the primary
    /// `loading` flag. Anomalies resolve silently to "no capability": a
    /// malformed or unavailable role list is never surfaced as an error.
    pub async fn check_admin_permissions(&mut self) {
        self.set_admin_permission_loading(true);
        let gateway = Arc::clone(&self.gateway);
        match gateway.fetch_current_user().await {
            Ok(user) => {
                let access = derive_admin_access(Some(&user.roles));
                self.set_admin_permissions(access.is_admin, access.roles);
            }
            Err(err) => {
                tracing::debug!("Admin permission check failed: {err}");
                self.clear_admin_permissions();
            }
        }
        self.set_admin_permission_loading(false);
    }
}
