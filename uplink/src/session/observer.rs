//! User-context observer: a sink notified with the resolved user whenever
//! session resolution completes.
//!
//! The host wires in whatever cross-cutting consumer it has (error-reporting
//! tagging, analytics identity). The core only guarantees the call happens
//! with the correct value at the correct transitions: session refresh success
//! (with the user), session refresh failure and logout (with `None`).

use crate::session::models::User;

pub trait UserContextObserver: Send + Sync {
    fn user_resolved(&self, user: Option<&User>);
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUserContext;

impl UserContextObserver for NoopUserContext {
    fn user_resolved(&self, _user: Option<&User>) {}
}
