//! Authentication session lifecycle and permission derivation.
//!
//! The module is organized around one authoritative state container,
//! [`SessionStore`], and the narrow interfaces it drives:
//!
//! - [`gateway::AuthGateway`] — the login/refresh/logout transport boundary,
//!   with [`gateway::HttpAuthGateway`] as the production implementation;
//! - [`storage::TokenStorage`] — durable client storage for persisted tokens;
//! - [`observer::UserContextObserver`] — cross-cutting sink notified when
//!   session resolution completes;
//! - [`permissions`] — pure derivation of administrative capability from the
//!   role list.

pub mod gateway;
pub mod models;
pub mod observer;
pub mod permissions;
pub mod storage;
pub mod store;

pub use gateway::{AuthGateway, HttpAuthGateway};
pub use models::{Credentials, Session, User, UserId};
pub use observer::{NoopUserContext, UserContextObserver};
pub use permissions::{ADMIN_MARKERS, AdminAccess, derive_admin_access};
pub use storage::{ACCESS_TOKEN_KEY, LEGACY_TOKEN_KEY, MemoryTokenStorage, TokenStorage};
pub use store::SessionStore;
