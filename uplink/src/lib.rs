//! # uplink: client session & connectivity core
//!
//! `uplink` is the state-carrying core of an API client frontend: it tracks
//! whether a user is authenticated, derives administrative capability from
//! role data, monitors whether the backing API is reachable, and protects an
//! in-memory password value from casual inspection. The surrounding
//! application (rendering, routing, i18n, telemetry sinks) consumes it
//! through snapshots and narrow trait interfaces.
//!
//! ## Overview
//!
//! The crate has three independent pieces:
//!
//! - the **session layer** ([`session`]): [`session::SessionStore`] owns the
//!   authoritative [`session::Session`] value and applies reducer-style
//!   transitions as login/refresh/logout calls against an injected
//!   [`session::AuthGateway`] resolve. Administrative capability is derived
//!   from the role list on every successful session fetch
//!   ([`session::derive_admin_access`]), persisted tokens are cleared through
//!   the [`session::TokenStorage`] boundary on logout and login failure, and
//!   a [`session::UserContextObserver`] is notified whenever session
//!   resolution completes.
//!
//! - the **health monitor** ([`health`]):
//!   [`health::BackendHealthMonitor`] probes the backend health endpoint
//!   immediately on activation and then on a fixed interval, each probe
//!   bounded by a timeout that aborts the in-flight request. It publishes
//!   [`health::BackendStatus`] snapshots and participates in nothing else.
//!
//! - the **secret vault** ([`vault`]): [`vault::SecureSecretVault`] holds a
//!   password in a reversible obfuscated encoding so no state dump shows the
//!   clear text, while forms can still recover it for submission.
//!
//! ## Concurrency model
//!
//! Everything runs on one logical thread under cooperative scheduling. Store
//! transitions are synchronous read-modify-writes and therefore atomic
//! between suspension points; the only suspension points are the gateway
//! calls and the health probe. Readers take cloned snapshots, never locks.

pub mod config;
pub mod errors;
pub mod health;
pub mod session;
pub mod telemetry;
pub mod vault;

pub use config::{Args, Config};
pub use errors::{Error, Result};
pub use health::{BackendHealthMonitor, BackendStatus};
pub use session::{Session, SessionStore};
pub use vault::SecureSecretVault;
