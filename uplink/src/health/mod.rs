//! Backend-reachability monitoring.
//!
//! [`BackendHealthMonitor`] runs on its own timer, independent of the session
//! flow, and writes into a status container the UI reads reactively. The
//! state machine is `Unknown → Up | Down` with self-transitions on every
//! resolved probe; there is no terminal state while the monitor is active.

pub mod models;
pub mod monitor;

pub use models::{BackendStatus, HealthResponse};
pub use monitor::BackendHealthMonitor;
