//! Tracing initialization.
//!
//! Sets up tracing-subscriber with console output and an `EnvFilter` read
//! from `RUST_LOG` (default `info`). Components log through the `tracing`
//! macros: lifecycle at info, absorbed failures at warn, per-probe detail at
//! debug.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global tracing subscriber.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!("Telemetry initialized");
    Ok(())
}
