use clap::Parser;
use uplink::health::BackendHealthMonitor;
use uplink::{Config, telemetry};

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Diagnostic entry point: validate the configuration, then watch the
/// backend's health endpoint and log status transitions until interrupted.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = uplink::config::Args::parse();

    // Load configuration
    let config = Config::load(&args)?;

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;
    tracing::debug!("{:?}", args);

    let client = reqwest::Client::builder().timeout(config.request_timeout).build()?;
    let monitor = BackendHealthMonitor::start(
        client,
        config.health_endpoint(),
        config.health.interval,
        config.health.timeout,
    );

    shutdown_signal().await;
    monitor.stop();
    Ok(())
}
