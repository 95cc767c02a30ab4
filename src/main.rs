use color_eyre::{eyre::eyre, Result};
use icewatch::config::SimulatorConfig;
use icewatch::publisher::FleetPublisher;
use icewatch::registry::FleetRegistry;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    let config = SimulatorConfig::load(&path)
        .map_err(|e| eyre!("Could not load configuration from '{}': {}", path, e))?;
    info!(
        "Configuration loaded: {} device(s), sending every {}s",
        config.devices.len(),
        config.send_interval_seconds
    );

    let registry = FleetRegistry::connect_all(&config.devices);
    if registry.is_empty() {
        error!("No publish handle could be established for any device, nothing to do");
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, shutting down");
                signal_token.cancel();
            }
            Err(e) => error!("Failed to listen for interrupt signal: {}", e),
        }
    });

    let publisher = FleetPublisher::new(registry, config.send_interval());
    let registry = publisher.run(cancel).await;

    info!("Closing telemetry clients");
    registry.close_all().await;
    info!("All clients closed");

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();
}
