//! Timer-driven publish loop.
//!
//! The loop alternates between two states: idle, waiting on the interval
//! ticker, and publishing, iterating the active device set. One pass over all
//! devices is a tick. Per-device failures are logged and never stop the rest
//! of the tick or future ticks; the loop itself does not retry.
//!
//! Cancellation is tied to a [`CancellationToken`] rather than a raw sleep so
//! an interrupt is observed both between ticks and between individual device
//! sends, and so tests can drive the loop without real time delays.

use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::reading::Reading;
use crate::registry::{ActiveDevice, FleetRegistry, PublishError, TelemetrySink};

/// Drives periodic telemetry for the whole active fleet.
pub struct FleetPublisher<S> {
    registry: FleetRegistry<S>,
    interval: Duration,
}

impl<S: TelemetrySink> FleetPublisher<S> {
    pub fn new(registry: FleetRegistry<S>, interval: Duration) -> Self {
        Self { registry, interval }
    }

    /// Runs until `cancel` fires, then hands the registry back so the caller
    /// can release the handles.
    ///
    /// The first tick fires immediately; subsequent ticks follow the
    /// configured interval.
    pub async fn run(self, cancel: CancellationToken) -> FleetRegistry<S> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Starting telemetry loop: {} device(s), every {}s",
            self.registry.len(),
            self.interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Telemetry loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.publish_tick(&cancel).await;
                }
            }
        }

        self.registry
    }

    /// One pass over the active set. Checks for cancellation between device
    /// sends so shutdown latency stays bounded by a single publish.
    async fn publish_tick(&self, cancel: &CancellationToken) {
        for device in self.registry.devices() {
            if cancel.is_cancelled() {
                debug!("Cancellation observed mid-tick, abandoning remaining sends");
                return;
            }
            if let Err(e) = publish_one(device).await {
                error!(
                    "Failed to send message from device '{}': {}",
                    device.record.device_id, e
                );
            }
        }
    }
}

/// Generates, serializes and submits one reading for one device.
async fn publish_one<S: TelemetrySink>(device: &ActiveDevice<S>) -> Result<(), PublishError> {
    let reading = Reading::generate(&device.record.location_name);
    let payload = serde_json::to_vec(&reading)?;
    let topic = format!("telemetry/{}", device.record.device_id);

    device.sink.publish(&topic, payload).await?;

    info!(
        "Sent reading for '{}' ({}): ice {} cm, surface {} C, snow {} cm, external {} C at {}",
        device.record.device_id,
        device.record.location_name,
        reading.ice_thickness_cm,
        reading.surface_temp_c,
        reading.snow_accumulation_cm,
        reading.external_temp_c,
        reading.timestamp.to_rfc3339(),
    );
    Ok(())
}
