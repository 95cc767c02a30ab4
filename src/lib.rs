//! # Icewatch - Environmental Sensor Fleet Simulator
//!
//! Simulates a small fleet of ice-monitoring sensors (ice thickness, surface
//! and external temperature, snow accumulation) and periodically publishes
//! synthetic readings to a telemetry ingestion endpoint over MQTT.
//!
//! ## Architecture
//!
//! ```text
//! config.rs    - device records + send interval from a JSON document
//! registry.rs  - one publishing handle per device (rumqttc session)
//! reading.rs   - uniform random sampling of one reading per tick
//! publisher.rs - interval-driven publish loop with graceful shutdown
//! ```
//!
//! Data flows one way: configuration builds the registry, the publish loop
//! ticks over the registry generating and submitting readings, and an
//! interrupt signal cancels the loop and releases every handle best-effort.
//! Devices are independent; a failure on one never affects the others.

pub mod config;
pub mod publisher;
pub mod reading;
pub mod registry;
