//! Synthetic sensor readings.
//!
//! Each tick produces one [`Reading`] per device, sampled independently and
//! uniformly from fixed closed intervals. There is no smoothing or continuity
//! between ticks; a reading has no identity beyond its timestamp.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Ice thickness in centimetres.
pub const ICE_THICKNESS_CM: RangeInclusive<f64> = 5.0..=45.0;
/// Ice surface temperature in degrees Celsius.
pub const SURFACE_TEMP_C: RangeInclusive<f64> = -20.0..=2.0;
/// Snow accumulation on top of the ice, in centimetres.
pub const SNOW_ACCUMULATION_CM: RangeInclusive<f64> = 0.0..=10.0;
/// Ambient air temperature in degrees Celsius.
pub const EXTERNAL_TEMP_C: RangeInclusive<f64> = -25.0..=5.0;

/// One synthetic sensor sample for one location at one instant.
///
/// Serializes to the wire shape expected by the ingestion endpoint:
///
/// ```json
/// {
///   "location": "Dow's Lake",
///   "timestamp": "2026-01-17T14:03:07.412331Z",
///   "iceThicknessCm": 31.4,
///   "surfaceTempC": -12.7,
///   "snowAccumulationCm": 3.2,
///   "externalTempC": -18.9
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub location: String,
    /// Sampling instant, ISO-8601 with UTC designator.
    pub timestamp: DateTime<Utc>,
    pub ice_thickness_cm: f64,
    pub surface_temp_c: f64,
    pub snow_accumulation_cm: f64,
    pub external_temp_c: f64,
}

impl Reading {
    /// Samples a fresh reading for `location`, timestamped now.
    ///
    /// All values are rounded to one decimal digit.
    pub fn generate(location: &str) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            location: location.to_string(),
            timestamp: Utc::now(),
            ice_thickness_cm: round1(rng.gen_range(ICE_THICKNESS_CM)),
            surface_temp_c: round1(rng.gen_range(SURFACE_TEMP_C)),
            snow_accumulation_cm: round1(rng.gen_range(SNOW_ACCUMULATION_CM)),
            external_temp_c: round1(rng.gen_range(EXTERNAL_TEMP_C)),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_one_decimal(value: f64) {
        let scaled = value * 10.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-6,
            "{value} has more than one decimal digit"
        );
    }

    #[test]
    fn fields_stay_within_documented_ranges() {
        for _ in 0..500 {
            let reading = Reading::generate("test-lake");
            assert!(ICE_THICKNESS_CM.contains(&reading.ice_thickness_cm));
            assert!(SURFACE_TEMP_C.contains(&reading.surface_temp_c));
            assert!(SNOW_ACCUMULATION_CM.contains(&reading.snow_accumulation_cm));
            assert!(EXTERNAL_TEMP_C.contains(&reading.external_temp_c));
        }
    }

    #[test]
    fn fields_are_rounded_to_one_decimal() {
        for _ in 0..100 {
            let reading = Reading::generate("test-lake");
            assert_one_decimal(reading.ice_thickness_cm);
            assert_one_decimal(reading.surface_temp_c);
            assert_one_decimal(reading.snow_accumulation_cm);
            assert_one_decimal(reading.external_temp_c);
        }
    }

    #[test]
    fn timestamp_serializes_as_iso8601_utc() {
        let reading = Reading::generate("test-lake");
        let json: serde_json::Value = serde_json::to_value(&reading).unwrap();
        let raw = json["timestamp"].as_str().unwrap();
        assert!(raw.ends_with('Z'), "timestamp lacks UTC designator: {raw}");
        let parsed = DateTime::parse_from_rfc3339(raw).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), reading.timestamp);
    }

    #[test]
    fn wire_shape_uses_camel_case_keys() {
        let reading = Reading::generate("Dow's Lake");
        let json: serde_json::Value = serde_json::to_value(&reading).unwrap();
        for key in [
            "location",
            "timestamp",
            "iceThicknessCm",
            "surfaceTempC",
            "snowAccumulationCm",
            "externalTempC",
        ] {
            assert!(json.get(key).is_some(), "missing key '{key}'");
        }
    }

    #[test]
    fn round_trips_through_json() {
        let reading = Reading::generate("test-lake");
        let encoded = serde_json::to_string(&reading).unwrap();
        let decoded: Reading = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, reading);
    }
}
