//! Flight-domain value objects: snapshots, lookups, and alerts.
//!
//! These mirror the upstream snapshot wire format. Numeric flight fields
//! deserialize leniently — a missing or non-numeric value becomes `None`
//! so one malformed flight never sinks the whole snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One aircraft's instantaneous state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    /// ICAO 24-bit transponder address
    pub icao24: String,

    #[serde(default)]
    pub callsign: Option<String>,

    #[serde(default)]
    pub origin_country: String,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,

    /// Geometric altitude in meters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub geo_altitude: Option<f64>,

    /// Barometric altitude in meters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub baro_altitude: Option<f64>,

    /// Ground speed in m/s
    #[serde(default, deserialize_with = "lenient_f64")]
    pub velocity: Option<f64>,

    /// Climb (positive) or descent (negative) rate in m/s
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vertical_rate: Option<f64>,

    /// Track over ground in degrees
    #[serde(default, deserialize_with = "lenient_f64")]
    pub true_track: Option<f64>,

    #[serde(default)]
    pub on_ground: bool,
}

impl Flight {
    /// Callsign trimmed and uppercased, for case-insensitive matching.
    pub fn normalized_callsign(&self) -> Option<String> {
        self.callsign
            .as_deref()
            .map(|cs| cs.trim().to_uppercase())
            .filter(|cs| !cs.is_empty())
    }
}

/// Accept a number, or turn anything else (null, string, bool) into None.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// One region's flight population at a point in time.
///
/// Invariant (enforced by the accessor): `flight_count == flights.len()`
/// and `region` is non-empty. Never cached in this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Region identifier, e.g. "region1"
    pub region: String,

    /// Source timestamp (epoch seconds)
    pub snapshot_time: i64,

    /// When the external workflow fetched the data
    #[serde(rename = "fetched_at_iso")]
    pub fetched_at: DateTime<Utc>,

    /// Number of flights — must equal `flights.len()`
    pub flight_count: usize,

    #[serde(default)]
    pub flights: Vec<Flight>,
}

/// Projection returned by the callsign lookup tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightLookupResult {
    pub region: String,

    pub snapshot_time: i64,

    #[serde(rename = "fetched_at_iso")]
    pub fetched_at: DateTime<Utc>,

    /// The matched flight, absent when no callsign matched
    #[serde(default)]
    pub flight: Option<Flight>,

    /// Human-readable summary of the outcome
    pub message: String,
}

/// Why a flight was flagged. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReason {
    LowSpeedHighAltitude,
    HighVerticalRate,
}

/// How serious an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// One anomaly finding on one flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub flight: Flight,
    pub reason: AlertReason,
    pub severity: Severity,
}

/// All alerts for one snapshot, in input flight order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertResult {
    pub region: String,

    pub snapshot_time: i64,

    #[serde(rename = "fetched_at_iso")]
    pub fetched_at: DateTime<Utc>,

    pub alert_count: usize,

    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flight_parses_full_record() {
        let flight: Flight = serde_json::from_value(json!({
            "icao24": "ab1234",
            "callsign": "PIA293  ",
            "origin_country": "Pakistan",
            "latitude": 31.5,
            "longitude": 74.3,
            "geo_altitude": 9500.0,
            "baro_altitude": 9450.0,
            "velocity": 230.0,
            "vertical_rate": 0.5,
            "true_track": 88.0,
            "on_ground": false
        }))
        .unwrap();
        assert_eq!(flight.normalized_callsign().as_deref(), Some("PIA293"));
        assert_eq!(flight.geo_altitude, Some(9500.0));
    }

    #[test]
    fn lenient_fields_absorb_bad_values() {
        let flight: Flight = serde_json::from_value(json!({
            "icao24": "ab1234",
            "velocity": "not-a-number",
            "geo_altitude": null
        }))
        .unwrap();
        assert_eq!(flight.velocity, None);
        assert_eq!(flight.geo_altitude, None);
        assert!(!flight.on_ground);
    }

    #[test]
    fn empty_callsign_normalizes_to_none() {
        let flight: Flight = serde_json::from_value(json!({
            "icao24": "ab1234",
            "callsign": "   "
        }))
        .unwrap();
        assert_eq!(flight.normalized_callsign(), None);
    }

    #[test]
    fn snapshot_wire_roundtrip_uses_iso_field() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "region": "region1",
            "snapshot_time": 1754000000,
            "fetched_at_iso": "2026-08-07T10:15:00Z",
            "flight_count": 0,
            "flights": []
        }))
        .unwrap();
        assert_eq!(snapshot.region, "region1");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("fetched_at_iso").is_some());
        assert!(json.get("fetched_at").is_none());
    }

    #[test]
    fn alert_reason_serializes_snake_case() {
        let reason = serde_json::to_value(AlertReason::LowSpeedHighAltitude).unwrap();
        assert_eq!(reason, "low_speed_high_altitude");
        let severity = serde_json::to_value(Severity::High).unwrap();
        assert_eq!(severity, "high");
    }
}
