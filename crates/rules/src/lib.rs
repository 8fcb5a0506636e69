//! Anomaly-detection rule engine.
//!
//! Pure threshold rules over one snapshot — no I/O, no state, no
//! failure mode. A flight with a missing or unreadable field is simply
//! excluded from the rule that needed it.

use skywarden_core::flight::{Alert, AlertReason, AlertResult, Severity, Snapshot};

/// Altitude above which the low-speed rule applies (meters).
pub const CRUISE_ALTITUDE_M: f64 = 8000.0;

/// Ground speed below which a cruising aircraft looks suspicious (m/s).
pub const SLOW_SPEED_MS: f64 = 100.0;

/// Climb or descent rate beyond which a flight is flagged (m/s).
pub const VERTICAL_RATE_LIMIT_MS: f64 = 20.0;

/// Evaluate every rule against every flight in the snapshot.
///
/// Output preserves input flight order; a flight matching both rules
/// yields the low-speed alert first. Never fails — an empty flight list
/// produces an empty alert list.
pub fn detect(snapshot: &Snapshot) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for flight in &snapshot.flights {
        // Unusually low speed at cruise altitude. Needs both readings
        // and an airborne aircraft.
        if let (Some(altitude), Some(velocity)) = (flight.geo_altitude, flight.velocity) {
            if altitude > CRUISE_ALTITUDE_M && velocity < SLOW_SPEED_MS && !flight.on_ground {
                alerts.push(Alert {
                    flight: flight.clone(),
                    reason: AlertReason::LowSpeedHighAltitude,
                    severity: Severity::Medium,
                });
            }
        }

        // Extreme climb or descent rate, independent of altitude and speed.
        if let Some(rate) = flight.vertical_rate {
            if rate > VERTICAL_RATE_LIMIT_MS || rate < -VERTICAL_RATE_LIMIT_MS {
                alerts.push(Alert {
                    flight: flight.clone(),
                    reason: AlertReason::HighVerticalRate,
                    severity: Severity::High,
                });
            }
        }
    }

    alerts
}

/// Run detection and stitch the full per-region result.
pub fn detect_region(snapshot: &Snapshot) -> AlertResult {
    let alerts = detect(snapshot);
    AlertResult {
        region: snapshot.region.clone(),
        snapshot_time: snapshot.snapshot_time,
        fetched_at: snapshot.fetched_at,
        alert_count: alerts.len(),
        alerts,
    }
}
