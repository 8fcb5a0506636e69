//! Flight-data tool implementations.
//!
//! Three read-only tools back the copilot's reasoning: a full region
//! snapshot, a single-flight callsign lookup, and the active-alert scan.
//! Each persona gets a registry holding only its allowed subset, so the
//! model never sees a tool it cannot call.

pub mod active_alerts;
pub mod callsign_lookup;
pub mod snapshot_list;

pub use active_alerts::ActiveAlertsTool;
pub use callsign_lookup::CallsignLookupTool;
pub use snapshot_list::RegionSnapshotTool;

use skywarden_core::source::SnapshotSource;
use skywarden_core::tool::ToolRegistry;
use std::sync::Arc;
use tracing::warn;

/// Tool names, as the model sees them.
pub const REGION_SNAPSHOT: &str = "flights_list_region_snapshot";
pub const CALLSIGN_LOOKUP: &str = "flights_get_by_callsign";
pub const ACTIVE_ALERTS: &str = "alerts_list_active";

/// Build a registry restricted to the named tools, in the given order.
pub fn registry(source: Arc<dyn SnapshotSource>, names: &[&str]) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for name in names {
        match *name {
            REGION_SNAPSHOT => {
                registry.register(Box::new(RegionSnapshotTool::new(source.clone())));
            }
            CALLSIGN_LOOKUP => {
                registry.register(Box::new(CallsignLookupTool::new(source.clone())));
            }
            ACTIVE_ALERTS => {
                registry.register(Box::new(ActiveAlertsTool::new(source.clone())));
            }
            other => warn!(tool = other, "ignoring unknown tool name"),
        }
    }
    registry
}

/// Build a registry with every flight tool.
pub fn default_registry(source: Arc<dyn SnapshotSource>) -> ToolRegistry {
    registry(source, &[REGION_SNAPSHOT, CALLSIGN_LOOKUP, ACTIVE_ALERTS])
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use async_trait::async_trait;
    use chrono::Utc;
    use skywarden_core::error::DataError;
    use skywarden_core::flight::{Flight, Snapshot};
    use skywarden_core::source::SnapshotSource;

    /// A source that serves one canned snapshot for "region1" and the
    /// real UnknownRegion error for anything else.
    pub struct StubSource {
        pub snapshot: Snapshot,
    }

    #[async_trait]
    impl SnapshotSource for StubSource {
        async fn fetch(&self, region: &str) -> Result<Snapshot, DataError> {
            if region == self.snapshot.region {
                Ok(self.snapshot.clone())
            } else {
                Err(DataError::UnknownRegion {
                    region: region.to_string(),
                    known: self.snapshot.region.clone(),
                })
            }
        }
    }

    pub fn flight(icao24: &str, callsign: &str) -> Flight {
        Flight {
            icao24: icao24.into(),
            callsign: Some(callsign.into()),
            origin_country: "Pakistan".into(),
            latitude: Some(31.5),
            longitude: Some(74.3),
            geo_altitude: Some(10_000.0),
            baro_altitude: Some(9_950.0),
            velocity: Some(230.0),
            vertical_rate: Some(0.5),
            true_track: Some(88.0),
            on_ground: false,
        }
    }

    pub fn stub_source(flights: Vec<Flight>) -> StubSource {
        StubSource {
            snapshot: Snapshot {
                region: "region1".into(),
                snapshot_time: 1_754_000_000,
                fetched_at: Utc::now(),
                flight_count: flights.len(),
                flights,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{flight, stub_source};
    use skywarden_core::error::ToolError;
    use skywarden_core::tool::ToolCall;

    fn call(name: &str, arguments: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments,
        }
    }

    #[test]
    fn default_registry_declares_all_three_tools() {
        let source = Arc::new(stub_source(vec![flight("ab1234", "PIA293")]));
        let registry = default_registry(source);
        assert_eq!(
            registry.names(),
            vec![REGION_SNAPSHOT, CALLSIGN_LOOKUP, ACTIVE_ALERTS]
        );
    }

    #[test]
    fn subset_registry_holds_only_named_tools() {
        let source = Arc::new(stub_source(vec![]));
        let registry = registry(source, &[CALLSIGN_LOOKUP]);
        assert_eq!(registry.names(), vec![CALLSIGN_LOOKUP]);
        assert!(registry.get(ACTIVE_ALERTS).is_none());
    }

    #[tokio::test]
    async fn dispatcher_rejects_unknown_tool() {
        let registry = default_registry(Arc::new(stub_source(vec![])));
        let err = registry
            .execute(&call("nonexistent_tool", serde_json::json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "nonexistent_tool"));
    }

    #[tokio::test]
    async fn dispatcher_requires_callsign() {
        let registry = default_registry(Arc::new(stub_source(vec![])));
        let err = registry
            .execute(&call(CALLSIGN_LOOKUP, serde_json::json!({})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::MissingArgument { argument, .. } if argument == "callsign"
        ));
    }

    #[tokio::test]
    async fn dispatcher_defaults_region() {
        let registry = default_registry(Arc::new(stub_source(vec![flight("ab1234", "PIA293")])));
        let result = registry
            .execute(&call(ACTIVE_ALERTS, serde_json::json!({})))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.call_id, "call_1");
        assert_eq!(result.data.unwrap()["region"], "region1");
    }
}
