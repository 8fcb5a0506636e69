//! Single-flight callsign lookup tool.

use async_trait::async_trait;
use serde_json::Value;
use skywarden_core::error::ToolError;
use skywarden_core::flight::FlightLookupResult;
use skywarden_core::source::SnapshotSource;
use skywarden_core::tool::{Tool, ToolResult};
use std::sync::Arc;

use crate::CALLSIGN_LOOKUP;

/// Looks up one flight by callsign in the latest snapshot.
///
/// A callsign with no match is a normal outcome, not a failure: the
/// result carries `flight: null` and a message saying so.
pub struct CallsignLookupTool {
    source: Arc<dyn SnapshotSource>,
}

impl CallsignLookupTool {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for CallsignLookupTool {
    fn name(&self) -> &str {
        CALLSIGN_LOOKUP
    }

    fn description(&self) -> &str {
        "Look up a single flight by callsign (e.g. 'PIA293') in the latest snapshot."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "callsign": {
                    "type": "string",
                    "description": "Flight callsign, e.g. 'PIA293'."
                },
                "region": {
                    "type": "string",
                    "description": "Region identifier, default 'region1'.",
                    "default": "region1"
                }
            },
            "required": ["callsign"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<ToolResult, ToolError> {
        let callsign =
            arguments["callsign"]
                .as_str()
                .ok_or_else(|| ToolError::MissingArgument {
                    tool_name: CALLSIGN_LOOKUP.into(),
                    argument: "callsign".into(),
                })?;
        let region = arguments["region"].as_str().unwrap_or("region1");

        let snapshot = self
            .source
            .fetch(region)
            .await
            .map_err(|e| ToolError::execution(CALLSIGN_LOOKUP, &e))?;

        let target = callsign.trim().to_uppercase();
        let found = snapshot
            .flights
            .iter()
            .find(|f| f.normalized_callsign().as_deref() == Some(target.as_str()))
            .cloned();

        let message = match &found {
            Some(_) => format!("Found flight {callsign} in {region}"),
            None => format!("No flight with callsign '{callsign}' found in {region}"),
        };

        let lookup = FlightLookupResult {
            region: snapshot.region,
            snapshot_time: snapshot.snapshot_time,
            fetched_at: snapshot.fetched_at,
            flight: found,
            message,
        };

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: serde_json::to_string_pretty(&lookup).unwrap_or_default(),
            data: serde_json::to_value(&lookup).ok(),
        })
    }
}
