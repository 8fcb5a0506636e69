//! Active-alert scan tool.

use async_trait::async_trait;
use serde_json::Value;
use skywarden_core::error::ToolError;
use skywarden_core::source::SnapshotSource;
use skywarden_core::tool::{Tool, ToolResult};
use std::sync::Arc;

use crate::ACTIVE_ALERTS;

/// Runs the anomaly rules over a region's current snapshot.
pub struct ActiveAlertsTool {
    source: Arc<dyn SnapshotSource>,
}

impl ActiveAlertsTool {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for ActiveAlertsTool {
    fn name(&self) -> &str {
        ACTIVE_ALERTS
    }

    fn description(&self) -> &str {
        "List flights in a region that look anomalous (low speed at cruise altitude, very high climb/descent rate)."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "region": {
                    "type": "string",
                    "description": "Region identifier, default 'region1'.",
                    "default": "region1"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, arguments: Value) -> Result<ToolResult, ToolError> {
        let region = arguments["region"].as_str().unwrap_or("region1");

        let snapshot = self
            .source
            .fetch(region)
            .await
            .map_err(|e| ToolError::execution(ACTIVE_ALERTS, &e))?;

        let result = skywarden_rules::detect_region(&snapshot);

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: serde_json::to_string_pretty(&result).unwrap_or_default(),
            data: serde_json::to_value(&result).ok(),
        })
    }
}
