//! Full-region snapshot tool.

use async_trait::async_trait;
use serde_json::Value;
use skywarden_core::error::ToolError;
use skywarden_core::source::SnapshotSource;
use skywarden_core::tool::{Tool, ToolResult};
use std::sync::Arc;

use crate::REGION_SNAPSHOT;

/// Returns the latest snapshot of all flights in a region.
pub struct RegionSnapshotTool {
    source: Arc<dyn SnapshotSource>,
}

impl RegionSnapshotTool {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for RegionSnapshotTool {
    fn name(&self) -> &str {
        REGION_SNAPSHOT
    }

    fn description(&self) -> &str {
        "Get the latest cached snapshot of all flights for a region."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "region": {
                    "type": "string",
                    "description": "Region identifier, e.g. 'region1'.",
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
            .map_err(|e| ToolError::execution(REGION_SNAPSHOT, &e))?;

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: serde_json::to_string_pretty(&snapshot).unwrap_or_default(),
            data: serde_json::to_value(&snapshot).ok(),
        })
    }
}
