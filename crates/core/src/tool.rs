//! Tool trait, registry, and dispatcher.
//!
//! Tools are the read-only operations the reasoning model may request on
//! its behalf. The registry is built once at startup and is read-only
//! afterwards; the dispatcher validates arguments against each tool's
//! declared schema before invoking the bound implementation.

use crate::error::ToolError;
use crate::provider::ToolDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to execute a tool, with arguments already parsed to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the model's tool_call id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value, not yet validated
    pub arguments: Value,
}

/// The result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call ID this result is for
    pub call_id: String,

    /// Whether the tool executed successfully
    pub success: bool,

    /// The output content, rendered for the model
    pub output: String,

    /// Optional structured data backing the output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// The core Tool trait.
///
/// Each flight tool implements this trait and is registered in the
/// ToolRegistry serving the conversation loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g. "alerts_list_active").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool. Arguments have already been validated and
    /// defaulted by the dispatcher.
    async fn execute(&self, arguments: Value) -> std::result::Result<ToolResult, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the model.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A closed, insertion-ordered set of tools.
///
/// The conversation loop uses this to:
/// 1. Get tool definitions to send to the model
/// 2. Dispatch tool calls the model requests
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// All tool definitions, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Dispatch a tool call.
    ///
    /// Fails with `UnknownTool` for an unregistered name and
    /// `MissingArgument` when a required argument is absent after defaults
    /// are filled. Implementation failures come back as the
    /// implementation's own `ToolError`.
    pub async fn execute(&self, call: &ToolCall) -> std::result::Result<ToolResult, ToolError> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;

        let arguments =
            resolve_arguments(tool.name(), &tool.parameters_schema(), call.arguments.clone())?;

        let mut result = tool.execute(arguments).await?;
        result.call_id = call.id.clone();
        Ok(result)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize raw call arguments against a tool's declared schema:
/// fill absent optional properties from declared defaults, then reject
/// the call if any `required` property is still missing.
fn resolve_arguments(
    tool_name: &str,
    schema: &Value,
    arguments: Value,
) -> std::result::Result<Value, ToolError> {
    let mut args = match arguments {
        Value::Object(map) => map,
        // A null or non-object payload is treated as "no arguments given";
        // the required check below decides whether that is acceptable.
        _ => serde_json::Map::new(),
    };

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (key, prop) in properties {
            if !args.contains_key(key) {
                if let Some(default) = prop.get("default") {
                    args.insert(key.clone(), default.clone());
                }
            }
        }
    }

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !args.contains_key(key) {
                return Err(ToolError::MissingArgument {
                    tool_name: tool_name.to_string(),
                    argument: key.to_string(),
                });
            }
        }
    }

    Ok(Value::Object(args))
}
