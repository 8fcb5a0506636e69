//! Error types for the Skywarden domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Skywarden operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Data layer ---
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    // --- Tool dispatch ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Model provider ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Conversation layer ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised by the snapshot accessor.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    #[error("unknown region '{region}'. Known regions: {known}")]
    UnknownRegion { region: String, known: String },

    #[error("snapshot upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Failures raised by the tool dispatcher or a tool implementation.
///
/// These never abort a conversation — the loop relays them to the model
/// as tool-result error payloads.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("missing required argument '{argument}' for tool '{tool_name}'")]
    MissingArgument { tool_name: String, argument: String },

    #[error("tool '{tool_name}' failed: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

impl ToolError {
    /// Wrap a data-layer failure as a tool execution failure.
    pub fn execution(tool_name: impl Into<String>, err: &DataError) -> Self {
        Self::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: err.to_string(),
        }
    }
}

/// Failures raised while talking to the reasoning model.
///
/// Unlike tool errors these are fatal to the conversation that hit them.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("no API key configured: {0}")]
    CredentialMissing(String),

    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Conversation-layer failures, surfaced to the agent's caller.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model call failed: {0}")]
    Model(#[from] ProviderError),

    #[error("tool-call round limit of {max_rounds} exceeded")]
    RoundLimitExceeded { max_rounds: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_lists_known_regions() {
        let err = Error::Data(DataError::UnknownRegion {
            region: "atlantis".into(),
            known: "region1".into(),
        });
        assert!(err.to_string().contains("atlantis"));
        assert!(err.to_string().contains("region1"));
    }

    #[test]
    fn missing_argument_names_tool_and_argument() {
        let err = ToolError::MissingArgument {
            tool_name: "flights_get_by_callsign".into(),
            argument: "callsign".into(),
        };
        assert!(err.to_string().contains("flights_get_by_callsign"));
        assert!(err.to_string().contains("callsign"));
    }

    #[test]
    fn round_limit_displays_cap() {
        let err = AgentError::RoundLimitExceeded { max_rounds: 8 };
        assert!(err.to_string().contains('8'));
    }
}
