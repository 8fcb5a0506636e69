//! The tool-calling conversation loop.

use skywarden_core::error::AgentError;
use skywarden_core::message::{Conversation, Message};
use skywarden_core::provider::{Provider, ProviderRequest};
use skywarden_core::tool::{ToolCall, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default cap on tool-call rounds per conversation.
pub const DEFAULT_MAX_ROUNDS: u32 = 8;

/// Drives one transcript to a final answer.
///
/// The tool subset is fixed for the whole conversation, and the full
/// transcript — including every tool result — is resent on every round,
/// so the model never loses earlier tool outputs.
pub struct ConversationLoop {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    tools: Arc<ToolRegistry>,
    max_rounds: u32,
}

impl ConversationLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Set the maximum number of tool-call rounds.
    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max.max(1);
        self
    }

    /// Set the max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Seed a fresh transcript and drive it to completion.
    pub async fn run(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AgentError> {
        let mut conversation = Conversation::new();
        conversation.push(Message::system(system_prompt));
        conversation.push(Message::user(user_message));
        self.process(&mut conversation).await
    }

    /// Drive an existing transcript to completion.
    ///
    /// Returns the model's final text, or fails when the model itself is
    /// unreachable or the round cap is hit while the model still wants
    /// tools. Tool failures never abort the loop — they are relayed to
    /// the model as tool-result error payloads.
    pub async fn process(&self, conversation: &mut Conversation) -> Result<String, AgentError> {
        let tool_definitions = self.tools.definitions();

        for round in 1..=self.max_rounds {
            debug!(
                conversation_id = %conversation.id,
                round,
                messages = conversation.messages.len(),
                "awaiting model"
            );

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: conversation.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = self
                .provider
                .complete(request)
                .await
                .map_err(AgentError::Model)?;

            if response.message.tool_calls.is_empty() {
                // No tool calls — this is the final answer.
                let answer = response.message.content.clone();
                conversation.push(response.message);
                return Ok(answer);
            }

            let tool_calls = response.message.tool_calls.clone();
            conversation.push(response.message);

            debug!(count = tool_calls.len(), "executing tool calls");

            for tc in &tool_calls {
                let call = ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
                };

                match self.tools.execute(&call).await {
                    Ok(result) => {
                        conversation.push(Message::tool_result(&tc.id, &result.output));
                    }
                    Err(e) => {
                        warn!(tool = %tc.name, error = %e, "tool execution failed");
                        conversation.push(Message::tool_result(&tc.id, format!("Error: {e}")));
                    }
                }
            }
        }

        warn!(
            conversation_id = %conversation.id,
            max_rounds = self.max_rounds,
            "round limit exceeded"
        );
        Err(AgentError::RoundLimitExceeded {
            max_rounds: self.max_rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use skywarden_core::error::ProviderError;
    use skywarden_core::message::Role;

    #[tokio::test]
    async fn text_response_finishes_in_one_round() {
        let provider = Arc::new(SequentialMockProvider::new(vec![make_text_response(
            "All flights nominal.",
        )]));
        let looper = ConversationLoop::new(provider, "mock-model", 0.2, empty_registry());

        let answer = looper.run("You are an ops agent", "Status?").await.unwrap();
        assert_eq!(answer, "All flights nominal.");
    }

    #[tokio::test]
    async fn tool_call_round_trips_one_correlated_result() {
        let provider = Arc::new(SequentialMockProvider::new(vec![
            make_tool_call_response(
                vec![make_tool_call(
                    "call_1",
                    skywarden_tools::CALLSIGN_LOOKUP,
                    serde_json::json!({"callsign": "PIA293"}),
                )],
                "",
            ),
            make_text_response("Your flight is over Lahore."),
        ]));
        let looper =
            ConversationLoop::new(provider, "mock-model", 0.2, traveler_registry());

        let mut conversation = Conversation::new();
        conversation.push(Message::system("You are a traveler support assistant"));
        conversation.push(Message::user("Where is PIA293?"));

        let answer = looper.process(&mut conversation).await.unwrap();
        assert_eq!(answer, "Your flight is over Lahore.");

        // system, user, assistant w/ tool call, tool result, final answer
        assert_eq!(conversation.messages.len(), 5);
        let tool_messages: Vec<_> = conversation
            .messages
            .iter()
            .filter(|m| m.role == Role::Tool)
            .collect();
        assert_eq!(tool_messages.len(), 1);
        assert_eq!(tool_messages[0].tool_call_id.as_deref(), Some("call_1"));
        assert!(tool_messages[0].content.contains("PIA293"));
    }

    #[tokio::test]
    async fn tool_failure_is_relayed_not_fatal() {
        let provider = Arc::new(SequentialMockProvider::new(vec![
            make_tool_call_response(
                vec![make_tool_call(
                    "call_1",
                    "nonexistent_tool",
                    serde_json::json!({}),
                )],
                "",
            ),
            make_text_response("I could not look that up."),
        ]));
        let looper = ConversationLoop::new(provider, "mock-model", 0.2, empty_registry());

        let mut conversation = Conversation::new();
        conversation.push(Message::system("sys"));
        conversation.push(Message::user("hi"));

        let answer = looper.process(&mut conversation).await.unwrap();
        assert_eq!(answer, "I could not look that up.");

        let error_msg = conversation
            .messages
            .iter()
            .find(|m| m.role == Role::Tool)
            .unwrap();
        assert!(error_msg.content.starts_with("Error:"));
        assert!(error_msg.content.contains("nonexistent_tool"));
    }

    #[tokio::test]
    async fn perpetual_tool_calls_hit_round_limit() {
        let tool_round = || {
            make_tool_call_response(
                vec![make_tool_call(
                    "call_n",
                    skywarden_tools::ACTIVE_ALERTS,
                    serde_json::json!({}),
                )],
                "",
            )
        };
        let provider = Arc::new(SequentialMockProvider::new(vec![
            tool_round(),
            tool_round(),
            tool_round(),
        ]));
        let looper = ConversationLoop::new(provider, "mock-model", 0.2, ops_registry())
            .with_max_rounds(3);

        let err = looper.run("sys", "scan forever").await.unwrap_err();
        assert!(matches!(err, AgentError::RoundLimitExceeded { max_rounds: 3 }));
    }

    #[tokio::test]
    async fn provider_failure_is_fatal() {
        let provider = Arc::new(FailingProvider::new(ProviderError::Network(
            "connection refused".into(),
        )));
        let looper = ConversationLoop::new(provider, "mock-model", 0.2, empty_registry());

        let err = looper.run("sys", "hello").await.unwrap_err();
        assert!(matches!(err, AgentError::Model(ProviderError::Network(_))));
    }
}
