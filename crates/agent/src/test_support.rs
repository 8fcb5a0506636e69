//! Shared helpers for conversation and coordinator tests.

use async_trait::async_trait;
use chrono::Utc;
use skywarden_core::error::{DataError, ProviderError};
use skywarden_core::flight::{Flight, Snapshot};
use skywarden_core::message::{Message, MessageToolCall};
use skywarden_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use skywarden_core::source::SnapshotSource;
use skywarden_core::tool::ToolRegistry;
use std::sync::{Arc, Mutex};

/// A mock provider that returns a sequence of scripted responses and
/// records every request it receives.
///
/// Panics if more calls are made than responses provided.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The i-th request this provider received.
    pub fn request(&self, index: usize) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().get(index).cloned()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        let index = requests.len();
        if index >= responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{index}, have {})",
                responses.len()
            );
        }

        requests.push(request);
        Ok(responses[index].clone())
    }
}

/// A provider whose every call fails with the given error.
pub struct FailingProvider {
    error: ProviderError,
    calls: Mutex<usize>,
}

impl FailingProvider {
    pub fn new(error: ProviderError) -> Self {
        Self {
            error,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing_mock"
    }

    async fn complete(
        &self,
        _request: ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        Err(self.error.clone())
    }
}

/// Create a simple text response (no tool calls).
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Create a response requesting the given tool calls.
pub fn make_tool_call_response(
    tool_calls: Vec<MessageToolCall>,
    thought: &str,
) -> ProviderResponse {
    let mut msg = Message::assistant(thought);
    msg.tool_calls = tool_calls;
    ProviderResponse {
        message: msg,
        usage: None,
        model: "mock-model".into(),
    }
}

/// Helper to create one tool call.
pub fn make_tool_call(id: &str, name: &str, args: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments: args.to_string(),
    }
}

/// A source serving a fixed snapshot for "region1".
struct StubSource {
    snapshot: Snapshot,
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

/// One nominal flight (PIA293), no anomalies.
pub fn quiet_source() -> Arc<dyn SnapshotSource> {
    Arc::new(StubSource {
        snapshot: Snapshot {
            region: "region1".into(),
            snapshot_time: 1_754_000_000,
            fetched_at: Utc::now(),
            flight_count: 1,
            flights: vec![Flight {
                icao24: "ab1234".into(),
                callsign: Some("PIA293".into()),
                origin_country: "Pakistan".into(),
                latitude: Some(31.5),
                longitude: Some(74.3),
                geo_altitude: Some(10_000.0),
                baro_altitude: Some(9_950.0),
                velocity: Some(230.0),
                vertical_rate: Some(0.5),
                true_track: Some(88.0),
                on_ground: false,
            }],
        },
    })
}

/// A registry with no tools at all.
pub fn empty_registry() -> Arc<ToolRegistry> {
    Arc::new(ToolRegistry::new())
}

/// The traveler persona's registry over the quiet stub source.
pub fn traveler_registry() -> Arc<ToolRegistry> {
    Arc::new(skywarden_tools::registry(
        quiet_source(),
        &[skywarden_tools::CALLSIGN_LOOKUP],
    ))
}

/// The ops persona's registry over the quiet stub source.
pub fn ops_registry() -> Arc<ToolRegistry> {
    Arc::new(skywarden_tools::registry(
        quiet_source(),
        &[skywarden_tools::REGION_SNAPSHOT, skywarden_tools::ACTIVE_ALERTS],
    ))
}
