//! Two-agent coordination: fan out to traveler and ops, fuse with one
//! tool-free synthesis call.
//!
//! ```text
//! Passenger question
//!         │
//!         ▼
//!   ┌───────────┐
//!   │  Copilot  │
//!   └──┬─────┬──┘
//!      │     │
//!      ▼     ▼
//! ┌─────────┐ ┌─────────┐
//! │traveler │ │   ops   │   ← independent loops, no shared transcript
//! └────┬────┘ └────┬────┘
//!      └────┬──────┘
//!           ▼
//!    synthesis call (no tools)
//! ```

use crate::loop_runner::{ConversationLoop, DEFAULT_MAX_ROUNDS};
use crate::personas::{self, Persona};
use skywarden_core::error::AgentError;
use skywarden_core::message::Message;
use skywarden_core::provider::{Provider, ProviderRequest};
use skywarden_core::source::SnapshotSource;
use std::sync::Arc;
use tracing::{debug, info};

const SYNTHESIS_PROMPT: &str = "You are a coordinator between a traveler support agent and \
    an operations agent. You will see both of their messages and \
    must produce ONE clear answer for the passenger. \
    Reassure them when appropriate, but do not hide serious issues.";

/// The agent entry points exposed to the UI/caller.
pub struct Copilot {
    provider: Arc<dyn Provider>,
    source: Arc<dyn SnapshotSource>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_rounds: u32,
    region: String,
}

impl Copilot {
    pub fn new(
        provider: Arc<dyn Provider>,
        source: Arc<dyn SnapshotSource>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            source,
            model: model.into(),
            temperature: 0.2,
            max_tokens: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
            region: "region1".into(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max;
        self
    }

    /// Region the coordinator frames its prompts around.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    fn loop_for(&self, persona: &Persona) -> ConversationLoop {
        let tools = Arc::new(persona.registry(self.source.clone()));
        let mut looper = ConversationLoop::new(
            self.provider.clone(),
            &self.model,
            self.temperature,
            tools,
        )
        .with_max_rounds(self.max_rounds);
        if let Some(max) = self.max_tokens {
            looper = looper.with_max_tokens(max);
        }
        looper
    }

    /// Traveler-facing agent: questions about one specific flight.
    pub async fn traveler(&self, question: &str) -> Result<String, AgentError> {
        debug!(persona = personas::TRAVELER.name, "running agent");
        self.loop_for(&personas::TRAVELER)
            .run(personas::TRAVELER.system_prompt, question)
            .await
    }

    /// Operations agent: regional overview and anomaly scan.
    pub async fn ops(&self, question: &str) -> Result<String, AgentError> {
        debug!(persona = personas::OPS.name, "running agent");
        self.loop_for(&personas::OPS)
            .run(personas::OPS.system_prompt, question)
            .await
    }

    /// Coordinated answer for one passenger:
    ///
    /// 1. The traveler agent answers the passenger's question about their
    ///    specific flight.
    /// 2. The ops agent gives a regional situation report around that
    ///    flight.
    /// 3. One more model call — no tools — synthesizes both replies into
    ///    a single passenger-friendly answer.
    ///
    /// Either sub-agent failing aborts the whole call; partial results
    /// are never returned.
    pub async fn traveler_with_ops(
        &self,
        callsign: &str,
        question: &str,
    ) -> Result<String, AgentError> {
        let region = &self.region;

        let traveler_question = format!(
            "My flight {callsign} is in {region}. {question} \
             Please use tools to check this specific flight."
        );
        let traveler_reply = self.traveler(&traveler_question).await?;

        let ops_question = format!(
            "Consider flight {callsign} in {region}. \
             Give a short situation report focusing on nearby anomalies \
             and anything that could worry the passenger."
        );
        let ops_reply = self.ops(&ops_question).await?;

        info!(callsign, "synthesizing coordinated answer");
        self.synthesize(callsign, question, &traveler_reply, &ops_reply)
            .await
    }

    async fn synthesize(
        &self,
        callsign: &str,
        question: &str,
        traveler_reply: &str,
        ops_reply: &str,
    ) -> Result<String, AgentError> {
        let user = format!(
            "Passenger question: {question}\n\
             Flight: {callsign}\n\n\
             Traveler agent said:\n{traveler_reply}\n\n\
             Ops agent said:\n{ops_reply}\n\n\
             Now give a final answer for the passenger."
        );

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::system(SYNTHESIS_PROMPT), Message::user(user)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: vec![],
        };

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(AgentError::Model)?;
        Ok(response.message.content)
    }
}
