//! Reasoning-model providers for Skywarden.
//!
//! All providers implement the `skywarden_core::Provider` trait. The
//! process-wide default client is created lazily so a missing credential
//! fails the agent call that needed it, never process startup.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use skywarden_core::error::ProviderError;
use skywarden_core::provider::Provider;
use std::sync::{Arc, OnceLock};

/// Environment variables consulted for the API key, in priority order.
const KEY_VARS: [&str; 2] = ["GROQ_API_KEY", "SKYWARDEN_API_KEY"];

static DEFAULT_PROVIDER: OnceLock<Arc<OpenAiCompatProvider>> = OnceLock::new();

/// The process-wide default provider (Groq-hosted models), created on
/// first use and reused for the life of the process.
pub fn default_provider() -> Result<Arc<dyn Provider>, ProviderError> {
    if let Some(provider) = DEFAULT_PROVIDER.get() {
        return Ok(provider.clone());
    }

    let api_key = api_key_from_env().ok_or_else(|| {
        ProviderError::CredentialMissing(format!(
            "set {} to enable agent calls",
            KEY_VARS.join(" or ")
        ))
    })?;

    let provider = DEFAULT_PROVIDER
        .get_or_init(|| Arc::new(OpenAiCompatProvider::groq(api_key)))
        .clone();
    Ok(provider)
}

fn api_key_from_env() -> Option<String> {
    KEY_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|key| !key.is_empty()))
}
