//! Subcommand implementations.

pub mod alerts;
pub mod copilot;
pub mod doctor;
pub mod ops;
pub mod traveler;

use skywarden_agent::Copilot;
use skywarden_config::Settings;
use skywarden_core::provider::Provider;
use skywarden_core::source::SnapshotSource;
use skywarden_data::{RegionRoutes, SnapshotClient};
use skywarden_providers::OpenAiCompatProvider;
use std::sync::Arc;

/// Build the snapshot client from the configured region routes.
pub(crate) fn build_client(settings: &Settings) -> SnapshotClient {
    SnapshotClient::new(RegionRoutes::new(settings.regions.clone()))
}

/// Assemble the copilot from settings.
///
/// A key in the config file wins; otherwise the lazy process-wide
/// provider is used, which fails with a clear credential error only when
/// an agent call is actually attempted.
pub(crate) fn build_copilot(
    settings: &Settings,
) -> Result<Copilot, Box<dyn std::error::Error>> {
    let provider: Arc<dyn Provider> = match &settings.api_key {
        Some(key) => Arc::new(OpenAiCompatProvider::groq(key.clone())),
        None => skywarden_providers::default_provider()?,
    };
    let source: Arc<dyn SnapshotSource> = Arc::new(build_client(settings));

    Ok(Copilot::new(provider, source, &settings.model)
        .with_temperature(settings.temperature)
        .with_max_tokens(settings.max_tokens)
        .with_max_rounds(settings.max_rounds))
}
