//! Agent personas — fixed pairings of system prompt and tool subset.

use skywarden_core::source::SnapshotSource;
use skywarden_core::tool::ToolRegistry;
use std::sync::Arc;

/// A named persona: one system prompt, one allowed tool subset.
///
/// Invoking a persona runs exactly one conversation loop to completion.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub allowed_tools: &'static [&'static str],
}

impl Persona {
    /// Build this persona's tool registry. The model only ever sees the
    /// allowed subset, so tool access cannot cross personas.
    pub fn registry(&self, source: Arc<dyn SnapshotSource>) -> ToolRegistry {
        skywarden_tools::registry(source, self.allowed_tools)
    }
}

/// Traveler-facing persona: questions about one specific flight.
pub const TRAVELER: Persona = Persona {
    name: "traveler",
    system_prompt: "You are a traveler support assistant. \
        Help passengers understand where their flight is, \
        its altitude, speed, and whether anything looks unusual. \
        Use the flights_get_by_callsign tool when needed.",
    allowed_tools: &[skywarden_tools::CALLSIGN_LOOKUP],
};

/// Operations persona: oversees a whole region.
pub const OPS: Persona = Persona {
    name: "ops",
    system_prompt: "You are an airline operations specialist monitoring airspace safety. \
        Use flights_list_region_snapshot and alerts_list_active to analyze \
        current traffic, highlight anomalies, and propose actions.",
    allowed_tools: &[
        skywarden_tools::REGION_SNAPSHOT,
        skywarden_tools::ACTIVE_ALERTS,
    ],
};
