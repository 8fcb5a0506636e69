//! `skywarden copilot` — coordinated traveler + ops answer.

use skywarden_config::Settings;

pub async fn run(callsign: &str, question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let copilot = super::build_copilot(&settings)?;

    let answer = copilot
        .traveler_with_ops(callsign, question)
        .await
        .map_err(|e| format!("coordinated call failed: {e}"))?;
    println!("{answer}");
    Ok(())
}
