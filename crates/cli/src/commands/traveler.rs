//! `skywarden traveler` — ask the traveler support agent.

use skywarden_config::Settings;

pub async fn run(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let copilot = super::build_copilot(&settings)?;

    let answer = copilot
        .traveler(question)
        .await
        .map_err(|e| format!("traveler agent failed: {e}"))?;
    println!("{answer}");
    Ok(())
}
