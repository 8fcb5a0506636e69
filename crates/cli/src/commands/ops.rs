//! `skywarden ops` — ask the operations agent.

use skywarden_config::Settings;

pub async fn run(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let copilot = super::build_copilot(&settings)?;

    let answer = copilot
        .ops(question)
        .await
        .map_err(|e| format!("ops agent failed: {e}"))?;
    println!("{answer}");
    Ok(())
}
