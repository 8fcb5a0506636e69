//! `skywarden alerts` — run the anomaly rules directly, no model.

use skywarden_config::Settings;

pub async fn run(region: &str) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let client = super::build_client(&settings);

    let snapshot = client
        .fetch(region)
        .await
        .map_err(|e| format!("snapshot fetch failed: {e}"))?;
    let result = skywarden_rules::detect_region(&snapshot);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
