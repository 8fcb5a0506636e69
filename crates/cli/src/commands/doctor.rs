//! `skywarden doctor` — diagnose credentials and snapshot webhooks.

use skywarden_config::Settings;
use skywarden_core::provider::Provider;
use skywarden_providers::OpenAiCompatProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Skywarden Doctor — System Diagnostics");
    println!("=====================================\n");

    let mut issues = 0;

    let settings = match Settings::load() {
        Ok(settings) => {
            println!("  ✅ Config valid");
            settings
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            return Err(e.into());
        }
    };

    // API key + model host
    match &settings.api_key {
        Some(key) => {
            println!("  ✅ API key configured");
            let provider = OpenAiCompatProvider::groq(key.clone());
            match provider.health_check().await {
                Ok(true) => println!("  ✅ Model host reachable"),
                Ok(false) => {
                    println!("  ⚠️  Model host rejected the key");
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Model host unreachable: {e}");
                    issues += 1;
                }
            }
        }
        None => {
            println!("  ⚠️  No API key — set GROQ_API_KEY to enable agent calls");
            issues += 1;
        }
    }

    // Snapshot webhooks
    let client = super::build_client(&settings);
    let regions: Vec<String> = client.routes().regions().map(String::from).collect();
    for region in regions {
        match client.fetch(&region).await {
            Ok(snapshot) => {
                println!("  ✅ {region}: {} flights", snapshot.flight_count);
            }
            Err(e) => {
                println!("  ❌ {region}: {e}");
                issues += 1;
            }
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
