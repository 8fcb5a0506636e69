//! Snapshot accessor — the sole data-access leaf.
//!
//! One conditional-free GET against the region's webhook, strict
//! validation of the returned payload, no retries and no caching (the
//! external workflow owns both).

use async_trait::async_trait;
use serde_json::Value;
use skywarden_core::error::DataError;
use skywarden_core::flight::Snapshot;
use skywarden_core::source::SnapshotSource;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Default webhook for the bootstrap region.
pub const DEFAULT_REGION: &str = "region1";
const DEFAULT_REGION1_WEBHOOK: &str = "http://localhost:5678/webhook/latest-region1";

/// Per-request timeout for the snapshot GET.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The fixed region → webhook URL mapping.
///
/// Built once at startup. Each route can be overridden with a
/// `<REGION>_WEBHOOK` environment variable (e.g. `REGION1_WEBHOOK`).
#[derive(Debug, Clone)]
pub struct RegionRoutes {
    routes: BTreeMap<String, String>,
}

impl RegionRoutes {
    /// Build routes from a configured map, applying environment overrides.
    pub fn new(routes: BTreeMap<String, String>) -> Self {
        Self {
            routes: apply_overrides(routes, |var| std::env::var(var).ok()),
        }
    }

    /// The webhook URL for a region, if the region is known.
    pub fn url(&self, region: &str) -> Option<&str> {
        self.routes.get(region).map(String::as_str)
    }

    /// All known region identifiers.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Comma-joined region list, for error messages.
    pub fn known(&self) -> String {
        self.regions().collect::<Vec<_>>().join(", ")
    }
}

impl Default for RegionRoutes {
    fn default() -> Self {
        let mut routes = BTreeMap::new();
        routes.insert(DEFAULT_REGION.to_string(), DEFAULT_REGION1_WEBHOOK.to_string());
        Self::new(routes)
    }
}

/// Replace each route whose `<REGION>_WEBHOOK` variable is set.
fn apply_overrides(
    mut routes: BTreeMap<String, String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> BTreeMap<String, String> {
    for (region, url) in routes.iter_mut() {
        let var = format!("{}_WEBHOOK", region.to_uppercase());
        if let Some(value) = lookup(&var).filter(|v| !v.is_empty()) {
            *url = value;
        }
    }
    routes
}

/// Fetches and validates one region's current flight snapshot.
pub struct SnapshotClient {
    routes: RegionRoutes,
    client: reqwest::Client,
}

impl SnapshotClient {
    pub fn new(routes: RegionRoutes) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { routes, client }
    }

    pub fn routes(&self) -> &RegionRoutes {
        &self.routes
    }

    /// Fetch the current snapshot for a region.
    ///
    /// Fails with `UnknownRegion` for an unrouted region,
    /// `UpstreamUnavailable` on transport failure or non-success status,
    /// and `MalformedSnapshot` when the body does not validate.
    pub async fn fetch(&self, region: &str) -> Result<Snapshot, DataError> {
        let url = self
            .routes
            .url(region)
            .ok_or_else(|| DataError::UnknownRegion {
                region: region.to_string(),
                known: self.routes.known(),
            })?;

        debug!(region, url, "fetching snapshot");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DataError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::UpstreamUnavailable(format!(
                "{url} returned status {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DataError::MalformedSnapshot(format!("response is not JSON: {e}")))?;

        let snapshot = parse_snapshot(body)?;
        debug!(
            region = %snapshot.region,
            flights = snapshot.flight_count,
            "snapshot fetched"
        );
        Ok(snapshot)
    }
}

impl Default for SnapshotClient {
    fn default() -> Self {
        Self::new(RegionRoutes::default())
    }
}

#[async_trait]
impl SnapshotSource for SnapshotClient {
    async fn fetch(&self, region: &str) -> Result<Snapshot, DataError> {
        SnapshotClient::fetch(self, region).await
    }
}

/// Decode and validate one snapshot payload.
///
/// A payload missing `region` or `flight_count`, carrying them with the
/// wrong type, or whose count disagrees with the flight list is rejected.
fn parse_snapshot(body: Value) -> Result<Snapshot, DataError> {
    let snapshot: Snapshot =
        serde_json::from_value(body).map_err(|e| DataError::MalformedSnapshot(e.to_string()))?;

    if snapshot.region.is_empty() {
        return Err(DataError::MalformedSnapshot("empty region field".into()));
    }

    if snapshot.flight_count != snapshot.flights.len() {
        return Err(DataError::MalformedSnapshot(format!(
            "flight_count {} does not match {} flights",
            snapshot.flight_count,
            snapshot.flights.len()
        )));
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "region": "region1",
            "snapshot_time": 1754000000,
            "fetched_at_iso": "2026-08-07T10:15:00Z",
            "flight_count": 1,
            "flights": [
                { "icao24": "ab1234", "callsign": "PIA293", "on_ground": false }
            ]
        })
    }

    #[test]
    fn parse_valid_snapshot() {
        let snapshot = parse_snapshot(payload()).unwrap();
        assert_eq!(snapshot.region, "region1");
        assert_eq!(snapshot.flight_count, snapshot.flights.len());
    }

    #[test]
    fn parse_rejects_missing_region() {
        let mut body = payload();
        body.as_object_mut().unwrap().remove("region");
        let err = parse_snapshot(body).unwrap_err();
        assert!(matches!(err, DataError::MalformedSnapshot(_)));
    }

    #[test]
    fn parse_rejects_mistyped_flight_count() {
        let mut body = payload();
        body["flight_count"] = json!("one");
        let err = parse_snapshot(body).unwrap_err();
        assert!(matches!(err, DataError::MalformedSnapshot(_)));
    }

    #[test]
    fn parse_rejects_count_mismatch() {
        let mut body = payload();
        body["flight_count"] = json!(7);
        let err = parse_snapshot(body).unwrap_err();
        assert!(matches!(err, DataError::MalformedSnapshot(reason) if reason.contains('7')));
    }

    #[test]
    fn parse_tolerates_one_bad_flight_field() {
        let mut body = payload();
        body["flights"][0]["velocity"] = json!("fast");
        let snapshot = parse_snapshot(body).unwrap();
        assert_eq!(snapshot.flights[0].velocity, None);
    }

    #[test]
    fn default_routes_cover_region1() {
        let routes = RegionRoutes::default();
        assert!(routes.url(DEFAULT_REGION).is_some());
        assert!(routes.url("atlantis").is_none());
        assert!(routes.known().contains("region1"));
    }

    #[test]
    fn env_override_replaces_route() {
        let mut configured = BTreeMap::new();
        configured.insert("region9".to_string(), "http://default".to_string());
        let routes = apply_overrides(configured, |var| {
            (var == "REGION9_WEBHOOK").then(|| "http://override".to_string())
        });
        assert_eq!(routes["region9"], "http://override");
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut configured = BTreeMap::new();
        configured.insert("region9".to_string(), "http://default".to_string());
        let routes = apply_overrides(configured, |_| Some(String::new()));
        assert_eq!(routes["region9"], "http://default");
    }

    #[tokio::test]
    async fn fetch_unknown_region() {
        let client = SnapshotClient::default();
        let err = client.fetch("atlantis").await.unwrap_err();
        assert!(matches!(err, DataError::UnknownRegion { region, .. } if region == "atlantis"));
    }
}
