//! Overpass API client for nearby tourist attractions

use super::{ensure_success, http_client, AttractionsProvider};
use crate::config::PlacesConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Tag keys consulted for a display name, most specific first
const NAME_TAGS: [&str; 7] = [
    "name",
    "name:en",
    "name:en-US",
    "official_name",
    "tourism",
    "leisure",
    "historic",
];

/// Attractions provider backed by an Overpass interpreter endpoint
pub struct OverpassAttractions {
    client: Client,
    endpoint: String,
    radius_meters: u32,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(default)]
    tags: Option<HashMap<String, String>>,
}

impl OverpassAttractions {
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout(), concat!("travelguide/", env!("CARGO_PKG_VERSION")))?,
            endpoint: config.base_url.clone(),
            radius_meters: config.radius_meters,
        })
    }

    async fn query(&self, lat: f64, lon: f64, limit: usize) -> Result<Vec<String>> {
        let query = build_query(lat, lon, self.radius_meters);
        debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .with_context(|| "Overpass request failed")?;
        let response = ensure_success("Overpass", response).await?;

        let body: OverpassResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Overpass response")?;

        Ok(extract_place_names(&body, limit))
    }
}

/// Overpass QL for tourism, leisure and historic features around a point
fn build_query(lat: f64, lon: f64, radius_meters: u32) -> String {
    let around = format!("(around:{radius_meters},{lat},{lon})");
    let mut query = String::from("[out:json][timeout:25];\n(\n");
    for tag in ["tourism", "leisure", "historic"] {
        for kind in ["node", "way", "relation"] {
            query.push_str(&format!("  {kind}[\"{tag}\"]{around};\n"));
        }
    }
    query.push_str(");\nout body;\n>;\nout skel qt;");
    query
}

/// Unique names in response order, at most `limit`. The first non-empty tag
/// wins; an element whose chosen tag is only whitespace is dropped.
fn extract_place_names(response: &OverpassResponse, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    response
        .elements
        .iter()
        .filter_map(|element| element.tags.as_ref())
        .filter_map(|tags| {
            NAME_TAGS
                .iter()
                .find_map(|key| tags.get(*key).filter(|v| !v.is_empty()))
        })
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl AttractionsProvider for OverpassAttractions {
    #[instrument(skip(self))]
    async fn nearby(&self, lat: f64, lon: f64, limit: usize) -> Vec<String> {
        match self.query(lat, lon, limit).await {
            Ok(names) => {
                info!("Found {} attractions near ({:.4}, {:.4})", names.len(), lat, lon);
                names
            }
            Err(e) => {
                // no results rather than an error for the caller
                warn!("Places API error: {:#}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OverpassAttractions {
        OverpassAttractions::new(&PlacesConfig {
            base_url: format!("{}/api/interpreter", server.uri()),
            ..PlacesConfig::default()
        })
        .unwrap()
    }

    fn response(value: serde_json::Value) -> OverpassResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_build_query_covers_all_tags_and_kinds() {
        let query = build_query(12.5, 77.25, 10_000);
        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains("node[\"tourism\"](around:10000,12.5,77.25);"));
        assert!(query.contains("relation[\"historic\"](around:10000,12.5,77.25);"));
        assert_eq!(query.matches("(around:").count(), 9);
        assert!(query.ends_with("out skel qt;"));
    }

    #[test]
    fn test_extract_names_by_tag_priority() {
        let body = response(serde_json::json!({
            "elements": [
                { "tags": { "name": "Lalbagh", "tourism": "attraction" } },
                { "tags": { "name:en": "Bangalore Palace", "historic": "castle" } },
                { "tags": { "leisure": "park" } },
                { "id": 42 },
                { "tags": { "name": "", "official_name": "Vidhana Soudha" } }
            ]
        }));

        assert_eq!(
            extract_place_names(&body, 10),
            vec!["Lalbagh", "Bangalore Palace", "park", "Vidhana Soudha"]
        );
    }

    #[test]
    fn test_whitespace_name_drops_element() {
        let body = response(serde_json::json!({
            "elements": [
                { "tags": { "name": "   ", "official_name": "Vidhana Soudha" } },
                { "tags": { "name": "Lalbagh" } }
            ]
        }));

        assert_eq!(extract_place_names(&body, 10), vec!["Lalbagh"]);
    }

    #[test]
    fn test_extract_names_dedupes_and_limits() {
        let body = response(serde_json::json!({
            "elements": [
                { "tags": { "name": "Cubbon Park" } },
                { "tags": { "name": " Cubbon Park " } },
                { "tags": { "name": "Lalbagh" } },
                { "tags": { "name": "ISKCON Temple" } }
            ]
        }));

        assert_eq!(
            extract_place_names(&body, 2),
            vec!["Cubbon Park", "Lalbagh"]
        );
    }

    #[tokio::test]
    async fn test_nearby_posts_form_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .and(body_string_contains("data="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "elements": [
                    { "tags": { "name": "Eiffel Tower" } },
                    { "tags": { "name": "Louvre Museum" } }
                ]
            })))
            .mount(&server)
            .await;

        let names = provider(&server).nearby(48.85, 2.35, 5).await;
        assert_eq!(names, vec!["Eiffel Tower", "Louvre Museum"]);
    }

    #[tokio::test]
    async fn test_nearby_degrades_to_empty_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(504).set_body_string("gateway timeout"))
            .mount(&server)
            .await;

        assert!(provider(&server).nearby(48.85, 2.35, 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_slow_server_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "elements": [{ "tags": { "name": "Eiffel Tower" } }]
                    }))
                    .set_delay(std::time::Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let provider = OverpassAttractions::new(&PlacesConfig {
            base_url: format!("{}/api/interpreter", server.uri()),
            timeout_seconds: 1,
            ..PlacesConfig::default()
        })
        .unwrap();

        let start = std::time::Instant::now();
        let names = provider.nearby(48.85, 2.35, 5).await;

        assert!(names.is_empty());
        assert!(start.elapsed().as_secs() < 5);
    }

    #[tokio::test]
    async fn test_nearby_handles_missing_elements() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        assert!(provider(&server).nearby(0.0, 0.0, 5).await.is_empty());
    }
}
