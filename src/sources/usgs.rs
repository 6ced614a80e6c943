use super::SeismicSource;
use crate::{client_utils, GeoContext, SeismicEvent, SourceResult};
use reqwest::Client;
use serde::Deserialize;

/// Events within this radius of the point are considered nearby.
const MAX_RADIUS_KM: f64 = 500.0;
/// Events below this magnitude are not worth surfacing to a farmer.
const MIN_MAGNITUDE: f64 = 2.5;
/// Bounded set size; the API returns time-descending order.
const MAX_EVENTS: usize = 3;

/// Client for the USGS FDSN earthquake event API.
pub struct Usgs {
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct UsgsOptions {
    pub base_url: Option<String>,
    pub client: Option<Client>,
}

impl Usgs {
    #[must_use]
    pub fn new(options: UsgsOptions) -> Self {
        let UsgsOptions { base_url, client } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://earthquake.usgs.gov".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);

        Self { base_url, client }
    }
}

#[async_trait::async_trait]
impl SeismicSource for Usgs {
    async fn recent_events(&self, geo: &GeoContext) -> SourceResult<Vec<SeismicEvent>> {
        let url = format!("{}/fdsnws/event/1/query", self.base_url);
        let query = [
            ("format", "geojson".to_string()),
            ("latitude", geo.latitude.to_string()),
            ("longitude", geo.longitude.to_string()),
            ("maxradiuskm", MAX_RADIUS_KM.to_string()),
            ("minmagnitude", MIN_MAGNITUDE.to_string()),
        ];
        let response: EventResponse = client_utils::get_json(&self.client, &url, &query).await?;
        Ok(map_events(response.features))
    }
}

#[derive(Deserialize)]
struct EventResponse {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    id: String,
    properties: FeatureProperties,
}

#[derive(Deserialize)]
struct FeatureProperties {
    mag: Option<f64>,
    place: Option<String>,
    time: i64,
    /// 0 or 1 in the GeoJSON payload.
    #[serde(default)]
    tsunami: i32,
}

fn map_events(features: Vec<Feature>) -> Vec<SeismicEvent> {
    features
        .into_iter()
        // Rare catalog entries without a magnitude are useless downstream.
        .filter_map(|feature| {
            let magnitude = feature.properties.mag?;
            Some(SeismicEvent {
                id: feature.id,
                magnitude,
                place: feature
                    .properties
                    .place
                    .unwrap_or_else(|| "unknown location".to_string()),
                timestamp_ms: feature.properties.time,
                tsunami: feature.properties.tsunami != 0,
            })
        })
        .take(MAX_EVENTS)
        .collect()
}
