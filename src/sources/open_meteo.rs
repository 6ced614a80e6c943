use super::WeatherSource;
use crate::{
    client_utils, ForecastDay, ForecastSeries, GeoContext, SourceError, SourceResult,
    WeatherSnapshot,
};
use reqwest::Client;
use serde::Deserialize;

const PROVIDER: &str = "open-meteo";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code";
const FORECAST_DAYS: u8 = 7;

/// Client for the Open-Meteo forecast and geocoding APIs.
pub struct OpenMeteo {
    forecast_base_url: String,
    geocoding_base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct OpenMeteoOptions {
    pub forecast_base_url: Option<String>,
    pub geocoding_base_url: Option<String>,
    pub client: Option<Client>,
}

impl OpenMeteo {
    #[must_use]
    pub fn new(options: OpenMeteoOptions) -> Self {
        let OpenMeteoOptions {
            forecast_base_url,
            geocoding_base_url,
            client,
        } = options;

        let forecast_base_url = forecast_base_url
            .unwrap_or_else(|| "https://api.open-meteo.com".to_string())
            .trim_end_matches('/')
            .to_string();
        let geocoding_base_url = geocoding_base_url
            .unwrap_or_else(|| "https://geocoding-api.open-meteo.com".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);

        Self {
            forecast_base_url,
            geocoding_base_url,
            client,
        }
    }

    /// Resolve a free-text place name to a `GeoContext` using the first
    /// geocoding match. An empty result set is `SourceError::NotFound`.
    pub async fn geocode(&self, name: &str) -> SourceResult<GeoContext> {
        let url = format!("{}/v1/search", self.geocoding_base_url);
        let query = [
            ("name", name.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        let response: GeocodingResponse =
            client_utils::get_json(&self.client, &url, &query).await?;
        map_geocoding(name, response)
    }
}

#[async_trait::async_trait]
impl WeatherSource for OpenMeteo {
    async fn current(&self, geo: &GeoContext) -> SourceResult<WeatherSnapshot> {
        let url = format!("{}/v1/forecast", self.forecast_base_url);
        let query = [
            ("latitude", geo.latitude.to_string()),
            ("longitude", geo.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("wind_speed_unit", "kmh".to_string()),
        ];
        let response: CurrentResponse = client_utils::get_json(&self.client, &url, &query).await?;
        Ok(map_current(response.current))
    }

    async fn forecast(&self, geo: &GeoContext) -> SourceResult<ForecastSeries> {
        let url = format!("{}/v1/forecast", self.forecast_base_url);
        let query = [
            ("latitude", geo.latitude.to_string()),
            ("longitude", geo.longitude.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        let response: DailyResponse = client_utils::get_json(&self.client, &url, &query).await?;
        map_daily(response.daily)
    }
}

#[derive(Deserialize)]
struct CurrentResponse {
    current: CurrentBlock,
}

#[derive(Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: f64,
}

#[derive(Deserialize)]
struct DailyResponse {
    daily: DailyBlock,
}

/// Columnar daily series as Open-Meteo returns it; one entry per day across
/// all four arrays.
#[derive(Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
}

fn map_geocoding(name: &str, response: GeocodingResponse) -> SourceResult<GeoContext> {
    response
        .results
        .and_then(|results| results.into_iter().next())
        .map(|result| GeoContext {
            latitude: result.latitude,
            longitude: result.longitude,
            name: result.name,
        })
        .ok_or_else(|| SourceError::NotFound(name.to_string()))
}

fn map_current(current: CurrentBlock) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c: current.temperature_2m,
        humidity_pct: current.relative_humidity_2m,
        wind_speed_kmh: current.wind_speed_10m,
    }
}

fn map_daily(daily: DailyBlock) -> SourceResult<ForecastSeries> {
    let days = daily.time.len();
    if daily.temperature_2m_max.len() != days
        || daily.temperature_2m_min.len() != days
        || daily.weather_code.len() != days
    {
        return Err(SourceError::Malformed(
            PROVIDER,
            format!(
                "Daily arrays of mismatched length: {} dates, {} max, {} min, {} codes",
                days,
                daily.temperature_2m_max.len(),
                daily.temperature_2m_min.len(),
                daily.weather_code.len()
            ),
        ));
    }

    Ok(daily
        .time
        .into_iter()
        .zip(daily.temperature_2m_max)
        .zip(daily.temperature_2m_min)
        .zip(daily.weather_code)
        .map(|(((date, temp_max_c), temp_min_c), weather_code)| ForecastDay {
            date,
            temp_max_c,
            temp_min_c,
            weather_code,
        })
        .collect())
}
