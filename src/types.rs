use serde::{Deserialize, Serialize};

/// A resolved geographic point used to key all location-based lookups.
///
/// Produced either from device geolocation or from a geocoding lookup of a
/// free-text place name. Immutable once resolved; a new user action produces
/// a new `GeoContext`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoContext {
    pub latitude: f64,
    pub longitude: f64,
    /// Display name from the geocoder, when the point came from a search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Current conditions at one `GeoContext`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity in percent, when the source reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    /// Wind speed in km/h.
    pub wind_speed_kmh: f64,
}

/// One day of the daily forecast. Series order is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// ISO-8601 date (e.g. "2025-08-25") as reported by the source.
    pub date: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    /// WMO weather interpretation code.
    pub weather_code: i32,
}

/// Chronologically ordered daily forecast.
pub type ForecastSeries = Vec<ForecastDay>;

/// A nearby earthquake, as reported by the seismic events source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicEvent {
    /// Source-assigned stable identifier, unique within a result set.
    pub id: String,
    pub magnitude: f64,
    /// Human-readable locality description.
    pub place: String,
    /// Event time as Unix epoch milliseconds.
    pub timestamp_ms: i64,
    /// Whether the source raised a tsunami flag for this event.
    pub tsunami: bool,
}

/// The merged, partial-failure-tolerant result of fetching weather, forecast
/// and seismic data for one `GeoContext`. Any field may be absent (or empty,
/// for `seismic`) if its source call failed; absence never aborts the whole
/// aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastSeries>,
    pub seismic: Vec<SeismicEvent>,
}

/// Label identifying which task template produced a `PromptRequest`. Used by
/// the invoker to pick task-appropriate fallback wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    DiseaseDetection,
    PestDetection,
    OrganicCheck,
    CropIdentification,
    SoilReport,
    CropTips,
    CropRotation,
    ClimateAdvice,
    LiveUpdate,
    MarketForecast,
    SchemeQuestion,
    Translation,
    Chat,
}

/// An inline image attached to a prompt. One image per request at most.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePart {
    /// Raw image bytes. Base64 encoding happens at the wire boundary.
    pub data: Vec<u8>,
    /// IANA MIME type, e.g. "image/jpeg".
    pub mime_type: String,
}

/// The producer of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of a chat conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// A fully-composed unit of work ready to send to the generative model.
///
/// Composition is pure: identical task inputs yield an identical
/// `PromptRequest`, with no embedded timestamps or randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub kind: TaskKind,
    /// System instruction steering the model, when the task defines one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// Prior conversation turns, in their original order. Empty for
    /// single-shot tasks.
    pub history: Vec<ChatTurn>,
    /// Text parts of the final user message.
    pub text_parts: Vec<String>,
    /// Optional image part of the final user message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_part: Option<ImagePart>,
}

/// The normalized outcome of one model invocation.
///
/// `succeeded == false` still carries a human-readable fallback in `text`,
/// never an empty string and never a raw error. Callers render `text` either
/// way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub text: String,
    pub succeeded: bool,
}
