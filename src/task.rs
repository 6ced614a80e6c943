use crate::{ChatTurn, ForecastSeries, ImagePart, SeismicEvent, TaskKind, WeatherSnapshot};

/// One unit of assistant work, carrying exactly the inputs its prompt
/// template needs. A closed set: the composer is a total function over these
/// variants, so a task that type-checks can only fail composition on the few
/// genuinely optional inputs (image-or-text, non-empty text).
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Identify a plant and any visible disease from a photo and/or a
    /// written description.
    DiseaseDetection {
        image: Option<ImagePart>,
        notes: Option<String>,
    },
    /// Identify a pest and suggest control measures.
    PestDetection {
        image: Option<ImagePart>,
        notes: Option<String>,
    },
    /// Estimate whether a product is organically farmed.
    OrganicCheck {
        image: Option<ImagePart>,
        description: Option<String>,
    },
    /// Name the crop shown in a photo, nothing else. Feeds search fields,
    /// so the template asks for a bare crop name.
    CropIdentification { image: ImagePart },
    /// Soil health report and yield prediction for a location and crop.
    SoilReport {
        image: Option<ImagePart>,
        location: String,
        crop: String,
    },
    /// Crop cycle tips for a named plant.
    CropTips { plant: String },
    /// Crop rotation plan given recent planting history.
    CropRotation {
        previous_crops: String,
        location: String,
        soil_type: String,
    },
    /// Actionable climate and geological-hazard advice from aggregated
    /// context. Weather and forecast are required by construction.
    ClimateAdvice {
        weather: WeatherSnapshot,
        forecast: ForecastSeries,
        seismic: Vec<SeismicEvent>,
    },
    /// A one-sentence live news flash for the conditions ticker.
    LiveUpdate {
        weather: WeatherSnapshot,
        seismic: Vec<SeismicEvent>,
    },
    /// Market analysis and price forecast for a crop in a region, grounded
    /// in supplied market data.
    MarketForecast {
        crop: String,
        region: String,
        market_data: serde_json::Value,
    },
    /// Answer a question about government schemes, grounded in supplied
    /// scheme data.
    SchemeQuestion {
        question: String,
        schemes: serde_json::Value,
    },
    /// Translate text into the language named by a BCP-47 code.
    Translation {
        text: String,
        target_language: String,
    },
    /// Continue a conversation: prior turns in order, then the new message.
    Chat {
        history: Vec<ChatTurn>,
        message: String,
    },
}

impl Task {
    #[must_use]
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::DiseaseDetection { .. } => TaskKind::DiseaseDetection,
            Self::PestDetection { .. } => TaskKind::PestDetection,
            Self::OrganicCheck { .. } => TaskKind::OrganicCheck,
            Self::CropIdentification { .. } => TaskKind::CropIdentification,
            Self::SoilReport { .. } => TaskKind::SoilReport,
            Self::CropTips { .. } => TaskKind::CropTips,
            Self::CropRotation { .. } => TaskKind::CropRotation,
            Self::ClimateAdvice { .. } => TaskKind::ClimateAdvice,
            Self::LiveUpdate { .. } => TaskKind::LiveUpdate,
            Self::MarketForecast { .. } => TaskKind::MarketForecast,
            Self::SchemeQuestion { .. } => TaskKind::SchemeQuestion,
            Self::Translation { .. } => TaskKind::Translation,
            Self::Chat { .. } => TaskKind::Chat,
        }
    }
}
