use crate::{
    CompositionError, ForecastSeries, ImagePart, PromptRequest, SeismicEvent, Task, TaskKind,
    WeatherSnapshot,
};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Marker appended to a seismic bullet when the source flagged a tsunami.
pub const TSUNAMI_MARKER: &str = "[TSUNAMI WARNING]";
/// Literal line rendered instead of an empty seismic section.
pub const NO_ACTIVITY_PHRASE: &str = "No significant activity detected.";
/// Forecast days embedded in the climate-advice table.
const FORECAST_TABLE_DAYS: usize = 7;

const CHAT_SYSTEM_INSTRUCTION: &str = "You are Agri-Helper, a world-class AI agricultural \
    expert. You help farmers with crop selection, pest control, soil health, market trends, and \
    modern farming techniques. Be concise, practical, and empathetic. Use markdown for \
    formatting.";

/// Build a `PromptRequest` from a task. Pure: identical tasks compose to
/// byte-identical requests, with no wall-clock reads or randomness, so
/// composition is reproducible and testable.
///
/// # Errors
///
/// Returns a `CompositionError` when a template's genuinely optional inputs
/// are all absent (no image and no text) or a required text is empty. This is
/// the only synchronous rejection in the layer; it happens before any I/O.
pub fn compose(task: Task) -> Result<PromptRequest, CompositionError> {
    match task {
        Task::DiseaseDetection { image, notes } => compose_detection(
            TaskKind::DiseaseDetection,
            image,
            notes,
            "Analyze this image of a plant. Identify the plant species and check for any visible \
             signs of disease or pests. Provide a detailed description of your findings, \
             including potential issues and suggest remedies if any problems are detected. If \
             the image is not a plant, say so.",
            "Based on the following description of a plant, identify the likely species and any \
             signs of disease or pests. Provide a detailed assessment and suggest remedies if \
             any problems are indicated.",
        ),
        Task::PestDetection { image, notes } => compose_detection(
            TaskKind::PestDetection,
            image,
            notes,
            "Analyze this image to identify any pests. Provide a detailed description of the \
             findings, including the pest species, potential damage to crops, and suggested \
             methods for control or eradication. If the image does not contain a recognizable \
             pest, state that clearly.",
            "Based on the following description, identify the likely pest. Describe the pest \
             species, potential damage to crops, and suggested methods for control or \
             eradication.",
        ),
        Task::OrganicCheck { image, description } => {
            let description = non_empty(description);
            if image.is_none() && description.is_none() {
                return Err(CompositionError::MissingImageAndText);
            }
            let mut prompt = "Analyze if the product in the image or described is likely organic \
                or not. Look for organic labels, certification marks (like USDA Organic, EU \
                Organic, etc.), or physical characteristics that might suggest organic farming. \
                Provide a detailed explanation of why it might or might not be organic. If it's \
                a packaged product, try to read the ingredients or labels. If it's raw produce, \
                look for natural variations. Mention that this is an AI estimation and not a \
                laboratory test."
                .to_string();
            if let Some(description) = description {
                let _ = write!(prompt, "\n\nAdditional context: {description}");
            }
            Ok(single_shot(TaskKind::OrganicCheck, prompt, image))
        }
        Task::CropIdentification { image } => Ok(single_shot(
            TaskKind::CropIdentification,
            "What crop is in this image? Respond with only the name of the crop.".to_string(),
            Some(image),
        )),
        Task::SoilReport {
            image,
            location,
            crop,
        } => {
            let prompt = format!(
                "Analyze this soil image (if provided) and the following data to provide a soil \
                 health report and yield prediction.\n\
                 Location: {location}\n\
                 Intended Crop: {crop}\n\n\
                 Provide:\n\
                 1. Soil Type Estimation (based on image/location)\n\
                 2. Nutrient Deficiency Risks\n\
                 3. Recommended Fertilizers (Organic & Inorganic)\n\
                 4. Estimated Yield (e.g., tons per acre)\n\
                 5. Best Planting Window\n\n\
                 Format the output in clear markdown with sections."
            );
            Ok(single_shot(TaskKind::SoilReport, prompt, image))
        }
        Task::CropTips { plant } => {
            let prompt = format!(
                "Provide detailed crop cycle tips for {plant}. Include information on planting, \
                 watering, soil requirements, sunlight, pest control, and harvesting. Present \
                 the information in a clear, easy-to-read markdown format."
            );
            Ok(single_shot(TaskKind::CropTips, prompt, None))
        }
        Task::CropRotation {
            previous_crops,
            location,
            soil_type,
        } => {
            let prompt = format!(
                "Act as an expert agronomist. Provide a detailed crop rotation plan to improve \
                 soil health and maximize yield.\n\
                 - Previous Crops (last 1-2 seasons): {previous_crops}\n\
                 - Location: {location}\n\
                 - Soil Type: {soil_type}\n\n\
                 Your advice should include:\n\
                 1. A recommended crop rotation sequence for the next 3 seasons.\n\
                 2. The benefits of this rotation (e.g., nutrient management, pest control, soil \
                 structure).\n\
                 3. Recommendations for cover crops or green manure to use between main crop \
                 seasons.\n\
                 4. Any specific considerations for the given location and soil type.\n\n\
                 Format the response clearly using markdown."
            );
            Ok(single_shot(TaskKind::CropRotation, prompt, None))
        }
        Task::ClimateAdvice {
            weather,
            forecast,
            seismic,
        } => {
            if forecast.is_empty() {
                return Err(CompositionError::EmptyForecast);
            }
            Ok(single_shot(
                TaskKind::ClimateAdvice,
                climate_advice_prompt(&weather, &forecast, &seismic),
                None,
            ))
        }
        Task::LiveUpdate { weather, seismic } => Ok(single_shot(
            TaskKind::LiveUpdate,
            live_update_prompt(&weather, &seismic),
            None,
        )),
        Task::MarketForecast {
            crop,
            region,
            market_data,
        } => {
            let prompt = format!(
                "You are an expert agricultural market analyst. Based on the following market \
                 data, provide a brief market analysis and price forecast for {crop} in the \
                 {region} region.\n\
                 Analyze trends, but clearly state that this is a simplified forecast based on \
                 limited data and not financial advice.\n\n\
                 Market Data: {market_data}"
            );
            Ok(single_shot(TaskKind::MarketForecast, prompt, None))
        }
        Task::SchemeQuestion { question, schemes } => {
            let prompt = format!(
                "You are a helpful assistant for farmers in India. Your goal is to provide \
                 clear and simple information about government schemes. Use the following data \
                 as your primary source of information: {schemes}. Answer the user's question \
                 based on this data. The user's question is: \"{question}\""
            );
            Ok(single_shot(TaskKind::SchemeQuestion, prompt, None))
        }
        Task::Translation {
            text,
            target_language,
        } => {
            let text = non_empty(Some(text)).ok_or(CompositionError::EmptySourceText)?;
            let prompt = format!(
                "Translate the following text into the language with BCP-47 code \
                 '{target_language}':\n\n{text}"
            );
            Ok(single_shot(TaskKind::Translation, prompt, None))
        }
        Task::Chat { history, message } => {
            let message = non_empty(Some(message)).ok_or(CompositionError::EmptyMessage)?;
            Ok(PromptRequest {
                kind: TaskKind::Chat,
                system_instruction: Some(CHAT_SYSTEM_INSTRUCTION.to_string()),
                history,
                text_parts: vec![message],
                image_part: None,
            })
        }
    }
}

fn compose_detection(
    kind: TaskKind,
    image: Option<ImagePart>,
    notes: Option<String>,
    image_prompt: &str,
    text_prompt: &str,
) -> Result<PromptRequest, CompositionError> {
    let notes = non_empty(notes);
    let mut prompt = match (&image, &notes) {
        (None, None) => return Err(CompositionError::MissingImageAndText),
        (Some(_), _) => image_prompt.to_string(),
        (None, Some(_)) => text_prompt.to_string(),
    };
    if let Some(notes) = notes {
        let _ = write!(prompt, "\n\nAdditional context: {notes}");
    }
    Ok(single_shot(kind, prompt, image))
}

fn single_shot(kind: TaskKind, prompt: String, image: Option<ImagePart>) -> PromptRequest {
    PromptRequest {
        kind,
        system_instruction: None,
        history: Vec::new(),
        text_parts: vec![prompt],
        image_part: image,
    }
}

fn climate_advice_prompt(
    weather: &WeatherSnapshot,
    forecast: &ForecastSeries,
    seismic: &[SeismicEvent],
) -> String {
    let mut prompt = String::from(
        "As an agricultural climate and geological hazard expert, analyze the following data \
         for a farmer and provide concise, actionable advice.\n\n\
         Current Weather:\n",
    );
    let _ = writeln!(prompt, "- Temperature: {}\u{b0}C", weather.temperature_c);
    if let Some(humidity) = weather.humidity_pct {
        let _ = writeln!(prompt, "- Humidity: {humidity}%");
    }
    let _ = writeln!(prompt, "- Wind Speed: {} km/h", weather.wind_speed_kmh);

    prompt.push_str("\n7-Day Forecast (Max/Min Temps):\n");
    for day in forecast.iter().take(FORECAST_TABLE_DAYS) {
        let _ = writeln!(
            prompt,
            "{}: {}\u{b0}C / {}\u{b0}C",
            day.date, day.temp_max_c, day.temp_min_c
        );
    }

    prompt.push_str("\nRecent Geological Activity (within 500km):\n");
    if seismic.is_empty() {
        prompt.push_str(NO_ACTIVITY_PHRASE);
        prompt.push('\n');
    } else {
        for event in seismic {
            let _ = write!(
                prompt,
                "- Mag {} at {} ({})",
                event.magnitude,
                event.place,
                event_date(event)
            );
            if event.tsunami {
                let _ = write!(prompt, " {TSUNAMI_MARKER}");
            }
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\nPlease identify:\n\
         1. Immediate risks (frost, heat stress, high winds, seismic/tsunami threats).\n\
         2. Best activities for the next 3 days (planting, harvesting, spraying, irrigation, \
         safety measures).\n\
         3. Crop Suitability: Based on the current temperature and upcoming forecast, which \
         specific crops are most suitable to be planted or maintained right now?\n\
         4. Any long-term climate or geological trends or warnings based on this data.\n\n\
         Keep the response professional, encouraging, and easy to read.",
    );
    prompt
}

fn live_update_prompt(weather: &WeatherSnapshot, seismic: &[SeismicEvent]) -> String {
    let mut prompt = String::from(
        "As a real-time agricultural climate and geological monitor, provide a single, short, \
         punchy \"live update\" sentence (max 15 words) based on these conditions:\n",
    );
    let _ = writeln!(prompt, "- Temperature: {}\u{b0}C", weather.temperature_c);
    let _ = writeln!(prompt, "- Wind: {} km/h", weather.wind_speed_kmh);
    if let Some(event) = strongest_event(seismic) {
        let _ = writeln!(
            prompt,
            "- Recent Seismic Activity: {} mag near {}",
            event.magnitude, event.place
        );
    }
    prompt.push_str(
        "\nThe update should sound like a live news flash for farmers. Include geological \
         warnings if relevant.",
    );
    prompt
}

/// The single most significant event: highest magnitude wins.
fn strongest_event(seismic: &[SeismicEvent]) -> Option<&SeismicEvent> {
    seismic
        .iter()
        .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude))
}

/// UTC calendar date of the event, derived from its own timestamp so the
/// prompt never depends on wall-clock time or locale.
fn event_date(event: &SeismicEvent) -> String {
    DateTime::<Utc>::from_timestamp_millis(event.timestamp_ms)
        .map_or_else(|| "unknown date".to_string(), |t| t.format("%Y-%m-%d").to_string())
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
