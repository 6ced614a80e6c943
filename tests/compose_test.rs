use agri_assist::{
    compose, ChatTurn, CompositionError, ForecastDay, ImagePart, SeismicEvent, Task, TaskKind,
    WeatherSnapshot, NO_ACTIVITY_PHRASE, TSUNAMI_MARKER,
};

fn weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c: 28.5,
        humidity_pct: Some(64.0),
        wind_speed_kmh: 11.0,
    }
}

fn forecast(days: usize) -> Vec<ForecastDay> {
    (0..days)
        .map(|i| ForecastDay {
            date: format!("2025-09-{:02}", i + 1),
            temp_max_c: 30.0 + i as f64,
            temp_min_c: 21.0 + i as f64,
            weather_code: 3,
        })
        .collect()
}

fn event(id: &str, magnitude: f64, tsunami: bool) -> SeismicEvent {
    SeismicEvent {
        id: id.to_string(),
        magnitude,
        place: format!("{id} region"),
        timestamp_ms: 1_756_000_000_000,
        tsunami,
    }
}

fn climate_task(seismic: Vec<SeismicEvent>) -> Task {
    Task::ClimateAdvice {
        weather: weather(),
        forecast: forecast(7),
        seismic,
    }
}

#[test]
fn composition_is_pure() {
    let task = climate_task(vec![event("q1", 4.2, true), event("q2", 3.1, false)]);

    let first = compose(task.clone()).unwrap();
    let second = compose(task).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_seismic_list_states_no_activity() {
    let request = compose(climate_task(Vec::new())).unwrap();

    let prompt = &request.text_parts[0];
    assert!(prompt.contains("Recent Geological Activity"));
    assert!(prompt.contains(NO_ACTIVITY_PHRASE));
}

#[test]
fn tsunami_flag_adds_marker_to_that_event_only() {
    let request = compose(climate_task(vec![event("quiet", 3.0, false)])).unwrap();
    assert!(!request.text_parts[0].contains(TSUNAMI_MARKER));

    let request = compose(climate_task(vec![
        event("quiet", 3.0, false),
        event("loud", 6.2, true),
    ]))
    .unwrap();
    let prompt = &request.text_parts[0];
    assert_eq!(prompt.matches(TSUNAMI_MARKER).count(), 1);

    let flagged_line = prompt
        .lines()
        .find(|line| line.contains(TSUNAMI_MARKER))
        .unwrap();
    assert!(flagged_line.contains("loud region"));
}

#[test]
fn forecast_table_is_capped_at_seven_days() {
    let task = Task::ClimateAdvice {
        weather: weather(),
        forecast: forecast(10),
        seismic: Vec::new(),
    };

    let prompt = compose(task).unwrap().text_parts.remove(0);
    assert!(prompt.contains("2025-09-07"));
    assert!(!prompt.contains("2025-09-08"));
}

#[test]
fn climate_advice_rejects_empty_forecast() {
    let task = Task::ClimateAdvice {
        weather: weather(),
        forecast: Vec::new(),
        seismic: vec![event("q1", 4.0, false)],
    };

    assert_eq!(compose(task), Err(CompositionError::EmptyForecast));
}

#[test]
fn seismic_dates_come_from_event_timestamps() {
    let request = compose(climate_task(vec![event("q1", 4.0, false)])).unwrap();

    // 1_756_000_000_000 ms is 2025-08-24 UTC.
    assert!(request.text_parts[0].contains("(2025-08-24)"));
}

#[test]
fn live_update_references_the_strongest_event() {
    let task = Task::LiveUpdate {
        weather: weather(),
        seismic: vec![
            event("first", 3.2, false),
            event("strongest", 5.8, false),
            event("last", 4.1, false),
        ],
    };

    let prompt = compose(task).unwrap().text_parts.remove(0);
    assert!(prompt.contains("5.8 mag near strongest region"));
    assert!(!prompt.contains("first region"));
}

#[test]
fn live_update_omits_seismic_line_when_no_events() {
    let task = Task::LiveUpdate {
        weather: weather(),
        seismic: Vec::new(),
    };

    let prompt = compose(task).unwrap().text_parts.remove(0);
    assert!(!prompt.contains("Recent Seismic Activity"));
}

#[test]
fn translation_names_the_target_code_exactly_once() {
    let task = Task::Translation {
        text: "Sow the seeds after the monsoon.".to_string(),
        target_language: "fr".to_string(),
    };

    let request = compose(task).unwrap();
    let prompt = &request.text_parts[0];
    assert_eq!(prompt.matches("'fr'").count(), 1);
    assert!(prompt.contains("into the language with BCP-47 code 'fr'"));
}

#[test]
fn translation_rejects_empty_text() {
    let task = Task::Translation {
        text: "   ".to_string(),
        target_language: "fr".to_string(),
    };

    assert_eq!(compose(task), Err(CompositionError::EmptySourceText));
}

#[test]
fn chat_preserves_history_order_and_appends_message() {
    let history = vec![
        ChatTurn::user("Which fertilizer for tomatoes?"),
        ChatTurn::model("Use a balanced NPK mix."),
        ChatTurn::user("How often?"),
        ChatTurn::model("Every two weeks."),
    ];
    let task = Task::Chat {
        history: history.clone(),
        message: "And during flowering?".to_string(),
    };

    let request = compose(task).unwrap();
    assert_eq!(request.history, history);
    assert_eq!(request.text_parts, vec!["And during flowering?".to_string()]);
    assert!(request.system_instruction.is_some());
}

#[test]
fn chat_rejects_empty_message() {
    let task = Task::Chat {
        history: Vec::new(),
        message: String::new(),
    };

    assert_eq!(compose(task), Err(CompositionError::EmptyMessage));
}

#[test]
fn detection_requires_image_or_text() {
    for task in [
        Task::DiseaseDetection {
            image: None,
            notes: None,
        },
        Task::PestDetection {
            image: None,
            notes: Some("  ".to_string()),
        },
        Task::OrganicCheck {
            image: None,
            description: None,
        },
    ] {
        assert_eq!(compose(task), Err(CompositionError::MissingImageAndText));
    }
}

#[test]
fn detection_accepts_image_alone() {
    let task = Task::DiseaseDetection {
        image: Some(ImagePart::new(vec![1, 2, 3], "image/png")),
        notes: None,
    };

    let request = compose(task).unwrap();
    assert_eq!(request.kind, TaskKind::DiseaseDetection);
    assert!(request.image_part.is_some());
    assert!(!request.text_parts[0].is_empty());
}

#[test]
fn detection_accepts_notes_alone() {
    let task = Task::PestDetection {
        image: None,
        notes: Some("Small white insects under the leaves.".to_string()),
    };

    let request = compose(task).unwrap();
    assert!(request.image_part.is_none());
    assert!(request.text_parts[0].contains("Small white insects under the leaves."));
}

#[test]
fn crop_identification_asks_for_a_bare_name() {
    let task = Task::CropIdentification {
        image: ImagePart::new(vec![1, 2, 3], "image/jpeg"),
    };

    let request = compose(task).unwrap();
    assert_eq!(request.kind, TaskKind::CropIdentification);
    assert!(request.image_part.is_some());
    assert_eq!(
        request.text_parts,
        vec!["What crop is in this image? Respond with only the name of the crop.".to_string()]
    );
}

#[test]
fn market_forecast_embeds_the_market_data() {
    let task = Task::MarketForecast {
        crop: "Wheat".to_string(),
        region: "Punjab".to_string(),
        market_data: serde_json::json!([{"crop": "Wheat", "price": 2150}]),
    };

    let prompt = compose(task).unwrap().text_parts.remove(0);
    assert!(prompt.contains("Wheat"));
    assert!(prompt.contains("Punjab"));
    assert!(prompt.contains("2150"));
}

#[test]
fn scheme_question_quotes_the_user_question() {
    let task = Task::SchemeQuestion {
        question: "Am I eligible for crop insurance?".to_string(),
        schemes: serde_json::json!([{"name": "PMFBY"}]),
    };

    let prompt = compose(task).unwrap().text_parts.remove(0);
    assert!(prompt.contains("\"Am I eligible for crop insurance?\""));
    assert!(prompt.contains("PMFBY"));
}
