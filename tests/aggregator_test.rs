use agri_assist::{
    sources::{SeismicSource, WeatherSource},
    ContextAggregator, ForecastDay, ForecastSeries, GeoContext, SeismicEvent, SourceError,
    SourceResult, WeatherSnapshot,
};

#[derive(Clone, Copy)]
struct StubWeather {
    current_ok: bool,
    forecast_ok: bool,
}

#[derive(Clone, Copy)]
struct StubSeismic {
    ok: bool,
}

fn unavailable() -> SourceError {
    SourceError::StatusCode(
        reqwest::StatusCode::SERVICE_UNAVAILABLE,
        "stubbed outage".to_string(),
    )
}

fn snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c: 24.0,
        humidity_pct: None,
        wind_speed_kmh: 8.0,
    }
}

fn series() -> ForecastSeries {
    vec![ForecastDay {
        date: "2025-09-01".to_string(),
        temp_max_c: 29.0,
        temp_min_c: 20.0,
        weather_code: 0,
    }]
}

fn events() -> Vec<SeismicEvent> {
    vec![SeismicEvent {
        id: "us7000stub".to_string(),
        magnitude: 3.4,
        place: "near the test range".to_string(),
        timestamp_ms: 1_756_000_000_000,
        tsunami: false,
    }]
}

#[async_trait::async_trait]
impl WeatherSource for StubWeather {
    async fn current(&self, _geo: &GeoContext) -> SourceResult<WeatherSnapshot> {
        if self.current_ok {
            Ok(snapshot())
        } else {
            Err(unavailable())
        }
    }

    async fn forecast(&self, _geo: &GeoContext) -> SourceResult<ForecastSeries> {
        if self.forecast_ok {
            Ok(series())
        } else {
            Err(unavailable())
        }
    }
}

#[async_trait::async_trait]
impl SeismicSource for StubSeismic {
    async fn recent_events(&self, _geo: &GeoContext) -> SourceResult<Vec<SeismicEvent>> {
        if self.ok {
            Ok(events())
        } else {
            Err(unavailable())
        }
    }
}

fn geo() -> GeoContext {
    GeoContext::new(28.6139, 77.209).with_name("New Delhi")
}

#[tokio::test]
async fn tolerates_every_partial_failure_combination() {
    for current_ok in [true, false] {
        for forecast_ok in [true, false] {
            for seismic_ok in [true, false] {
                let aggregator = ContextAggregator::new(
                    StubWeather {
                        current_ok,
                        forecast_ok,
                    },
                    StubSeismic { ok: seismic_ok },
                );

                let context = aggregator.aggregate(&geo()).await;

                assert_eq!(context.weather.is_some(), current_ok);
                assert_eq!(context.forecast.is_some(), forecast_ok);
                assert_eq!(!context.seismic.is_empty(), seismic_ok);
            }
        }
    }
}

#[tokio::test]
async fn all_sources_succeeding_populates_everything() {
    let aggregator = ContextAggregator::new(
        StubWeather {
            current_ok: true,
            forecast_ok: true,
        },
        StubSeismic { ok: true },
    );

    let context = aggregator.aggregate(&geo()).await;

    assert_eq!(context.weather, Some(snapshot()));
    assert_eq!(context.forecast, Some(series()));
    assert_eq!(context.seismic, events());
}

#[tokio::test]
async fn outcomes_expose_individual_failures() {
    let aggregator = ContextAggregator::new(
        StubWeather {
            current_ok: false,
            forecast_ok: true,
        },
        StubSeismic { ok: false },
    );

    let outcomes = aggregator.fetch_outcomes(&geo()).await;

    assert!(matches!(
        outcomes.weather,
        Err(SourceError::StatusCode(..))
    ));
    assert!(outcomes.forecast.is_ok());
    assert!(outcomes.seismic.is_err());

    let context = outcomes.into_context();
    assert!(context.weather.is_none());
    assert!(context.forecast.is_some());
    assert!(context.seismic.is_empty());
}
