use crate::{
    sources::{SeismicSource, WeatherSource},
    AggregatedContext, ForecastSeries, GeoContext, SeismicEvent, SourceError, WeatherSnapshot,
};
use std::sync::Arc;

/// Fetches weather, forecast and seismic data for a point, concurrently and
/// with settle-all semantics: every source call runs to completion and fails
/// independently, so one unreachable API never costs the caller the other
/// two.
pub struct ContextAggregator {
    weather: Arc<dyn WeatherSource>,
    seismic: Arc<dyn SeismicSource>,
}

/// Per-source outcomes of one aggregation, before projection into
/// `AggregatedContext`. Exposed so partial failure is a first-class value
/// rather than a side effect.
pub struct SourceOutcomes {
    pub weather: Result<WeatherSnapshot, SourceError>,
    pub forecast: Result<ForecastSeries, SourceError>,
    pub seismic: Result<Vec<SeismicEvent>, SourceError>,
}

impl SourceOutcomes {
    /// Project into an `AggregatedContext`, logging each degraded source.
    #[must_use]
    pub fn into_context(self) -> AggregatedContext {
        AggregatedContext {
            weather: self
                .weather
                .map_err(|error| tracing::warn!(%error, "current weather unavailable"))
                .ok(),
            forecast: self
                .forecast
                .map_err(|error| tracing::warn!(%error, "forecast unavailable"))
                .ok(),
            seismic: self
                .seismic
                .map_err(|error| tracing::warn!(%error, "seismic events unavailable"))
                .unwrap_or_default(),
        }
    }
}

impl ContextAggregator {
    pub fn new(
        weather: impl WeatherSource + 'static,
        seismic: impl SeismicSource + 'static,
    ) -> Self {
        Self {
            weather: Arc::new(weather),
            seismic: Arc::new(seismic),
        }
    }

    /// Issue all three source calls concurrently and report each outcome.
    /// Exactly one attempt per source: no retries, no caching.
    pub async fn fetch_outcomes(&self, geo: &GeoContext) -> SourceOutcomes {
        let (weather, forecast, seismic) = futures::join!(
            self.weather.current(geo),
            self.weather.forecast(geo),
            self.seismic.recent_events(geo),
        );

        SourceOutcomes {
            weather,
            forecast,
            seismic,
        }
    }

    /// Aggregate context for one point. Never fails: sources that errored
    /// are absent (or empty, for seismic) in the result.
    pub async fn aggregate(&self, geo: &GeoContext) -> AggregatedContext {
        self.fetch_outcomes(geo).await.into_context()
    }
}
