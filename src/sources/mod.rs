mod open_meteo;
mod usgs;

pub use open_meteo::{OpenMeteo, OpenMeteoOptions};
pub use usgs::{Usgs, UsgsOptions};

use crate::{ForecastSeries, GeoContext, SeismicEvent, SourceResult, WeatherSnapshot};

/// Provider of current conditions and the daily forecast for a point.
///
/// The two operations are independent source calls: either may fail without
/// affecting the other, and the aggregator issues them concurrently.
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, geo: &GeoContext) -> SourceResult<WeatherSnapshot>;
    async fn forecast(&self, geo: &GeoContext) -> SourceResult<ForecastSeries>;
}

/// Provider of recent nearby seismic events for a point.
#[async_trait::async_trait]
pub trait SeismicSource: Send + Sync {
    /// Recent events near the point, filtered and truncated to a bounded,
    /// relevance-ordered set by the implementation.
    async fn recent_events(&self, geo: &GeoContext) -> SourceResult<Vec<SeismicEvent>>;
}
