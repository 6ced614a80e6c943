use thiserror::Error;

/// Failure of a single external data source call (weather, forecast,
/// geocoding, seismic). Never fatal to an aggregation: the aggregator logs it
/// and degrades the corresponding field to absent.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request to the source failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The source returned a non-success status code.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The source returned a payload this library cannot make sense of
    /// (e.g. daily forecast arrays of mismatched length).
    #[error("Malformed payload from {0}: {1}")]
    Malformed(&'static str, String),
    /// A geocoding lookup matched nothing.
    #[error("No match found for location '{0}'")]
    NotFound(String),
}

/// Required inputs were missing for a prompt template. Detected before any
/// I/O is attempted; the only error in this layer that rejects
/// synchronously.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompositionError {
    /// Detection and check tasks need at least one of an image or a text
    /// description.
    #[error("An image or a text description is required")]
    MissingImageAndText,
    /// Translation of an empty string is rejected rather than sent.
    #[error("There is no text to translate")]
    EmptySourceText,
    /// A chat turn with an empty user message is rejected.
    #[error("The chat message is empty")]
    EmptyMessage,
    /// Climate advice needs at least one forecast day to reason about.
    #[error("A populated forecast is required for climate advice")]
    EmptyForecast,
}

/// Failure of one generative-model invocation. Callers of `ModelInvoker`
/// never see this type: the invoker converts every variant into a
/// `ModelResult` with `succeeded == false` and a displayable fallback.
#[derive(Error, Debug)]
pub enum ModelError {
    /// No credential was available. Reported on first use, not at startup.
    #[error("API key not configured. Set the GEMINI_API_KEY environment variable.")]
    MissingApiKey,
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the provider was unexpected (e.g. no candidates
    /// returned).
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type SourceResult<T> = Result<T, SourceError>;
