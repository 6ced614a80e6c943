use crate::{ModelError, PromptRequest};

/// A generative text model behind a provider API.
///
/// Implementations perform exactly one network call per `generate`
/// invocation: no streaming, no retry, no partial delivery. The only state an
/// implementation holds is its configuration (credential, model id, base
/// URL), so a single instance is shared freely across concurrent callers.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    /// Deliver the request and return the model's text output. May return an
    /// empty string; normalizing that into a placeholder is the invoker's
    /// job.
    async fn generate(&self, request: PromptRequest) -> Result<String, ModelError>;
}
