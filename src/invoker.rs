use crate::{GenerativeModel, ModelError, ModelResult, PromptRequest, TaskKind};
use std::sync::Arc;

/// Delivers composed requests to a generative model and normalizes every
/// outcome into a `ModelResult`.
///
/// The guarantee to callers: `invoke` never fails and never yields empty
/// text. Transport failures, provider errors, a missing credential and empty
/// response bodies all become `succeeded == false` with displayable fallback
/// wording; the underlying detail is logged, not shown.
pub struct ModelInvoker {
    model: Arc<dyn GenerativeModel>,
}

impl ModelInvoker {
    pub fn new(model: impl GenerativeModel + 'static) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Exactly one model call per invocation; no streaming, no retry.
    pub async fn invoke(&self, request: PromptRequest) -> ModelResult {
        let kind = request.kind;

        match self.model.generate(request).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!(
                    provider = self.model.provider(),
                    model_id = %self.model.model_id(),
                    ?kind,
                    "model returned an empty response"
                );
                ModelResult {
                    text: empty_response_fallback(kind).to_string(),
                    succeeded: false,
                }
            }
            Ok(text) => ModelResult {
                text,
                succeeded: true,
            },
            // The one failure whose cause the user can fix themselves.
            Err(error @ ModelError::MissingApiKey) => ModelResult {
                text: error.to_string(),
                succeeded: false,
            },
            Err(error) => {
                tracing::error!(
                    provider = self.model.provider(),
                    model_id = %self.model.model_id(),
                    ?kind,
                    %error,
                    "model invocation failed"
                );
                ModelResult {
                    text: failure_fallback(kind).to_string(),
                    succeeded: false,
                }
            }
        }
    }
}

/// Shown when the provider call itself failed. Wording carried over from the
/// assistant UI so each screen keeps its established tone.
fn failure_fallback(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::DiseaseDetection => "An unknown error occurred while detecting plant disease.",
        TaskKind::PestDetection => "An unknown error occurred while detecting pests.",
        TaskKind::OrganicCheck => "An unknown error occurred while checking organic status.",
        TaskKind::CropIdentification => "Could not identify the crop. Please try again.",
        TaskKind::SoilReport => "Error analyzing soil data.",
        TaskKind::CropTips => "An unknown error occurred while fetching crop tips.",
        TaskKind::CropRotation => "Sorry, there was an error generating advice. Please try again.",
        TaskKind::ClimateAdvice => "Failed to get AI advice. Please try again later.",
        TaskKind::LiveUpdate => "Monitoring climate conditions...",
        TaskKind::MarketForecast => {
            "Sorry, there was an error generating the forecast. Please try again."
        }
        TaskKind::SchemeQuestion => "Sorry, I am having trouble connecting. Please try again later.",
        TaskKind::Translation => "An unknown error occurred while translating text.",
        TaskKind::Chat => "I encountered an error. Please try again.",
    }
}

/// Shown when the call succeeded but the body carried no text, so downstream
/// rendering never shows blank content.
fn empty_response_fallback(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::ClimateAdvice => "No advice available at this time.",
        TaskKind::LiveUpdate => "Monitoring climate conditions...",
        _ => "No response was generated. Please try again.",
    }
}
