use super::api::{Blob, Content, GenerateContentParameters, GenerateContentResponse, Part};
use crate::{client_utils, ChatRole, GenerativeModel, ModelError, PromptRequest};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::{collections::HashMap, env};

const PROVIDER: &str = "google";

/// Default model id when `GEMINI_MODEL` is not set. A configuration
/// parameter, not a contract: callers may pick any generation-capable id.
pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash";

/// Client for the Gemini `generateContent` REST endpoint.
///
/// Holds only configuration, so one instance is shared across concurrent
/// invocations without synchronization. A missing credential is carried, not
/// rejected: it surfaces as `ModelError::MissingApiKey` on first use.
pub struct GoogleModel {
    model_id: String,
    api_key: Option<String>,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct GoogleModelOptions {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl GoogleModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let GoogleModelOptions {
            api_key,
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            headers,
        }
    }

    /// Configure from the process environment: `GEMINI_API_KEY` for the
    /// credential, `GEMINI_MODEL` to override the default model id. An unset
    /// key does not fail here; it is reported on first use.
    #[must_use]
    pub fn from_env() -> Self {
        let model_id = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());
        Self::new(
            model_id,
            GoogleModelOptions {
                api_key: env::var("GEMINI_API_KEY").ok(),
                ..Default::default()
            },
        )
    }

    fn request_headers(&self) -> Result<HeaderMap, ModelError> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                ModelError::Invariant(PROVIDER, format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ModelError::Invariant(
                    PROVIDER,
                    format!("Invalid header value for '{key}': {error}"),
                )
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GoogleModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, request: PromptRequest) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;

        let params = convert_to_generate_content_parameters(request);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_id, api_key
        );

        let headers = self.request_headers()?;
        let response: GenerateContentResponse =
            client_utils::post_json(&self.client, &url, &params, headers).await?;

        let candidate = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| {
                ModelError::Invariant(PROVIDER, "No candidate in response".to_string())
            })?;

        Ok(extract_text(
            candidate.content.and_then(|c| c.parts).unwrap_or_default(),
        ))
    }
}

fn convert_to_generate_content_parameters(request: PromptRequest) -> GenerateContentParameters {
    let mut contents: Vec<Content> = request
        .history
        .into_iter()
        .map(|turn| Content {
            role: Some(
                match turn.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                }
                .to_string(),
            ),
            parts: Some(vec![Part {
                text: Some(turn.text),
                ..Default::default()
            }]),
        })
        .collect();

    // The final user message: image part first, then the text parts.
    let mut parts = Vec::new();
    if let Some(image) = request.image_part {
        parts.push(Part {
            inline_data: Some(Blob {
                data: Some(BASE64.encode(&image.data)),
                mime_type: Some(image.mime_type),
            }),
            ..Default::default()
        });
    }
    parts.extend(request.text_parts.into_iter().map(|text| Part {
        text: Some(text),
        ..Default::default()
    }));
    contents.push(Content {
        role: Some("user".to_string()),
        parts: Some(parts),
    });

    GenerateContentParameters {
        contents,
        system_instruction: request.system_instruction.map(|instruction| Content {
            role: Some("system".to_string()),
            parts: Some(vec![Part {
                text: Some(instruction),
                ..Default::default()
            }]),
        }),
    }
}

/// Concatenated text of the candidate parts, skipping thought parts.
fn extract_text(parts: Vec<Part>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.thought.unwrap_or(false))
        .filter_map(|part| part.text)
        .collect()
}
