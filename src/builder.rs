// Request Builder

use crate::client::Gemini;
use crate::schema::AnalysisSchema;
use crate::types::*;
use crate::utils::{validate_range, StringValidator};
use crate::{malformed_response, transport_error};

/// Fluent builder for a single `generateContent` call.
///
/// ```no_run
/// # async fn run() -> nlp_showcase::ShowcaseResult<()> {
/// use nlp_showcase::{Gemini, schema::AnalysisSchema};
///
/// let gemini = Gemini::new("my-key")?;
/// let text = gemini.request()
///     .prompt("Devuelve un número entre 0 y 1")?
///     .schema(&AnalysisSchema::Number)
///     .temperature(0.0)?
///     .send_text()
///     .await?;
/// # let _ = text;
/// # Ok(())
/// # }
/// ```
pub struct GenerateRequestBuilder {
    client: Gemini,
    model: GeminiModel,
    prompt: Option<String>,
    response_schema: Option<serde_json::Value>,
    temperature: Option<f32>,
}

impl GenerateRequestBuilder {
    pub(crate) fn from_client(client: Gemini) -> Self {
        Self {
            model: client.default_model.clone(),
            temperature: client.default_temperature,
            client,
            prompt: None,
            response_schema: None,
        }
    }

    /// Set the user prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> ShowcaseResult<Self> {
        self.prompt = Some(StringValidator::not_empty(prompt, "prompt")?);
        Ok(self)
    }

    /// Ask for JSON following `schema`
    pub fn schema(mut self, schema: &AnalysisSchema) -> Self {
        self.response_schema = Some(schema.to_wire());
        self
    }

    /// Overrides the client's default model
    pub fn model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    /// Set the sampling temperature (between 0.0 and 2.0)
    pub fn temperature(mut self, temperature: f32) -> ShowcaseResult<Self> {
        self.temperature = Some(validate_range(temperature, 0.0, 2.0, "temperature")?);
        Ok(self)
    }

    /// Endpoint and body this builder would send
    pub fn build(&self) -> ShowcaseResult<(String, GenerateRequest)> {
        let prompt = self.prompt.clone().ok_or_else(|| {
            ShowcaseError::ValidationError("A prompt is required".to_string())
        })?;
        let response_schema = self.response_schema.clone().ok_or_else(|| {
            ShowcaseError::ValidationError("A response schema is required".to_string())
        })?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.client.base_url.trim_end_matches('/'),
            self.model.as_str()
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![Part::text(prompt)],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
                temperature: self.temperature,
            },
        };
        Ok((endpoint, request))
    }

    /// Map non-success statuses onto transport errors
    async fn handle_error_response(&self, response: reqwest::Response) -> ShowcaseResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|envelope| {
                tracing::debug!(code = envelope.error.code, "provider error envelope");
                match envelope.error.status {
                    Some(code) => format!("{}: {}", code, envelope.error.message),
                    None => envelope.error.message,
                }
            })
            .unwrap_or(body);
        let message = sanitize_error_message(&message);

        if status == 429 {
            let details = match retry_after {
                Some(secs) => format!("rate limited, retry after {}s", secs),
                None => "rate limited".to_string(),
            };
            return Err(transport_error!(message, Some(status), details));
        }

        Err(transport_error!(message, Some(status)))
    }

    /// Send the request and return the decoded envelope
    pub async fn send(self) -> ShowcaseResult<GenerateResponse> {
        let (endpoint, request) = self.build()?;
        tracing::debug!(model = %self.model, "POST generateContent");

        let response = self
            .client
            .http_client
            .post(&endpoint)
            .header("x-goog-api-key", self.client.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let response = self.handle_error_response(response).await?;

        let response = response.json::<GenerateResponse>().await.map_err(|e| {
            ShowcaseError::malformed_response(
                e.to_string(),
                None,
                Some(e),
                Some(concat!(file!(), ":", line!())),
            )
        })?;

        if let Some(usage) = &response.usage_metadata {
            tracing::debug!(
                model_version = ?response.model_version,
                role = ?response.candidates.first().and_then(|c| c.content.as_ref()).and_then(|c| c.role.as_deref()),
                prompt_tokens = usage.prompt_token_count,
                candidate_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "generateContent usage"
            );
        }
        Ok(response)
    }

    /// Send the request and return the answer text of the first candidate
    pub async fn send_text(self) -> ShowcaseResult<String> {
        let response = self.send().await?;
        if let Some(text) = response.text() {
            return Ok(text);
        }

        let reason = response
            .block_reason()
            .map(|r| format!("prompt blocked: {}", r))
            .or_else(|| {
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .map(|r| format!("finish reason: {}", r))
            })
            .unwrap_or_else(|| "no candidates".to_string());
        Err(malformed_response!("Response contained no text", reason))
    }
}
