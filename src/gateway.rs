//! Analysis Gateway.
//!
//! One provider call per [`AnalysisGateway::execute`], no retries, no
//! caching. The provider's text is checked against the prepared schema
//! before anything is decoded, so the presenter only ever sees conforming
//! data.

use crate::domains::AnalysisResult;
use crate::malformed_response;
use crate::prompt::PreparedPrompt;
use crate::schema::AnalysisSchema;
use crate::types::*;
use crate::utils::json_extractor::parse_json;
use async_trait::async_trait;
use std::sync::Arc;

/// The external text-generation capability.
///
/// Implementations send `prompt` together with the wire form of `schema`
/// and return the provider's raw answer text. They must not interpret the
/// answer; conformance is checked by the gateway.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, prompt: &str, schema: &AnalysisSchema) -> ShowcaseResult<String>;
}

/// Runs prepared prompts through a provider and returns typed results
#[derive(Clone)]
pub struct AnalysisGateway {
    provider: Arc<dyn GenerationProvider>,
}

impl AnalysisGateway {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    pub fn from_provider(provider: impl GenerationProvider + 'static) -> Self {
        Self::new(Arc::new(provider))
    }

    /// Send `prepared` and decode the answer.
    ///
    /// Fails with a `Transport` provider error when the call itself fails and
    /// with `MalformedResponse` when the answer is not JSON, breaks the
    /// schema, or cannot be decoded.
    #[tracing::instrument(name = "gateway.execute", skip_all, fields(kind = %prepared.kind))]
    pub async fn execute(&self, prepared: &PreparedPrompt) -> ShowcaseResult<AnalysisResult> {
        tracing::debug!(prompt_len = prepared.prompt.len(), "sending analysis request");

        let text = self
            .provider
            .generate(&prepared.prompt, &prepared.schema)
            .await
            .map_err(as_provider_error)?;

        let value = parse_json(&text)?;
        if let Err(violation) = prepared.schema.validate(&value) {
            tracing::warn!(%violation, "provider answer does not match schema");
            return Err(malformed_response!(
                format!("Response does not match schema: {}", violation),
                text
            ));
        }

        let result = AnalysisResult::decode(prepared, value)?;
        tracing::debug!("analysis response accepted");
        Ok(result)
    }
}

/// Anything a provider raises counts as a provider failure, whatever variant
/// the implementation chose
fn as_provider_error(err: ShowcaseError) -> ShowcaseError {
    match err {
        err @ ShowcaseError::ProviderError { .. } => err,
        other => ShowcaseError::transport_error(
            other.to_string(),
            None,
            None,
            Some(other),
            Some(concat!(file!(), ":", line!())),
        ),
    }
}
