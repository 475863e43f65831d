// Gemini HTTP client

use crate::builder::GenerateRequestBuilder;
use crate::config::ShowcaseConfig;
use crate::gateway::GenerationProvider;
use crate::schema::AnalysisSchema;
use crate::types::*;
use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::{header, Client as HttpClient};
use std::sync::Mutex;
use std::time::Duration;

lazy_static! {
    static ref CLIENT_CONFIG: Mutex<TlsConfig> = Mutex::new(TlsConfig::default());
}

/// Configuration for TLS
#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub min_tls_version: Option<reqwest::tls::Version>,
    pub cert_verification: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            min_tls_version: Some(reqwest::tls::Version::TLS_1_2),
            cert_verification: true,
        }
    }
}

/// Set the TLS configuration used by every client built afterwards
pub fn set_tls_config(config: TlsConfig) {
    if let Ok(mut cfg) = CLIENT_CONFIG.lock() {
        *cfg = config;
    }
}

fn current_tls_config() -> TlsConfig {
    match CLIENT_CONFIG.lock() {
        Ok(guard) => guard.clone(),
        // A panic while holding the lock cannot leave a TlsConfig half-written
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Client for the `generateContent` endpoint
#[derive(Clone, Debug)]
pub struct Gemini {
    pub(crate) http_client: HttpClient,
    pub(crate) api_key: SecureApiKey,
    pub base_url: String,
    pub default_model: GeminiModel,
    pub default_temperature: Option<f32>,
}

impl Gemini {
    /// Create a client with default settings for the given key
    pub fn new(api_key: impl Into<String>) -> ShowcaseResult<Self> {
        Self::from_config(&ShowcaseConfig::new(api_key)?)
    }

    pub fn from_config(config: &ShowcaseConfig) -> ShowcaseResult<Self> {
        if config.api_key.is_blank() {
            return Err(ShowcaseError::MissingApiKey { location: None });
        }
        let http_client = build_http_client(config.timeout, &current_tls_config())?;
        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            default_model: config.model.clone(),
            default_temperature: config.temperature,
        })
    }

    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.default_model = model;
        self
    }

    /// Point the client at another API root, e.g. a local mock server
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Start building a request with this client's defaults
    pub fn request(&self) -> GenerateRequestBuilder {
        GenerateRequestBuilder::from_client(self.clone())
    }
}

fn build_http_client(timeout: Duration, tls: &TlsConfig) -> ShowcaseResult<HttpClient> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    let mut builder = HttpClient::builder()
        .default_headers(headers)
        .timeout(timeout)
        .danger_accept_invalid_certs(!tls.cert_verification);

    if let Some(version) = tls.min_tls_version {
        builder = builder.min_tls_version(version);
    }

    builder
        .build()
        .map_err(|e| ShowcaseError::ConfigError(format!("failed to create HTTP client: {}", e)))
}

#[async_trait]
impl GenerationProvider for Gemini {
    async fn generate(&self, prompt: &str, schema: &AnalysisSchema) -> ShowcaseResult<String> {
        self.request().prompt(prompt)?.schema(schema).send_text().await
    }
}
