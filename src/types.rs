// Core types and errors

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// The result type used throughout the crate
pub type ShowcaseResult<T> = Result<T, ShowcaseError>;

/// Convert reqwest::Error to a transport failure
impl From<reqwest::Error> for ShowcaseError {
    fn from(err: reqwest::Error) -> Self {
        let details = if err.is_timeout() {
            Some("request timed out".to_string())
        } else if err.is_connect() {
            Some("connection failed".to_string())
        } else {
            None
        };
        ShowcaseError::transport_error(
            sanitize_error_message(&err.to_string()),
            err.status().map(|s| s.as_u16()),
            details,
            Some(err),
            None,
        )
    }
}

/// A secure container for API keys that zeroes its memory when dropped
pub struct SecureApiKey {
    key: String,
}

impl SecureApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty()
    }
}

impl Deref for SecureApiKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.key
    }
}

impl Drop for SecureApiKey {
    fn drop(&mut self) {
        // Zero bytes keep the buffer valid UTF-8
        unsafe {
            let bytes = self.key.as_bytes_mut();
            bytes.iter_mut().for_each(|b| *b = 0);
        }
    }
}

impl fmt::Debug for SecureApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureApiKey([REDACTED])")
    }
}

impl fmt::Display for SecureApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED API KEY]")
    }
}

impl Clone for SecureApiKey {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
        }
    }
}

/// Which side of the provider boundary a failure came from.
///
/// Both kinds are shown to users the same way; the distinction only
/// matters for logs and for callers that want to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// Network failure or a non-success HTTP status from the provider
    Transport,
    /// The provider answered, but not with JSON matching the expected schema
    MalformedResponse,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::Transport => f.write_str("transport"),
            ProviderErrorKind::MalformedResponse => f.write_str("malformed response"),
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum ShowcaseError {
    /// Rejected input; the message is user-facing and shown verbatim
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Provider error ({kind}): {message}")]
    ProviderError {
        kind: ProviderErrorKind,
        message: String,
        status: Option<u16>,
        details: Option<String>,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("API key not provided")]
    MissingApiKey { location: Option<String> },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Caller misuse that no user input can trigger
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Gemini model identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeminiModel {
    Flash25,
    FlashLite25,
    Pro25,
    Flash20,
    /// Use a custom model identifier
    Custom(String),
}

impl GeminiModel {
    pub fn as_str(&self) -> &str {
        match self {
            GeminiModel::Flash25 => "gemini-2.5-flash",
            GeminiModel::FlashLite25 => "gemini-2.5-flash-lite",
            GeminiModel::Pro25 => "gemini-2.5-pro",
            GeminiModel::Flash20 => "gemini-2.0-flash",
            GeminiModel::Custom(id) => id,
        }
    }
}

impl Default for GeminiModel {
    fn default() -> Self {
        GeminiModel::Flash25
    }
}

impl FromStr for GeminiModel {
    type Err = ShowcaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        if id.is_empty() {
            return Err(ShowcaseError::ConfigError("model identifier cannot be empty".into()));
        }
        Ok(match id {
            "gemini-2.5-flash" => GeminiModel::Flash25,
            "gemini-2.5-flash-lite" => GeminiModel::FlashLite25,
            "gemini-2.5-pro" => GeminiModel::Pro25,
            "gemini-2.0-flash" => GeminiModel::Flash20,
            other => GeminiModel::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---- generateContent wire types ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning summaries some models return alongside the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub model_version: Option<String>,
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateResponse {
    /// Concatenated answer text of the first candidate, skipping thought parts
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// Error envelope returned by the provider on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

impl ShowcaseError {
    pub fn transport_error<T: Into<String>>(
        message: T,
        status: Option<u16>,
        details: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::ProviderError {
            kind: ProviderErrorKind::Transport,
            message: message.into(),
            status,
            details,
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn malformed_response<T: Into<String>>(
        message: T,
        source_text: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::ProviderError {
            kind: ProviderErrorKind::MalformedResponse,
            message: message.into(),
            status: None,
            details: source_text,
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn simple_transport_error<T: Into<String>>(message: T) -> Self {
        Self::transport_error(message, None, None, None::<std::io::Error>, None)
    }

    pub fn simple_malformed_response<T: Into<String>>(message: T) -> Self {
        Self::malformed_response(message, None, None::<std::io::Error>, None)
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::ValidationError(message.into())
    }

    fn log(&self) {
        match (self.location(), self.details()) {
            (Some(loc), Some(details)) => log::error!("{} at {} ({})", self, loc, details),
            (Some(loc), None) => log::error!("{} at {}", self, loc),
            (None, Some(details)) => log::error!("{} ({})", self, details),
            (None, None) => log::error!("{}", self),
        }
    }

    /// Provider failure kind, `None` for validation and configuration errors
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::ProviderError { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderError { status, .. } => *status,
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::ProviderError { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::ProviderError { location, .. } => location.as_deref(),
            Self::MissingApiKey { location } => location.as_deref(),
            _ => None,
        }
    }

    pub fn source_error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        match self {
            Self::ProviderError { source, .. } => source.as_ref().map(|s| s.as_ref()),
            _ => None,
        }
    }

    /// Text a user may see for this error.
    ///
    /// Validation messages are already localized and pass through; every
    /// other failure collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::ValidationError(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Build a transport error carrying the call site
#[macro_export]
macro_rules! transport_error {
    ($message:expr) => {
        $crate::types::ShowcaseError::transport_error(
            $message, None, None, None::<std::io::Error>, Some(concat!(file!(), ":", line!())))
    };
    ($message:expr, $status:expr) => {
        $crate::types::ShowcaseError::transport_error(
            $message, $status, None, None::<std::io::Error>, Some(concat!(file!(), ":", line!())))
    };
    ($message:expr, $status:expr, $details:expr) => {
        $crate::types::ShowcaseError::transport_error(
            $message, $status, Some($details), None::<std::io::Error>, Some(concat!(file!(), ":", line!())))
    };
}

/// Build a malformed-response error carrying the call site
#[macro_export]
macro_rules! malformed_response {
    ($message:expr) => {
        $crate::types::ShowcaseError::malformed_response(
            $message, None, None::<std::io::Error>, Some(concat!(file!(), ":", line!())))
    };
    ($message:expr, $source_text:expr) => {
        $crate::types::ShowcaseError::malformed_response(
            $message, Some($source_text), None::<std::io::Error>, Some(concat!(file!(), ":", line!())))
    };
    ($message:expr, $source_text:expr, $source:expr) => {
        $crate::types::ShowcaseError::malformed_response(
            $message, Some($source_text), Some($source), Some(concat!(file!(), ":", line!())))
    };
}

lazy_static! {
    static ref SECRET_PATTERN: Regex = Regex::new(r"[A-Za-z0-9_-]{20,}").unwrap();
}

/// Redact key-like tokens from provider error text before it is stored or logged
pub fn sanitize_error_message(message: &str) -> String {
    SECRET_PATTERN.replace_all(message, "[REDACTED]").into_owned()
}
