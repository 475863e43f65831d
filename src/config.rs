//! Process-wide configuration.
//!
//! Read once at startup. A missing credential fails here, before any
//! request could go out unauthenticated.

use crate::types::*;
use crate::utils::validate_range;
use std::time::Duration;
use url::Url;

/// Environment variable holding the provider key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Fallback key variable
pub const FALLBACK_API_KEY_VAR: &str = "API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct ShowcaseConfig {
    pub api_key: SecureApiKey,
    pub model: GeminiModel,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: Option<f32>,
}

impl ShowcaseConfig {
    /// Configuration with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> ShowcaseResult<Self> {
        let api_key = SecureApiKey::new(api_key);
        if api_key.is_blank() {
            return Err(ShowcaseError::MissingApiKey {
                location: Some(concat!(file!(), ":", line!()).to_string()),
            });
        }
        Ok(Self {
            api_key,
            model: GeminiModel::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            temperature: None,
        })
    }

    /// Read configuration from the process environment
    pub fn from_env() -> ShowcaseResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> ShowcaseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let key = present(API_KEY_VAR)
            .or_else(|| present(FALLBACK_API_KEY_VAR))
            .ok_or(ShowcaseError::MissingApiKey { location: None })?;
        let mut config = Self::new(key)?;

        if let Some(model) = present(MODEL_VAR) {
            config.model = model.parse()?;
        }
        if let Some(base_url) = present(BASE_URL_VAR) {
            config = config.with_base_url(base_url)?;
        }
        if let Some(secs) = present(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ShowcaseError::ConfigError(format!("{} must be a whole number of seconds", TIMEOUT_VAR))
            })?;
            config = config.with_timeout(Duration::from_secs(secs))?;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    /// Set the API root; only http(s) URLs are accepted
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> ShowcaseResult<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| ShowcaseError::ConfigError(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ShowcaseError::ConfigError(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        self.base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> ShowcaseResult<Self> {
        if timeout.is_zero() {
            return Err(ShowcaseError::ConfigError("timeout must be greater than 0".into()));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Sampling temperature sent with every request (0.0 to 2.0)
    pub fn with_temperature(mut self, temperature: f32) -> ShowcaseResult<Self> {
        self.temperature = Some(validate_range(temperature, 0.0, 2.0, "temperature")?);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_key_fails_fast() {
        let err = ShowcaseConfig::from_lookup(lookup(&[(MODEL_VAR, "gemini-2.5-pro")])).unwrap_err();
        assert!(matches!(err, ShowcaseError::MissingApiKey { .. }));

        let err = ShowcaseConfig::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, ShowcaseError::MissingApiKey { .. }));
    }

    #[test]
    fn fallback_key_and_overrides() {
        let config = ShowcaseConfig::from_lookup(lookup(&[
            (FALLBACK_API_KEY_VAR, "k-123"),
            (MODEL_VAR, "gemini-2.5-pro"),
            (BASE_URL_VAR, "http://localhost:8080/v1beta/"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_str(), "k-123");
        assert_eq!(config.model, GeminiModel::Pro25);
        assert_eq!(config.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn primary_key_wins_over_fallback() {
        let config = ShowcaseConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "primary"),
            (FALLBACK_API_KEY_VAR, "fallback"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_str(), "primary");
        assert_eq!(config.model, GeminiModel::Flash25);
    }

    #[test]
    fn rejects_bad_base_url_and_timeout() {
        let config = ShowcaseConfig::new("k").unwrap();
        assert!(config.clone().with_base_url("ftp://example.com").is_err());
        assert!(config.clone().with_base_url("not a url").is_err());
        assert!(config.with_timeout(Duration::ZERO).is_err());
    }

    #[test]
    fn key_is_redacted_in_debug() {
        let config = ShowcaseConfig::new("super-secret").unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
