//! # nlp-showcase: NLP exercises answered by a generative model
//!
//! A small library behind an educational NLP demo. Five exercises, each
//! answered by one call to Google's Gemini `generateContent` endpoint with a
//! strict JSON response schema:
//!
//! - hybrid sentiment (Spanish text scored directly and through an English
//!   translation)
//! - VADER-style lexical scores
//! - tokenization with part-of-speech tags and named entities
//! - batch sentiment over a CSV paste
//! - sentiment over the recent posts of a social profile
//!
//! The pipeline is prompt builder, analysis gateway, result presenter and
//! view controller. The provider sits behind the
//! [`GenerationProvider`] trait, so any of the stages can be driven without
//! the network.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use nlp_showcase::{from_env, AnalysisRequest, ExerciseKind, ViewState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY (or API_KEY)
//!     let showcase = from_env()?;
//!
//!     let tab = showcase.select(ExerciseKind::Sentiment);
//!     tab.submit(AnalysisRequest::sentiment("Me encanta este curso")).await?;
//!
//!     match tab.state() {
//!         ViewState::Displaying(model) => println!("{}", serde_json::to_string_pretty(&model)?),
//!         ViewState::Failed(message) => eprintln!("{}", message),
//!         _ => {}
//!     }
//!     Ok(())
//! }
//! ```

pub mod types;
pub mod schema;
pub mod prompt;
pub mod domains;
pub mod presenter;
pub mod gateway;
pub mod client;
mod builder;
pub mod config;
pub mod controller;
pub mod showcase;
pub mod utils;

// Re-export core components
pub use builder::GenerateRequestBuilder;
pub use client::{set_tls_config, Gemini, TlsConfig};
pub use config::ShowcaseConfig;
pub use controller::{Submission, ViewController, ViewState};
pub use domains::AnalysisResult;
pub use gateway::{AnalysisGateway, GenerationProvider};
pub use presenter::{DisplayModel, SentimentCounts, SentimentLabel};
pub use prompt::{AnalysisRequest, ExerciseKind, LinguisticOption, PreparedPrompt};
pub use schema::{AnalysisSchema, ObjectSchema, SchemaViolation};
pub use showcase::Showcase;
pub use types::{
    sanitize_error_message, GeminiModel, ProviderErrorKind, SecureApiKey, ShowcaseError,
    ShowcaseResult,
};

pub mod prelude {
    //! Convenient imports for commonly used types and functions
    pub use crate::{
        from_env, AnalysisGateway, AnalysisRequest, DisplayModel, ExerciseKind, Gemini,
        GenerationProvider, LinguisticOption, SentimentLabel, Showcase, ShowcaseConfig,
        ShowcaseError, ShowcaseResult, Submission, ViewController, ViewState,
    };
    pub use crate::domains::{
        BatchTable, HybridSentimentCard, LinguisticCard, ProfileReport, VaderCard,
    };
}

// Entry point functions
pub fn new_showcase(api_key: impl Into<String>) -> ShowcaseResult<Showcase> {
    Showcase::from_config(&ShowcaseConfig::new(api_key)?)
}

pub fn from_env() -> ShowcaseResult<Showcase> {
    Showcase::from_config(&ShowcaseConfig::from_env()?)
}
