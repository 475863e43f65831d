//! Prompt Builder.
//!
//! Turns an [`AnalysisRequest`] into the instruction text sent to the
//! provider plus the [`AnalysisSchema`] its answer must follow. Input
//! checks happen here, before anything touches the network.

use crate::domains::{batch, hybrid, linguistic, social, vader};
use crate::schema::AnalysisSchema;
use crate::types::*;
use crate::utils::{validate_range, StringValidator};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

pub(crate) const EMPTY_TEXT_MESSAGE: &str = "Por favor, ingresa un texto para analizar.";
pub(crate) const EMPTY_CSV_MESSAGE: &str = "Por favor, ingresa datos en formato CSV para analizar.";
pub(crate) const CSV_WITHOUT_ROWS_MESSAGE: &str =
    "El CSV debe incluir una fila de encabezado y al menos una fila de datos.";
pub(crate) const EMPTY_HANDLE_MESSAGE: &str = "Por favor, ingresa un usuario de Twitter.";
pub(crate) const NO_OPTIONS_MESSAGE: &str = "Por favor, selecciona al menos un tipo de análisis.";

/// Smallest and largest number of posts a profile analysis may ask for
pub const MIN_POST_COUNT: u8 = 1;
pub const MAX_POST_COUNT: u8 = 10;

/// The five simulated analysis modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Hybrid Spanish/English polarity in the style of TextBlob
    Sentiment,
    /// VADER-style neg/neu/pos/compound scores
    Vader,
    /// spaCy-style tokens and named entities
    Linguistic,
    /// VADER scores for every row of a CSV sheet
    BatchCsv,
    /// Simulated social profile with per-post sentiment
    SocialProfile,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 5] = [
        ExerciseKind::Sentiment,
        ExerciseKind::Vader,
        ExerciseKind::Linguistic,
        ExerciseKind::BatchCsv,
        ExerciseKind::SocialProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Sentiment => "sentiment",
            ExerciseKind::Vader => "vader",
            ExerciseKind::Linguistic => "linguistic",
            ExerciseKind::BatchCsv => "batch_csv",
            ExerciseKind::SocialProfile => "social_profile",
        }
    }

    /// Localized message shown when the provider call fails for any reason
    pub fn failure_message(&self) -> &'static str {
        match self {
            ExerciseKind::BatchCsv => {
                "No se pudo completar el análisis. Verifica el formato CSV y prueba de nuevo."
            }
            _ => "No se pudo completar el análisis. Inténtalo de nuevo.",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-analyses a linguistic request can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinguisticOption {
    Tokens,
    Entities,
}

impl LinguisticOption {
    /// Key of this section in the provider's JSON answer
    pub fn response_key(&self) -> &'static str {
        match self {
            LinguisticOption::Tokens => "tokens",
            LinguisticOption::Entities => "entidades",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ExerciseInput {
    Text(String),
    Csv(String),
    Profile { handle: String, count: u8 },
}

/// One user action, created per click and never modified afterwards.
///
/// Built through the per-kind constructors so the input always matches the
/// exercise. Nothing is checked until [`build`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    kind: ExerciseKind,
    input: ExerciseInput,
    options: BTreeSet<LinguisticOption>,
}

impl AnalysisRequest {
    pub fn sentiment(text: impl Into<String>) -> Self {
        Self::text(ExerciseKind::Sentiment, text)
    }

    pub fn vader(text: impl Into<String>) -> Self {
        Self::text(ExerciseKind::Vader, text)
    }

    /// Linguistic analysis with both tokens and entities
    pub fn linguistic(text: impl Into<String>) -> Self {
        Self::linguistic_with(
            text,
            [LinguisticOption::Tokens, LinguisticOption::Entities],
        )
    }

    pub fn linguistic_with(
        text: impl Into<String>,
        options: impl IntoIterator<Item = LinguisticOption>,
    ) -> Self {
        Self {
            kind: ExerciseKind::Linguistic,
            input: ExerciseInput::Text(text.into()),
            options: options.into_iter().collect(),
        }
    }

    /// Raw delimited text; the first line is the header
    pub fn batch_csv(csv: impl Into<String>) -> Self {
        Self {
            kind: ExerciseKind::BatchCsv,
            input: ExerciseInput::Csv(csv.into()),
            options: BTreeSet::new(),
        }
    }

    pub fn social_profile(handle: impl Into<String>, count: u8) -> Self {
        Self {
            kind: ExerciseKind::SocialProfile,
            input: ExerciseInput::Profile {
                handle: handle.into(),
                count,
            },
            options: BTreeSet::new(),
        }
    }

    fn text(kind: ExerciseKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            input: ExerciseInput::Text(text.into()),
            options: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn options(&self) -> &BTreeSet<LinguisticOption> {
        &self.options
    }
}

/// Output of [`build`]: what to send and what to expect back
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPrompt {
    pub kind: ExerciseKind,
    pub prompt: String,
    pub schema: AnalysisSchema,
    /// Requested linguistic sections; empty for other kinds
    pub options: BTreeSet<LinguisticOption>,
}

/// Validate `request` and produce its prompt and response schema
pub fn build(request: &AnalysisRequest) -> ShowcaseResult<PreparedPrompt> {
    let (prompt, schema) = match (&request.kind, &request.input) {
        (ExerciseKind::Sentiment, ExerciseInput::Text(text)) => {
            let text = require_text(text, EMPTY_TEXT_MESSAGE)?;
            (hybrid::prompt(text), hybrid::schema())
        }
        (ExerciseKind::Vader, ExerciseInput::Text(text)) => {
            let text = require_text(text, EMPTY_TEXT_MESSAGE)?;
            (vader::prompt(text), vader::schema())
        }
        (ExerciseKind::Linguistic, ExerciseInput::Text(text)) => {
            let text = require_text(text, EMPTY_TEXT_MESSAGE)?;
            if request.options.is_empty() {
                return Err(ShowcaseError::validation(NO_OPTIONS_MESSAGE));
            }
            (
                linguistic::prompt(text, &request.options),
                linguistic::schema(&request.options),
            )
        }
        (ExerciseKind::BatchCsv, ExerciseInput::Csv(csv)) => {
            let csv = require_text(csv, EMPTY_CSV_MESSAGE)?;
            let lines = csv.lines().filter(|l| !l.trim().is_empty()).count();
            if lines < 2 {
                return Err(ShowcaseError::validation(CSV_WITHOUT_ROWS_MESSAGE));
            }
            (batch::prompt(csv), batch::schema())
        }
        (ExerciseKind::SocialProfile, ExerciseInput::Profile { handle, count }) => {
            let handle = handle.trim().trim_start_matches('@').trim();
            let handle = StringValidator::not_blank(handle, EMPTY_HANDLE_MESSAGE)?;
            let count = validate_range(*count, MIN_POST_COUNT, MAX_POST_COUNT, "El número de tweets")?;
            (social::prompt(&handle, count), social::schema())
        }
        (kind, _) => {
            return Err(ShowcaseError::InvalidParameter(format!(
                "input does not match exercise '{}'",
                kind
            )))
        }
    };

    Ok(PreparedPrompt {
        kind: request.kind,
        prompt,
        schema,
        options: request.options.clone(),
    })
}

fn require_text<'a>(value: &'a str, message: &str) -> ShowcaseResult<&'a str> {
    if value.trim().is_empty() {
        Err(ShowcaseError::validation(message))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_rejected() {
        let err = build(&AnalysisRequest::vader("  \n\t ")).unwrap_err();
        assert_eq!(err.user_message("generic"), EMPTY_TEXT_MESSAGE);
    }

    #[test]
    fn raw_input_is_embedded_verbatim() {
        let text = "  ¡Qué   bien!\n\"citado\"  ";
        let prepared = build(&AnalysisRequest::sentiment(text)).unwrap();
        assert!(prepared.prompt.contains(text));
    }

    #[test]
    fn prompt_is_deterministic() {
        let request = AnalysisRequest::linguistic("Microsoft abrió oficinas en Bogotá.");
        assert_eq!(build(&request).unwrap(), build(&request).unwrap());
    }

    #[test]
    fn linguistic_requires_an_option() {
        let request = AnalysisRequest::linguistic_with("texto", Vec::new());
        let err = build(&request).unwrap_err();
        assert_eq!(err.user_message("generic"), NO_OPTIONS_MESSAGE);
    }

    #[test]
    fn profile_count_bounds() {
        assert!(build(&AnalysisRequest::social_profile("elonmusk", 0)).is_err());
        assert!(build(&AnalysisRequest::social_profile("elonmusk", 11)).is_err());
        assert!(build(&AnalysisRequest::social_profile("elonmusk", 1)).is_ok());
        assert!(build(&AnalysisRequest::social_profile("elonmusk", 10)).is_ok());
    }

    #[test]
    fn profile_handle_drops_leading_at() {
        let prepared = build(&AnalysisRequest::social_profile("@nasa", 3)).unwrap();
        assert!(prepared.prompt.contains("@nasa"));
        assert!(!prepared.prompt.contains("@@nasa"));
        let err = build(&AnalysisRequest::social_profile(" @ ", 3)).unwrap_err();
        assert_eq!(err.user_message("generic"), EMPTY_HANDLE_MESSAGE);
    }

    #[test]
    fn csv_needs_a_data_row() {
        let err = build(&AnalysisRequest::batch_csv("id,texto\n")).unwrap_err();
        assert_eq!(err.user_message("generic"), CSV_WITHOUT_ROWS_MESSAGE);
    }
}
