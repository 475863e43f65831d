//! Exercise-specific pieces.
//!
//! Each module owns everything particular to one exercise: the typed shape
//! of the provider's answer, its response schema, its prompt wording and
//! its display card. The shared entry points ([`crate::prompt::build`],
//! [`crate::presenter::format`] and [`AnalysisResult::decode`]) dispatch
//! on [`ExerciseKind`] into these modules, so no exercise carries its own
//! copy of the validation or labelling rules.
//!
//! | kind            | module         | provider answer              |
//! |-----------------|----------------|------------------------------|
//! | `Sentiment`     | [`hybrid`]     | [`HybridSentiment`]          |
//! | `Vader`         | [`vader`]      | [`VaderScores`]              |
//! | `Linguistic`    | [`linguistic`] | [`LinguisticAnalysis`]       |
//! | `BatchCsv`      | [`batch`]      | `Vec<`[`BatchRow`]`>`        |
//! | `SocialProfile` | [`social`]     | [`SocialProfileAnalysis`]    |

pub mod batch;
pub mod hybrid;
pub mod linguistic;
pub mod social;
pub mod vader;

pub use batch::{BatchRow, BatchRowView, BatchTable};
pub use hybrid::{HybridSentiment, HybridSentimentCard};
pub use linguistic::{LinguisticAnalysis, LinguisticCard, NamedEntity, Token};
pub use social::{Post, PostView, Profile, ProfileReport, SocialProfileAnalysis};
pub use vader::{VaderCard, VaderScores};

use crate::malformed_response;
use crate::prompt::{ExerciseKind, PreparedPrompt};
use crate::types::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Parsed provider answer, tagged by exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AnalysisResult {
    Sentiment(HybridSentiment),
    Vader(VaderScores),
    Linguistic(LinguisticAnalysis),
    BatchCsv(Vec<BatchRow>),
    SocialProfile(SocialProfileAnalysis),
}

impl AnalysisResult {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            AnalysisResult::Sentiment(_) => ExerciseKind::Sentiment,
            AnalysisResult::Vader(_) => ExerciseKind::Vader,
            AnalysisResult::Linguistic(_) => ExerciseKind::Linguistic,
            AnalysisResult::BatchCsv(_) => ExerciseKind::BatchCsv,
            AnalysisResult::SocialProfile(_) => ExerciseKind::SocialProfile,
        }
    }

    /// Decode an already schema-checked JSON value into the typed result for
    /// `prepared.kind`
    pub fn decode(prepared: &PreparedPrompt, value: Value) -> ShowcaseResult<Self> {
        Ok(match prepared.kind {
            ExerciseKind::Sentiment => AnalysisResult::Sentiment(typed(value, prepared.kind)?),
            ExerciseKind::Vader => AnalysisResult::Vader(typed(value, prepared.kind)?),
            ExerciseKind::Linguistic => {
                let analysis: LinguisticAnalysis = typed(value, prepared.kind)?;
                AnalysisResult::Linguistic(analysis.restrict_to(&prepared.options))
            }
            ExerciseKind::BatchCsv => AnalysisResult::BatchCsv(typed(value, prepared.kind)?),
            ExerciseKind::SocialProfile => {
                AnalysisResult::SocialProfile(typed(value, prepared.kind)?)
            }
        })
    }

    /// The inner payload in the provider's JSON vocabulary
    pub fn payload(&self) -> serde_json::Result<Value> {
        match self {
            AnalysisResult::Sentiment(r) => serde_json::to_value(r),
            AnalysisResult::Vader(r) => serde_json::to_value(r),
            AnalysisResult::Linguistic(r) => serde_json::to_value(r),
            AnalysisResult::BatchCsv(rows) => serde_json::to_value(rows),
            AnalysisResult::SocialProfile(r) => serde_json::to_value(r),
        }
    }
}

fn typed<T: DeserializeOwned>(value: Value, kind: ExerciseKind) -> ShowcaseResult<T> {
    let source_text = value.to_string();
    serde_json::from_value(value).map_err(|e| {
        malformed_response!(
            format!("Failed to decode {} result: {}", kind, e),
            source_text,
            e
        )
    })
}
