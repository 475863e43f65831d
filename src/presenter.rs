//! Result Presenter.
//!
//! Pure mapping from an [`AnalysisResult`] to the [`DisplayModel`] a
//! rendering layer draws. All sentiment labels in the crate come from
//! [`SentimentLabel`], so every exercise applies the same thresholds.

use crate::domains::batch::BatchTable;
use crate::domains::hybrid::HybridSentimentCard;
use crate::domains::linguistic::LinguisticCard;
use crate::domains::social::ProfileReport;
use crate::domains::vader::VaderCard;
use crate::domains::{batch, hybrid, linguistic, social, vader, AnalysisResult};
use crate::prompt::ExerciseKind;
use serde::Serialize;
use std::fmt;

/// Compound scores at or above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentLabel {
    #[serde(rename = "POSITIVO")]
    Positive,
    #[serde(rename = "NEUTRO")]
    Neutral,
    #[serde(rename = "NEGATIVO")]
    Negative,
}

impl SentimentLabel {
    /// Threshold a compound score in [-1, 1]; both bounds are inclusive
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Map a provider category string; anything unrecognised is neutral
    pub fn from_category(category: &str) -> Self {
        let upper = category.to_uppercase();
        if upper.contains("POSITIVO") {
            SentimentLabel::Positive
        } else if upper.contains("NEGATIVO") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVO",
            SentimentLabel::Neutral => "NEUTRO",
            SentimentLabel::Negative => "NEGATIVO",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label distribution over a set of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

impl FromIterator<SentimentLabel> for SentimentCounts {
    fn from_iter<I: IntoIterator<Item = SentimentLabel>>(iter: I) -> Self {
        let mut counts = SentimentCounts::default();
        for label in iter {
            counts.record(label);
        }
        counts
    }
}

/// Ready-to-render form of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "view", rename_all = "snake_case")]
pub enum DisplayModel {
    Sentiment(HybridSentimentCard),
    Vader(VaderCard),
    Linguistic(LinguisticCard),
    BatchCsv(BatchTable),
    SocialProfile(ProfileReport),
}

impl DisplayModel {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            DisplayModel::Sentiment(_) => ExerciseKind::Sentiment,
            DisplayModel::Vader(_) => ExerciseKind::Vader,
            DisplayModel::Linguistic(_) => ExerciseKind::Linguistic,
            DisplayModel::BatchCsv(_) => ExerciseKind::BatchCsv,
            DisplayModel::SocialProfile(_) => ExerciseKind::SocialProfile,
        }
    }
}

/// Format a result for display. The exercise kind is carried by the result's tag.
pub fn format(result: &AnalysisResult) -> DisplayModel {
    match result {
        AnalysisResult::Sentiment(r) => DisplayModel::Sentiment(hybrid::present(r)),
        AnalysisResult::Vader(r) => DisplayModel::Vader(vader::present(r)),
        AnalysisResult::Linguistic(r) => DisplayModel::Linguistic(linguistic::present(r)),
        AnalysisResult::BatchCsv(rows) => DisplayModel::BatchCsv(batch::present(rows)),
        AnalysisResult::SocialProfile(r) => DisplayModel::SocialProfile(social::present(r)),
    }
}

/// Fixed four-decimal rendering used for scores
pub(crate) fn score(value: f64) -> String {
    format!("{:.4}", value)
}

/// A [0, 1] share as a percentage with one decimal
pub(crate) fn percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_boundaries_are_inclusive() {
        assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(-0.05), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_compound(0.0499), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(-0.0499), SentimentLabel::Neutral);
    }

    #[test]
    fn category_matching_ignores_case_and_decoration() {
        assert_eq!(SentimentLabel::from_category("muy positivo"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_category("😞 NEGATIVO"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_category("mixed"), SentimentLabel::Neutral);
    }

    #[test]
    fn formatting_helpers() {
        assert_eq!(score(0.8), "0.8000");
        assert_eq!(score(-0.2), "-0.2000");
        assert_eq!(percent(0.123), "12.3%");
    }
}
