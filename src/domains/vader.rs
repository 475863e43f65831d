// VADER-style scoring

use crate::presenter::{percent, score, SentimentLabel};
use crate::schema::{AnalysisSchema, ObjectSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaderScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl VaderScores {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaderCard {
    pub label: SentimentLabel,
    pub negative: String,
    pub neutral: String,
    pub positive: String,
    pub compound: String,
}

/// Score object shared with the batch exercise
pub(crate) fn scores_schema() -> ObjectSchema {
    ObjectSchema::new()
        .required("neg", AnalysisSchema::Number)
        .required("neu", AnalysisSchema::Number)
        .required("pos", AnalysisSchema::Number)
        .required("compound", AnalysisSchema::Number)
}

pub fn schema() -> AnalysisSchema {
    scores_schema().into()
}

pub(crate) fn prompt(text: &str) -> String {
    format!(
        "Simula el analizador de sentimientos VADER de NLTK. Analiza el siguiente texto y proporciona las \
         puntuaciones 'neg', 'neu' y 'pos' (entre 0 y 1) y 'compound' (entre -1 y 1). El texto está en \
         español; tradúcelo mentalmente al inglés para un mejor análisis VADER.\n\nTexto: \"{}\"\n\n\
         Devuelve el resultado en formato JSON.",
        text
    )
}

pub(crate) fn present(scores: &VaderScores) -> VaderCard {
    VaderCard {
        label: scores.label(),
        negative: percent(scores.neg),
        neutral: percent(scores.neu),
        positive: percent(scores.pos),
        compound: score(scores.compound),
    }
}
