// Hybrid sentiment (TextBlob style)

use crate::presenter::{percent, score, SentimentLabel};
use crate::schema::{AnalysisSchema, ObjectSchema};
use serde::{Deserialize, Serialize};

/// Share of the final polarity taken from the Spanish reading; the rest
/// comes from the English translation
pub const SPANISH_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridSentiment {
    pub original_text: String,
    pub translated_text: String,
    pub spanish_polarity: f64,
    pub english_polarity: f64,
    pub final_polarity: f64,
    pub final_subjectivity: f64,
    pub final_sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridSentimentCard {
    pub label: SentimentLabel,
    pub original_text: String,
    pub translated_text: String,
    pub polarity: String,
    /// Polarity mapped from [-1, 1] onto a 0-100% gauge
    pub polarity_gauge: String,
    pub subjectivity: String,
    pub spanish_polarity: String,
    pub english_polarity: String,
}

pub fn schema() -> AnalysisSchema {
    ObjectSchema::new()
        .required("original_text", AnalysisSchema::String)
        .required("translated_text", AnalysisSchema::String)
        .required("spanish_polarity", AnalysisSchema::Number)
        .required("english_polarity", AnalysisSchema::Number)
        .required("final_polarity", AnalysisSchema::Number)
        .required("final_subjectivity", AnalysisSchema::Number)
        .required("final_sentiment", AnalysisSchema::String)
        .into()
}

pub(crate) fn prompt(text: &str) -> String {
    let spanish = (SPANISH_WEIGHT * 100.0).round() as u32;
    format!(
        "Realiza un análisis de sentimiento híbrido, al estilo de TextBlob, del siguiente texto en español. \
         Primero analiza el sentimiento directamente en español. Después traduce el texto al inglés y analiza \
         esa traducción. Combina ambos resultados ({}% español, {}% inglés) para obtener la polaridad \
         (de -1 a 1) y la subjetividad (de 0 a 1) finales, y clasifica el sentimiento final como \
         'POSITIVO', 'NEGATIVO' o 'NEUTRO'.\n\nTexto: \"{}\"\n\nDevuelve el resultado en formato JSON.",
        spanish,
        100 - spanish,
        text
    )
}

pub(crate) fn present(result: &HybridSentiment) -> HybridSentimentCard {
    HybridSentimentCard {
        label: SentimentLabel::from_category(&result.final_sentiment),
        original_text: result.original_text.clone(),
        translated_text: result.translated_text.clone(),
        polarity: score(result.final_polarity),
        polarity_gauge: percent((result.final_polarity + 1.0) / 2.0),
        subjectivity: score(result.final_subjectivity),
        spanish_polarity: score(result.spanish_polarity),
        english_polarity: score(result.english_polarity),
    }
}
