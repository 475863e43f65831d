// Batch CSV scoring

use crate::domains::vader::{scores_schema, VaderScores};
use crate::presenter::{score, SentimentLabel};
use crate::schema::{AnalysisSchema, ObjectSchema};
use serde::{Deserialize, Serialize};

/// One scored row of the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "sentimiento")]
    pub scores: VaderScores,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRowView {
    /// 1-based position in the provider's answer
    pub index: usize,
    pub text: String,
    pub compound: String,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchTable {
    pub rows: Vec<BatchRowView>,
}

pub fn schema() -> AnalysisSchema {
    AnalysisSchema::array_of(
        ObjectSchema::new()
            .required("texto", AnalysisSchema::String)
            .required("sentimiento", scores_schema().into()),
    )
}

pub(crate) fn prompt(csv: &str) -> String {
    format!(
        "Simula un procesador masivo de un archivo Excel/CSV que usa NLTK VADER para el análisis de \
         sentimiento. Analiza cada fila de texto de los siguientes datos CSV. Para cada fila, proporciona \
         el texto original y las puntuaciones VADER ('neg', 'neu', 'pos', 'compound').\n\n\
         Datos CSV:\n```csv\n{}\n```\n\n\
         Devuelve un array de objetos JSON, uno por fila, cada uno con 'texto' y 'sentimiento' \
         (con las puntuaciones VADER).",
        csv
    )
}

pub(crate) fn present(rows: &[BatchRow]) -> BatchTable {
    BatchTable {
        rows: rows
            .iter()
            .enumerate()
            .map(|(i, row)| BatchRowView {
                index: i + 1,
                text: row.text.clone(),
                compound: score(row.scores.compound),
                label: row.scores.label(),
            })
            .collect(),
    }
}
