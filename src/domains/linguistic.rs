// Linguistic analysis (spaCy style)

use crate::prompt::LinguisticOption;
use crate::schema::{AnalysisSchema, ObjectSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub(crate) const NO_TOKENS_NOTICE: &str = "No se encontraron tokens.";
pub(crate) const NO_ENTITIES_NOTICE: &str = "No se encontraron entidades nombradas.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Part-of-speech tag
    pub pos: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    pub label: String,
    #[serde(default)]
    pub explanation: String,
}

/// Requested sections of a linguistic answer.
///
/// A section that was not requested is `None`; one that was requested but
/// came back empty is `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinguisticAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
    #[serde(rename = "entidades", default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<NamedEntity>>,
}

impl LinguisticAnalysis {
    /// Drop sections that were not asked for and fill in the ones that were
    pub(crate) fn restrict_to(self, options: &BTreeSet<LinguisticOption>) -> Self {
        let wants = |o: LinguisticOption| options.contains(&o);
        Self {
            tokens: wants(LinguisticOption::Tokens).then(|| self.tokens.unwrap_or_default()),
            entities: wants(LinguisticOption::Entities).then(|| self.entities.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinguisticCard {
    /// Present only when tokens were requested and found
    pub tokens: Option<Vec<Token>>,
    /// Present only when entities were requested and found
    pub entities: Option<Vec<NamedEntity>>,
    /// Empty-state messages for requested sections that came back empty
    pub notices: Vec<&'static str>,
}

/// Response schema holding only the requested sections.
///
/// Sections are optional: an omitted or `null` section decodes as empty
/// and is shown with its empty-state notice.
pub fn schema(options: &BTreeSet<LinguisticOption>) -> AnalysisSchema {
    let mut object = ObjectSchema::new();
    for option in options {
        let item = match option {
            LinguisticOption::Tokens => ObjectSchema::new()
                .required("text", AnalysisSchema::String)
                .required("pos", AnalysisSchema::String)
                .optional("explanation", AnalysisSchema::String),
            LinguisticOption::Entities => ObjectSchema::new()
                .required("text", AnalysisSchema::String)
                .required("label", AnalysisSchema::String)
                .optional("explanation", AnalysisSchema::String),
        };
        object = object.optional(option.response_key(), AnalysisSchema::array_of(item));
    }
    object.into()
}

pub(crate) fn prompt(text: &str, options: &BTreeSet<LinguisticOption>) -> String {
    let requested: Vec<&str> = options.iter().map(|o| o.response_key()).collect();
    let mut prompt = format!(
        "Realiza un análisis lingüístico avanzado, al estilo de spaCy, del siguiente texto. \
         Análisis solicitados: {}.\n\nTexto: \"{}\"\n\n\
         Devuelve un objeto JSON con una clave por cada análisis solicitado.",
        requested.join(", "),
        text
    );
    for option in options {
        prompt.push('\n');
        prompt.push_str(match option {
            LinguisticOption::Tokens => {
                "Para 'tokens', devuelve un array de objetos con 'text', 'pos' (etiqueta Part-of-Speech) y 'explanation'."
            }
            LinguisticOption::Entities => {
                "Para 'entidades', devuelve un array de objetos con 'text', 'label' (tipo de entidad) y 'explanation'."
            }
        });
    }
    prompt
}

pub(crate) fn present(analysis: &LinguisticAnalysis) -> LinguisticCard {
    let mut notices = Vec::new();
    if matches!(&analysis.tokens, Some(t) if t.is_empty()) {
        notices.push(NO_TOKENS_NOTICE);
    }
    if matches!(&analysis.entities, Some(e) if e.is_empty()) {
        notices.push(NO_ENTITIES_NOTICE);
    }
    LinguisticCard {
        tokens: analysis.tokens.clone().filter(|t| !t.is_empty()),
        entities: analysis.entities.clone().filter(|e| !e.is_empty()),
        notices,
    }
}
