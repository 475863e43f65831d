// Social profile analysis

use crate::presenter::{SentimentCounts, SentimentLabel};
use crate::schema::{AnalysisSchema, ObjectSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Free-form, e.g. "1.2M"
    pub followers: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub content: String,
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfileAnalysis {
    pub profile: Profile,
    #[serde(rename = "tweets")]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub content: String,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub name: String,
    pub followers: String,
    pub verified: bool,
    pub posts: Vec<PostView>,
    pub counts: SentimentCounts,
}

pub fn schema() -> AnalysisSchema {
    ObjectSchema::new()
        .required(
            "profile",
            ObjectSchema::new()
                .required("name", AnalysisSchema::String)
                .required("followers", AnalysisSchema::String)
                .required("verified", AnalysisSchema::Boolean)
                .into(),
        )
        .required(
            "tweets",
            AnalysisSchema::array_of(
                ObjectSchema::new()
                    .required("content", AnalysisSchema::String)
                    .required("sentiment", AnalysisSchema::String),
            ),
        )
        .into()
}

pub(crate) fn prompt(handle: &str, count: u8) -> String {
    format!(
        "Simula el análisis de un perfil de Twitter/X. Genera datos de perfil plausibles para el usuario \
         @{} (nombre, seguidores, verificado). Luego crea {} tweets recientes y realistas para este usuario. \
         Finalmente, clasifica el sentimiento de cada tweet como POSITIVO, NEGATIVO o NEUTRO.\n\n\
         Devuelve un objeto JSON con 'profile' (con 'name', 'followers' y 'verified') y 'tweets' \
         (un array de objetos con 'content' y 'sentiment').",
        handle, count
    )
}

pub(crate) fn present(analysis: &SocialProfileAnalysis) -> ProfileReport {
    let posts: Vec<PostView> = analysis
        .posts
        .iter()
        .map(|p| PostView {
            content: p.content.clone(),
            label: SentimentLabel::from_category(&p.sentiment),
        })
        .collect();
    let counts = posts.iter().map(|p| p.label).collect();

    ProfileReport {
        name: analysis.profile.name.clone(),
        followers: analysis.profile.followers.clone(),
        verified: analysis.profile.verified,
        posts,
        counts,
    }
}
