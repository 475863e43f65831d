//! End-to-end runs of each exercise against a scripted provider


use nlp_showcase::presenter::SentimentCounts;
use nlp_showcase::{
    AnalysisRequest, DisplayModel, ExerciseKind, LinguisticOption, SentimentLabel, ShowcaseError,
    Submission, ViewState,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_helpers::*;
use tokio_test::assert_ok;

fn displayed(state: ViewState) -> DisplayModel {
    match state {
        ViewState::Displaying(model) => model,
        other => panic!("expected a displayed result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hybrid_sentiment_positive() {
    let provider = Arc::new(ScriptedProvider::with_json(&HYBRID_POSITIVE));
    let controller = controller_with(ExerciseKind::Sentiment, provider.clone());

    let outcome = assert_ok!(
        controller
            .submit(AnalysisRequest::sentiment("Me encanta este curso"))
            .await
    );
    assert_eq!(outcome, Submission::Applied);

    let DisplayModel::Sentiment(card) = displayed(controller.state()) else {
        panic!("wrong display model");
    };
    assert_eq!(card.label, SentimentLabel::Positive);
    assert_eq!(card.polarity, "0.8000");
    assert_eq!(card.polarity_gauge, "90.0%");
    assert_eq!(card.subjectivity, "0.6000");
    assert_eq!(card.translated_text, "I love this course");
    assert_eq!(card.spanish_polarity, "0.5000");
    assert_eq!(card.english_polarity, "0.9000");

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Me encanta este curso\""));
}

#[tokio::test]
async fn test_batch_rows_are_labelled_in_order() {
    let provider = Arc::new(ScriptedProvider::with_json(&BATCH_TWO_ROWS));
    let controller = controller_with(ExerciseKind::BatchCsv, provider.clone());

    let csv = "texto\nExcelente servicio\nProducto lento";
    assert_ok!(controller.submit(AnalysisRequest::batch_csv(csv)).await);

    let DisplayModel::BatchCsv(table) = displayed(controller.state()) else {
        panic!("wrong display model");
    };
    let rows: Vec<_> = table
        .rows
        .iter()
        .map(|r| (r.index, r.text.as_str(), r.compound.as_str(), r.label))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "Excelente servicio", "0.6000", SentimentLabel::Positive),
            (2, "Producto lento", "-0.2000", SentimentLabel::Negative),
        ]
    );
    assert!(provider.prompts()[0].contains("```csv\ntexto\nExcelente servicio\nProducto lento\n```"));
}

#[tokio::test]
async fn test_transport_failure_shows_generic_message() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_error(ShowcaseError::transport_error(
        "503 Service Unavailable",
        Some(503),
        None,
        None::<std::io::Error>,
        None,
    ));
    let controller = controller_with(ExerciseKind::Vader, provider.clone());

    let outcome = assert_ok!(controller.submit(AnalysisRequest::vader("Hola")).await);
    assert_eq!(outcome, Submission::Applied);
    assert_eq!(
        controller.state(),
        ViewState::Failed("No se pudo completar el análisis. Inténtalo de nuevo.".to_string())
    );
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_social_profile_counts() {
    let provider = Arc::new(ScriptedProvider::with_json(&PROFILE_FIVE_POSTS));
    let controller = controller_with(ExerciseKind::SocialProfile, provider.clone());

    assert_ok!(
        controller
            .submit(AnalysisRequest::social_profile("@elena_dev", 5))
            .await
    );

    let DisplayModel::SocialProfile(report) = displayed(controller.state()) else {
        panic!("wrong display model");
    };
    assert_eq!(
        report.counts,
        SentimentCounts {
            positive: 2,
            neutral: 2,
            negative: 1
        }
    );
    assert_eq!(report.counts.total(), report.posts.len());
    assert_eq!(report.name, "Elena Ruiz");
    assert!(report.verified);

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("@elena_dev"));
    assert!(!prompt.contains("@@"));
    assert!(prompt.contains("crea 5 tweets"));
}

#[tokio::test]
async fn test_linguistic_both_sections() {
    let provider = Arc::new(ScriptedProvider::with_json(&LINGUISTIC_FULL));
    let controller = controller_with(ExerciseKind::Linguistic, provider);

    assert_ok!(controller.submit(AnalysisRequest::linguistic("Ana vive en Madrid")).await);

    let DisplayModel::Linguistic(card) = displayed(controller.state()) else {
        panic!("wrong display model");
    };
    assert_eq!(card.tokens.as_ref().map(Vec::len), Some(4));
    let labels: Vec<_> = card
        .entities
        .unwrap_or_default()
        .into_iter()
        .map(|e| (e.text, e.label))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("Ana".to_string(), "PER".to_string()),
            ("Madrid".to_string(), "LOC".to_string())
        ]
    );
    assert!(card.notices.is_empty());
}

#[tokio::test]
async fn test_linguistic_requested_section_empty_gets_notice() {
    let provider = Arc::new(ScriptedProvider::with_json(&json!({ "entidades": [] })));
    let controller = controller_with(ExerciseKind::Linguistic, provider.clone());

    assert_ok!(
        controller
            .submit(AnalysisRequest::linguistic_with(
                "la casa",
                [LinguisticOption::Entities]
            ))
            .await
    );

    let DisplayModel::Linguistic(card) = displayed(controller.state()) else {
        panic!("wrong display model");
    };
    assert_eq!(card.tokens, None);
    assert_eq!(card.entities, None);
    assert_eq!(card.notices, vec!["No se encontraron entidades nombradas."]);
    assert!(!provider.prompts()[0].contains("Para 'tokens'"));
}

#[tokio::test]
async fn test_linguistic_missing_or_null_section_gets_notice() {
    let tokens_only = json!({ "tokens": [{ "text": "Hola", "pos": "INTJ", "explanation": "Interjección" }] });
    let null_entities = json!({ "tokens": [], "entidades": null });

    for (answer, tokens, notices) in [
        (&tokens_only, Some(1), vec!["No se encontraron entidades nombradas."]),
        (
            &null_entities,
            None,
            vec!["No se encontraron tokens.", "No se encontraron entidades nombradas."],
        ),
    ] {
        let provider = Arc::new(ScriptedProvider::with_json(answer));
        let controller = controller_with(ExerciseKind::Linguistic, provider);

        let outcome = assert_ok!(controller.submit(AnalysisRequest::linguistic("Hola")).await);
        assert_eq!(outcome, Submission::Applied);

        let DisplayModel::Linguistic(card) = displayed(controller.state()) else {
            panic!("wrong display model");
        };
        assert_eq!(card.tokens.as_ref().map(Vec::len), tokens);
        assert_eq!(card.entities, None);
        assert_eq!(card.notices, notices);
    }
}

#[tokio::test]
async fn test_vader_neutral_band() {
    let provider = Arc::new(ScriptedProvider::with_json(
        &json!({ "neg": 0.1, "neu": 0.8, "pos": 0.1, "compound": 0.0499 }),
    ));
    let controller = controller_with(ExerciseKind::Vader, provider);

    assert_ok!(controller.submit(AnalysisRequest::vader("Es un día normal")).await);
    let DisplayModel::Vader(card) = displayed(controller.state()) else {
        panic!("wrong display model");
    };
    assert_eq!(card.label, SentimentLabel::Neutral);
    assert_eq!(card.neutral, "80.0%");
}
