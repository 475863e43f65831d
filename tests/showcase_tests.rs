
use nlp_showcase::{AnalysisRequest, ExerciseKind, Submission, ViewState};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_helpers::*;
use tokio_test::assert_ok;

#[test]
fn test_select_mounts_one_tab_at_a_time() {
    let showcase = showcase_with(Arc::new(ScriptedProvider::new()));
    assert!(showcase.current().is_none());
    assert_eq!(showcase.exercises().len(), 5);

    let sentiment = showcase.select(ExerciseKind::Sentiment);
    assert!(sentiment.is_mounted());
    assert_eq!(showcase.current().map(|c| c.kind()), Some(ExerciseKind::Sentiment));

    let again = showcase.select(ExerciseKind::Sentiment);
    assert!(Arc::ptr_eq(&sentiment, &again));

    let batch = showcase.select(ExerciseKind::BatchCsv);
    assert!(!sentiment.is_mounted());
    assert!(batch.is_mounted());
    assert_eq!(batch.state(), ViewState::Idle);

    showcase.close();
    assert!(!batch.is_mounted());
    assert!(showcase.current().is_none());
}

#[test]
fn test_returning_to_a_tab_starts_fresh() {
    let showcase = showcase_with(Arc::new(ScriptedProvider::new()));
    let first = showcase.select(ExerciseKind::Vader);
    showcase.select(ExerciseKind::Linguistic);
    let second = showcase.select(ExerciseKind::Vader);

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!first.is_mounted());
    assert!(second.is_mounted());
}

#[tokio::test]
async fn test_switching_tabs_discards_in_flight_result() {
    let (provider, mut gates) = GatedProvider::new(&[&HYBRID_POSITIVE]);
    let showcase = showcase_with(provider);
    let sentiment = showcase.select(ExerciseKind::Sentiment);
    let gate = gates.remove(0);

    let (outcome, vader) = tokio::join!(
        sentiment.submit(AnalysisRequest::sentiment("Me encanta este curso")),
        async {
            let vader = showcase.select(ExerciseKind::Vader);
            gate.send(()).unwrap();
            vader
        }
    );

    assert_eq!(assert_ok!(outcome), Submission::Discarded);
    assert_eq!(vader.state(), ViewState::Idle);
    assert_eq!(sentiment.state().result(), None);
}
