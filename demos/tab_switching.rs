use async_trait::async_trait;
use nlp_showcase::prelude::*;
use nlp_showcase::schema::AnalysisSchema;
use std::sync::Arc;
use std::time::Duration;

/// Offline provider that answers every VADER request after a delay
struct SlowVader;

#[async_trait]
impl GenerationProvider for SlowVader {
    async fn generate(&self, _prompt: &str, _schema: &AnalysisSchema) -> ShowcaseResult<String> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(r#"{"neg": 0.0, "neu": 0.35, "pos": 0.65, "compound": 0.8}"#.to_string())
    }
}

/// Shows that a result arriving after its tab was left never reaches the new tab
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let showcase = Showcase::new(Arc::new(SlowVader));

    let vader = showcase.select(ExerciseKind::Vader);
    let mut updates = vader.subscribe();
    let pending = {
        let vader = Arc::clone(&vader);
        tokio::spawn(async move { vader.submit(AnalysisRequest::vader("¡Qué día tan bonito!")).await })
    };

    updates.changed().await?;
    println!("VADER tab: loading = {}", updates.borrow().is_loading());

    let batch = showcase.select(ExerciseKind::BatchCsv);
    println!("Switched to {} tab", batch.kind());

    let outcome = pending.await??;
    println!("Late VADER outcome: {:?}", outcome);
    println!("Batch tab state: {:?}", batch.state());

    // Same provider, fresh tab, nothing in flight
    let vader = showcase.select(ExerciseKind::Vader);
    vader.submit(AnalysisRequest::vader("¡Qué día tan bonito!")).await?;
    if let ViewState::Displaying(DisplayModel::Vader(card)) = vader.state() {
        println!("VADER: {} (compound {})", card.label, card.compound);
    }

    Ok(())
}
