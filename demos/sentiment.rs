// Import the main modules using prelude for convenience
use nlp_showcase::prelude::*;

/// Runs the hybrid sentiment exercise once and prints what the view would show
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Hybrid Sentiment Example");

    let showcase = match from_env() {
        Ok(showcase) => showcase,
        Err(e) => {
            println!("Set GEMINI_API_KEY to run this example.");
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let tab = showcase.select(ExerciseKind::Sentiment);

    // Blank input is rejected before any request goes out
    match tab.submit(AnalysisRequest::sentiment("   ")).await {
        Ok(_) => println!("This should not happen"),
        Err(e) => println!("Expected validation error: {}", e),
    }

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Me encanta este curso, aunque a veces es difícil.".to_string());
    println!("\nAnalyzing: {}", text);
    tab.submit(AnalysisRequest::sentiment(text)).await?;

    match tab.state() {
        ViewState::Displaying(DisplayModel::Sentiment(card)) => {
            println!("Sentiment:    {}", card.label);
            println!("Translation:  {}", card.translated_text);
            println!("Polarity:     {} ({})", card.polarity, card.polarity_gauge);
            println!("Subjectivity: {}", card.subjectivity);
            println!("Spanish / English polarity: {} / {}", card.spanish_polarity, card.english_polarity);
        }
        ViewState::Failed(message) => println!("{}", message),
        other => println!("Unexpected state: {:?}", other),
    }

    Ok(())
}
