//! Symptom Triage Example
//!
//! Trains the engine on the bundled reference data and walks through a few
//! queries, showing the outcome, the policy branch and the top candidates.

use anyhow::Result;

use symptom_triage::dataset::Dataset;
use symptom_triage::prelude::*;

fn main() -> Result<()> {
    println!("=== Symptom Triage Example ===\n");

    let dataset = Dataset::from_path("resources/symptoms.json").unwrap_or_else(|e| {
        println!("Could not read resources/symptoms.json ({e}); using built-in records");
        Dataset::reference()
    });
    println!("Loaded {} training records", dataset.len());

    let engine = TriageEngine::from_dataset(&dataset, &TriageConfig::default())?;
    println!(
        "Vocabulary: {} terms, {} conditions\n",
        engine.classifier().vocabulary_size(),
        engine.classifier().labels().len()
    );

    let queries = [
        "high fever, severe cough, body aches, chills, fatigue",
        "sharp chest pain, shortness of breath, left arm pain",
        "stomach pain, diarrhea",
        "frequent urination and blurry vision",
        "sneezing and a runny nose",
        "xyzabc qqq",
        "",
    ];

    for query in queries {
        let (outcome, decision) = engine.classify_with_decision(query);
        println!("You: {query:?}");
        println!(
            "  => {} ({:.1}%) [{decision:?}]",
            outcome.condition,
            outcome.confidence * 100.0
        );
        println!("     {}", outcome.advice);

        let ranked = engine.distribution(query)?.ranked();
        if !ranked.is_empty() {
            let top: Vec<String> = ranked
                .iter()
                .take(3)
                .map(|p| format!("{} {:.3}", p.label, p.probability))
                .collect();
            println!("     top: {}", top.join(", "));
        }
        println!();
    }

    println!("=== Lower threshold ===\n");
    let lenient = TriageEngine::from_dataset(
        &dataset,
        &TriageConfig::default().with_confidence_threshold(0.35),
    )?;
    let outcome = lenient.classify("sneezing and a runny nose");
    println!(
        "\"sneezing and a runny nose\" => {} ({:.1}%)",
        outcome.condition,
        outcome.confidence * 100.0
    );

    Ok(())
}
