//! End-to-end scenarios for the triage engine.

use std::io::Write;
use std::sync::Arc;

use symptom_triage::config::TriageConfig;
use symptom_triage::dataset::{Dataset, SymptomRecord};
use symptom_triage::error::{Result, TriageError};
use symptom_triage::triage::{Decision, TriageEngine};
use tempfile::NamedTempFile;

const EMERGENCY_ADVICE: &str = "Your symptoms may indicate a medical emergency. Please seek \
                                immediate medical attention or call emergency services.";
const UNCERTAIN_ADVICE: &str = "I am not confident in a specific diagnosis. Please provide more \
                                details or consult a healthcare professional.";

#[test]
fn test_empty_input() -> Result<()> {
    let engine = TriageEngine::reference()?;
    let outcome = engine.classify("");

    assert_eq!(outcome.condition, "Unknown");
    assert_eq!(outcome.confidence, 0.0);
    assert_eq!(outcome.advice, "Please enter some symptoms to get a response.");

    Ok(())
}

#[test]
fn test_flu_description() -> Result<()> {
    let engine = TriageEngine::reference()?;
    let (outcome, decision) =
        engine.classify_with_decision("high fever, severe cough, body aches, chills, fatigue");

    assert_eq!(decision, Decision::Confident);
    assert_eq!(outcome.condition, "Flu");
    assert!(outcome.confidence >= 0.55);

    Ok(())
}

#[test]
fn test_emergency_description() -> Result<()> {
    let engine = TriageEngine::reference()?;
    let (outcome, decision) =
        engine.classify_with_decision("sharp chest pain, shortness of breath, left arm pain");

    assert_eq!(decision, Decision::Emergency);
    assert_eq!(outcome.condition, "Emergency");
    assert_eq!(outcome.advice, EMERGENCY_ADVICE);

    Ok(())
}

#[test]
fn test_unrecognized_words() -> Result<()> {
    let engine = TriageEngine::reference()?;
    let outcome = engine.classify("xyzabc qqq");

    assert_eq!(outcome.condition, "Uncertain/General");
    assert!(outcome.confidence < 0.55);
    assert_eq!(outcome.advice, UNCERTAIN_ADVICE);

    Ok(())
}

#[test]
fn test_punctuation_and_case_do_not_matter() -> Result<()> {
    let engine = TriageEngine::reference()?;
    let plain = engine.classify("stomach pain diarrhea nausea vomiting");
    let noisy = engine.classify("  STOMACH-pain!!! Diarrhea, nausea & vomiting?? ");

    assert_eq!(plain, noisy);
    assert_eq!(plain.condition, "Gastroenteritis");

    Ok(())
}

#[test]
fn test_every_training_record_is_recognized() -> Result<()> {
    let dataset = Dataset::reference();
    let engine = TriageEngine::from_dataset(&dataset, &TriageConfig::default())?;

    for record in dataset.records() {
        let outcome = engine.classify(&record.symptoms);
        assert_eq!(
            outcome.condition, record.condition,
            "{:?} was classified as {}",
            record.symptoms, outcome.condition
        );
        assert!(outcome.confidence >= 0.55);
    }

    Ok(())
}

#[test]
fn test_threshold_equal_to_confidence_is_confident() -> Result<()> {
    let dataset = Dataset::reference();
    let query = "frequent urination and blurry vision";
    let confidence = TriageEngine::reference()?.classify(query).confidence;

    let at = TriageEngine::from_dataset(
        &dataset,
        &TriageConfig::default().with_confidence_threshold(confidence),
    )?;
    let (outcome, decision) = at.classify_with_decision(query);
    assert_eq!(decision, Decision::Confident);
    assert_eq!(outcome.condition, "Diabetes");

    let above = TriageEngine::from_dataset(
        &dataset,
        &TriageConfig::default().with_confidence_threshold(confidence + 1e-9),
    )?;
    assert_eq!(above.classify_with_decision(query).1, Decision::Uncertain);

    Ok(())
}

#[test]
fn test_low_confidence_emergency_is_uncertain() -> Result<()> {
    let engine = TriageEngine::reference()?;
    let dist = engine.distribution("qqq")?;
    let best = dist.best().expect("non-empty distribution");
    assert_eq!(best.label, "Emergency");

    let (outcome, decision) = engine.classify_with_decision("qqq");
    assert_eq!(decision, Decision::Uncertain);
    assert_eq!(outcome.confidence, best.confidence);

    Ok(())
}

#[test]
fn test_unknown_advice_falls_back() -> Result<()> {
    let dataset = Dataset::new(vec![
        SymptomRecord {
            symptoms: "itchy red eyes".to_string(),
            condition: "Conjunctivitis".to_string(),
            advice: None,
        },
        SymptomRecord::new("sore throat, fever", "Strep Throat", "See a doctor."),
    ]);
    let engine = TriageEngine::from_dataset(&dataset, &TriageConfig::default())?;

    let outcome = engine.classify("itchy red eyes");
    assert_eq!(outcome.condition, "Conjunctivitis");
    assert_eq!(outcome.advice, "No specific advice found.");
    assert_eq!(engine.classify("sore throat fever").advice, "See a doctor.");

    Ok(())
}

#[test]
fn test_dataset_and_config_files() -> Result<()> {
    let mut data = NamedTempFile::new()?;
    write!(
        data,
        r#"[
            {{"symptoms": "sneezing, itchy eyes", "condition": "Allergy", "advice": "Try an antihistamine."}},
            {{"symptoms": "chest pain, fainting", "condition": "Emergency"}}
        ]"#
    )?;
    let mut config = NamedTempFile::new()?;
    write!(config, r#"{{"policy": {{"confidence_threshold": 0.5}}}}"#)?;

    let dataset = Dataset::from_path(data.path())?;
    let config = TriageConfig::from_path(config.path())?;
    let engine = TriageEngine::from_dataset(&dataset, &config)?;

    let outcome = engine.classify("itchy eyes and sneezing");
    assert_eq!(outcome.condition, "Allergy");
    assert_eq!(outcome.advice, "Try an antihistamine.");
    assert_eq!(engine.classify("chest pain").advice, EMERGENCY_ADVICE);

    Ok(())
}

#[test]
fn test_setup_errors() {
    let empty = TriageEngine::from_dataset(&Dataset::new(Vec::new()), &TriageConfig::default());
    assert!(matches!(empty, Err(TriageError::EmptyCorpus)));

    let no_words = Dataset::new(vec![SymptomRecord::new("123 !!!", "Flu", "Rest.")]);
    let no_vocab = TriageEngine::from_dataset(&no_words, &TriageConfig::default());
    assert!(matches!(no_vocab, Err(TriageError::EmptyVocabulary { .. })));

    let bad_threshold = TriageConfig::default().with_confidence_threshold(-0.1);
    assert!(TriageEngine::from_dataset(&Dataset::reference(), &bad_threshold).is_err());

    let bad_alpha = TriageConfig::default().with_smoothing_alpha(0.0);
    assert!(TriageEngine::from_dataset(&Dataset::reference(), &bad_alpha).is_err());
}

#[test]
fn test_concurrent_queries_match_sequential() -> Result<()> {
    let engine = Arc::new(TriageEngine::reference()?);
    let queries: Vec<String> = Dataset::reference()
        .records()
        .iter()
        .map(|r| r.symptoms.clone())
        .collect();
    let expected: Vec<_> = queries.iter().map(|q| engine.classify(q)).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let queries = queries.clone();
            std::thread::spawn(move || engine.classify_batch(&queries))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker panicked"), expected);
    }

    Ok(())
}
