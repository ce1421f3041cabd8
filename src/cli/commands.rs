//! Command implementations for the triage CLI.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TriageConfig;
use crate::dataset::Dataset;
use crate::error::TriageError;
use crate::triage::engine::TriageEngine;

/// Execute a CLI command.
pub fn execute_command(args: TriageArgs) -> Result<()> {
    let (config, dataset) = load_setup(&args)?;
    let engine = TriageEngine::from_dataset(&dataset, &config)
        .context("failed to build the triage engine")?;

    match &args.command {
        Command::Classify(classify_args) => classify(&engine, classify_args, &args),
        Command::Distribution(dist_args) => show_distribution(&engine, dist_args, &args),
        Command::Analyze(analyze_args) => analyze(&engine, analyze_args, &args),
        Command::Batch(batch_args) => run_batch(&engine, batch_args, &args),
        Command::Chat => run_chat(&engine, &args),
        Command::Evaluate => evaluate(&engine, &dataset, &args),
        Command::Stats => show_stats(&engine, &dataset, &config, &args),
    }
}

/// Resolve the configuration and dataset named on the command line.
pub fn load_setup(args: &TriageArgs) -> Result<(TriageConfig, Dataset)> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            TriageConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => TriageConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config = config.with_confidence_threshold(threshold);
    }
    if let Some(alpha) = args.alpha {
        config = config.with_smoothing_alpha(alpha);
    }
    config.validate().context("invalid configuration")?;

    let dataset = match &args.data {
        Some(path) => {
            info!("Loading dataset from {}", path.display());
            Dataset::from_path(path)
                .with_context(|| format!("failed to load dataset {}", path.display()))?
        }
        None => Dataset::reference(),
    };

    Ok((config, dataset))
}

fn join_text(words: &[String]) -> String {
    words.join(" ")
}

fn classification(engine: &TriageEngine, input: &str) -> ClassificationResult {
    let (outcome, decision) = engine.classify_with_decision(input);
    ClassificationResult {
        input: input.to_string(),
        outcome,
        decision,
    }
}

/// Classify one description.
fn classify(engine: &TriageEngine, args: &ClassifyArgs, cli_args: &TriageArgs) -> Result<()> {
    let input = join_text(&args.text);
    let result = classification(engine, &input);
    output_result("Classification", &result, cli_args)?;
    Ok(())
}

/// Print the ranked posterior distribution.
fn show_distribution(
    engine: &TriageEngine,
    args: &DistributionArgs,
    cli_args: &TriageArgs,
) -> Result<()> {
    let input = join_text(&args.text);
    let normalized = engine.normalizer().normalize(&input);
    let mut probabilities = engine
        .distribution(&input)
        .context("failed to compute the distribution")?
        .ranked();
    if let Some(top) = args.top {
        probabilities.truncate(top);
    }

    let result = DistributionResult {
        input,
        normalized,
        probabilities,
    };
    output_result("Distribution", &result, cli_args)?;
    Ok(())
}

/// Show normalization, tokens and term weights for a description.
fn analyze(engine: &TriageEngine, args: &AnalyzeArgs, cli_args: &TriageArgs) -> Result<()> {
    let input = join_text(&args.text);
    let normalized = engine.normalizer().normalize(&input);
    let tokens: Vec<String> = normalized.split_whitespace().map(str::to_string).collect();
    let known_terms = engine
        .classifier()
        .term_weights(&normalized)
        .context("failed to weight terms")?;

    let known: BTreeSet<&str> = known_terms.iter().map(|t| t.term.as_str()).collect();
    let unknown_tokens = tokens
        .iter()
        .filter(|token| !known.contains(token.as_str()))
        .cloned()
        .collect();

    let result = AnalysisResult {
        input,
        normalized,
        tokens,
        known_terms,
        unknown_tokens,
    };
    output_result("Analysis", &result, cli_args)?;
    Ok(())
}

/// Classify every non-empty line of a file.
fn run_batch(engine: &TriageEngine, args: &BatchArgs, cli_args: &TriageArgs) -> Result<()> {
    let file = File::open(&args.input_file)
        .with_context(|| format!("failed to open {}", args.input_file.display()))?;
    let batch = batch_results(engine, BufReader::new(file))
        .with_context(|| format!("failed to read {}", args.input_file.display()))?;
    info!(
        "Classified {} lines in {} ms",
        batch.results.len(),
        batch.duration_ms
    );

    output_result("Batch classification", &batch, cli_args)?;
    Ok(())
}

/// Classify the non-blank lines of `reader` in parallel; results keep line order.
pub fn batch_results<R: BufRead>(engine: &TriageEngine, reader: R) -> Result<BatchResults> {
    let inputs: Vec<String> = reader
        .lines()
        .collect::<io::Result<Vec<String>>>()?
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let start = Instant::now();
    let outcomes = engine.classify_batch_with_decisions(&inputs);
    let duration_ms = start.elapsed().as_millis() as u64;

    let results = inputs
        .into_iter()
        .zip(outcomes)
        .map(|(input, (outcome, decision))| ClassificationResult {
            input,
            outcome,
            decision,
        })
        .collect();

    Ok(BatchResults {
        results,
        duration_ms,
    })
}

/// Line-oriented chat over stdin.
fn run_chat(engine: &TriageEngine, cli_args: &TriageArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let answered = chat_session(engine, stdin.lock(), &mut stdout, cli_args)?;
    debug!("Chat session ended after {answered} queries");
    Ok(())
}

/// Answer one description per line until an empty line or end of input.
///
/// Returns the number of descriptions answered.
pub fn chat_session<R: BufRead, W: Write>(
    engine: &TriageEngine,
    mut reader: R,
    writer: &mut W,
    cli_args: &TriageArgs,
) -> Result<usize> {
    let interactive = cli_args.output_format == OutputFormat::Human;
    if interactive && cli_args.verbosity() > 0 {
        writeln!(writer, "Describe your symptoms (empty line to quit).")?;
    }

    let mut answered = 0;
    let mut line = String::new();
    loop {
        if interactive {
            write!(writer, "> ")?;
            writer.flush()?;
        }

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            break;
        }

        let result = classification(engine, input);
        writeln!(writer, "{}", render_result(&result, cli_args)?)?;
        if interactive {
            writeln!(writer)?;
        }
        answered += 1;
    }

    Ok(answered)
}

/// Re-classify the dataset's own records.
fn evaluate(engine: &TriageEngine, dataset: &Dataset, cli_args: &TriageArgs) -> Result<()> {
    let results = evaluation(engine, dataset)?;
    output_result("Evaluation on training records", &results, cli_args)?;
    Ok(())
}

/// Accuracy of `engine` on `dataset`. A record counts as correct when its
/// label is predicted with at least the policy threshold.
pub fn evaluation(engine: &TriageEngine, dataset: &Dataset) -> Result<EvaluationResults> {
    let mut entries = Vec::with_capacity(dataset.len());
    for record in dataset.records() {
        let normalized = engine.normalizer().normalize(&record.symptoms);
        let prediction = engine
            .classifier()
            .predict(&normalized)
            .with_context(|| format!("failed to classify {:?}", record.symptoms))?;
        entries.push(EvaluationEntry {
            symptoms: record.symptoms.clone(),
            expected: record.condition.clone(),
            correct: prediction.label == record.condition
                && prediction.confidence >= engine.policy().threshold(),
            predicted: prediction.label,
            confidence: prediction.confidence,
        });
    }

    let total = entries.len();
    let correct = entries.iter().filter(|e| e.correct).count();
    let accuracy = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    };

    Ok(EvaluationResults {
        total,
        correct,
        accuracy,
        entries,
    })
}

/// Process exit code for a failed command: 2 when the model or its
/// configuration could not be set up, 1 for anything else.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<TriageError>() {
        Some(e) if e.is_setup_error() => 2,
        _ => 1,
    }
}

/// Show model statistics.
fn show_stats(
    engine: &TriageEngine,
    dataset: &Dataset,
    config: &TriageConfig,
    cli_args: &TriageArgs,
) -> Result<()> {
    let classifier = engine.classifier();
    let labels = classifier
        .labels()
        .iter()
        .map(|label| LabelStats {
            label: label.clone(),
            prior: classifier.prior(label).unwrap_or(0.0),
        })
        .collect();

    let stats = ModelStats {
        documents: dataset.len(),
        vocabulary_size: classifier.vocabulary_size(),
        confidence_threshold: config.policy.confidence_threshold,
        smoothing_alpha: config.model.smoothing_alpha,
        labels,
    };
    output_result("Model statistics", &stats, cli_args)?;
    Ok(())
}
