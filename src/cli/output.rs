//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TriageArgs};
use crate::error::Result;
use crate::ml::types::{ClassProbability, TermWeight};
use crate::triage::policy::{Decision, Outcome};

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

/// Result of classifying a single description.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub input: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub decision: Decision,
}

/// Ranked posterior distribution for one description.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistributionResult {
    pub input: String,
    pub normalized: String,
    pub probabilities: Vec<ClassProbability>,
}

/// How a description is seen by the model.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub input: String,
    pub normalized: String,
    pub tokens: Vec<String>,
    pub known_terms: Vec<TermWeight>,
    pub unknown_tokens: Vec<String>,
}

/// Results of a batch run, in input order.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResults {
    pub results: Vec<ClassificationResult>,
    pub duration_ms: u64,
}

/// Per-record evaluation entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationEntry {
    pub symptoms: String,
    pub expected: String,
    pub predicted: String,
    pub confidence: f64,
    pub correct: bool,
}

/// Accuracy of the model on its own training records.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub entries: Vec<EvaluationEntry>,
}

/// Model statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStats {
    pub documents: usize,
    pub vocabulary_size: usize,
    pub confidence_threshold: f64,
    pub smoothing_alpha: f64,
    pub labels: Vec<LabelStats>,
}

/// Label-specific statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct LabelStats {
    pub label: String,
    pub prior: f64,
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

impl HumanOutput for Outcome {
    fn render_human(&self) -> String {
        format!(
            "Condition: {} (Confidence: {})\nAdvice: {}",
            self.condition,
            percent(self.confidence),
            self.advice
        )
    }
}

impl HumanOutput for ClassificationResult {
    fn render_human(&self) -> String {
        self.outcome.render_human()
    }
}

impl HumanOutput for DistributionResult {
    fn render_human(&self) -> String {
        if self.probabilities.is_empty() {
            return "No usable symptoms in the input.".to_string();
        }

        let width = self
            .probabilities
            .iter()
            .map(|p| p.label.len())
            .max()
            .unwrap_or(0);
        let mut lines = vec![format!("Normalized: {}", self.normalized)];
        for (rank, entry) in self.probabilities.iter().enumerate() {
            lines.push(format!(
                "{:>3}. {:<width$}  {:>6}",
                rank + 1,
                entry.label,
                percent(entry.probability),
            ));
        }
        lines.join("\n")
    }
}

impl HumanOutput for AnalysisResult {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("Normalized: {}", self.normalized),
            format!("Tokens: {}", self.tokens.join(" ")),
        ];
        if self.known_terms.is_empty() {
            lines.push("Known terms: (none)".to_string());
        } else {
            lines.push("Known terms:".to_string());
            for term in &self.known_terms {
                lines.push(format!("  {:<16} {:.4}", term.term, term.weight));
            }
        }
        if !self.unknown_tokens.is_empty() {
            lines.push(format!("Unknown tokens: {}", self.unknown_tokens.join(" ")));
        }
        lines.join("\n")
    }
}

impl HumanOutput for BatchResults {
    fn render_human(&self) -> String {
        let mut lines = Vec::with_capacity(self.results.len() + 1);
        for (i, result) in self.results.iter().enumerate() {
            lines.push(format!(
                "{:>4}. {} ({}) <- {}",
                i + 1,
                result.outcome.condition,
                percent(result.outcome.confidence),
                result.input
            ));
        }
        lines.push(format!(
            "Classified {} descriptions in {} ms",
            self.results.len(),
            self.duration_ms
        ));
        lines.join("\n")
    }
}

impl HumanOutput for EvaluationResults {
    fn render_human(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        for entry in &self.entries {
            let mark = if entry.correct { "ok  " } else { "MISS" };
            lines.push(format!(
                "{mark} {:<22} -> {:<22} {:>6}",
                entry.expected,
                entry.predicted,
                percent(entry.confidence)
            ));
        }
        lines.push(format!(
            "Accuracy: {}/{} ({})",
            self.correct,
            self.total,
            percent(self.accuracy)
        ));
        lines.join("\n")
    }
}

impl HumanOutput for ModelStats {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("Documents: {}", self.documents),
            format!("Vocabulary size: {}", self.vocabulary_size),
            format!("Confidence threshold: {}", self.confidence_threshold),
            format!("Smoothing alpha: {}", self.smoothing_alpha),
            format!("Labels ({}):", self.labels.len()),
        ];
        for label in &self.labels {
            lines.push(format!("  {:<22} prior {:.4}", label.label, label.prior));
        }
        lines.join("\n")
    }
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &TriageArgs,
) -> Result<()> {
    if args.output_format == OutputFormat::Human && args.verbosity() > 1 && !message.is_empty() {
        println!("{message}");
        println!();
    }
    println!("{}", render_result(result, args)?);
    Ok(())
}

/// Render a result in the requested format without printing it.
pub fn render_result<T: Serialize + HumanOutput>(result: &T, args: &TriageArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.render_human()),
        OutputFormat::Json => to_json(result, args.pretty),
    }
}

fn to_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> Outcome {
        Outcome {
            condition: "Flu".to_string(),
            confidence: 0.8197,
            advice: "Rest and drink plenty of fluids.".to_string(),
        }
    }

    #[test]
    fn test_outcome_human() {
        assert_eq!(
            outcome().render_human(),
            "Condition: Flu (Confidence: 82.0%)\nAdvice: Rest and drink plenty of fluids."
        );
    }

    #[test]
    fn test_classification_json_is_flat() {
        let result = ClassificationResult {
            input: "fever".to_string(),
            outcome: outcome(),
            decision: Decision::Confident,
        };
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&result, false).unwrap()).unwrap();
        assert_eq!(value["predicted_condition"], "Flu");
        assert_eq!(value["decision"], "Confident");
        assert_eq!(value["input"], "fever");
    }

    #[test]
    fn test_empty_distribution_human() {
        let result = DistributionResult {
            input: "!!!".to_string(),
            normalized: String::new(),
            probabilities: Vec::new(),
        };
        assert_eq!(result.render_human(), "No usable symptoms in the input.");
    }

    #[test]
    fn test_evaluation_human_summary() {
        let results = EvaluationResults {
            total: 2,
            correct: 1,
            accuracy: 0.5,
            entries: vec![],
        };
        assert!(results.render_human().ends_with("Accuracy: 1/2 (50.0%)"));
    }
}
