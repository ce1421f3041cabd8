//! Command line argument parsing for the triage CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Triage - map symptom descriptions to a likely condition and advice
#[derive(Parser, Debug, Clone)]
#[command(name = "triage")]
#[command(about = "Map free-text symptom descriptions to a likely condition and advice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TriageArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Symptom dataset (JSON array of records); defaults to the built-in data
    #[arg(long, value_name = "DATA_FILE", env = "TRIAGE_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "TRIAGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Override the confidence threshold
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Override the smoothing constant
    #[arg(long, global = true)]
    pub alpha: Option<f64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TriageArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify a symptom description
    Classify(ClassifyArgs),

    /// Show the probability of every condition
    Distribution(DistributionArgs),

    /// Show how a description is normalized and weighted
    Analyze(AnalyzeArgs),

    /// Classify every line of a file
    Batch(BatchArgs),

    /// Interactive session reading descriptions from stdin
    Chat,

    /// Re-classify the training records and report accuracy
    Evaluate,

    /// Show model statistics
    Stats,
}

/// Arguments for classifying one description
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Symptom description (words are joined with spaces)
    #[arg(value_name = "TEXT", num_args = 0..)]
    pub text: Vec<String>,
}

/// Arguments for the distribution command
#[derive(Parser, Debug, Clone)]
pub struct DistributionArgs {
    /// Symptom description (words are joined with spaces)
    #[arg(value_name = "TEXT", num_args = 0..)]
    pub text: Vec<String>,

    /// Only show the N most probable conditions
    #[arg(short, long)]
    pub top: Option<usize>,
}

/// Arguments for the analyze command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Symptom description (words are joined with spaces)
    #[arg(value_name = "TEXT", num_args = 0..)]
    pub text: Vec<String>,
}

/// Arguments for batch classification
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// File with one symptom description per line
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify() {
        let args = TriageArgs::parse_from(["triage", "classify", "runny", "nose,", "cough"]);
        match args.command {
            Command::Classify(ref classify) => {
                assert_eq!(classify.text.join(" "), "runny nose, cough");
            }
            _ => panic!("expected classify"),
        }
        assert_eq!(args.output_format, OutputFormat::Human);
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = TriageArgs::parse_from([
            "triage",
            "distribution",
            "fever",
            "--top",
            "3",
            "-f",
            "json",
            "--threshold",
            "0.6",
            "-vv",
        ]);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.threshold, Some(0.6));
        assert_eq!(args.verbosity(), 2);
        assert!(matches!(args.command, Command::Distribution(ref d) if d.top == Some(3)));
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = TriageArgs::parse_from(["triage", "-v", "-q", "stats"]);
        assert_eq!(args.verbosity(), 0);
    }
}
