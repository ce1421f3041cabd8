//! Labeled symptom records: the training corpus and its advice table.
//!
//! A dataset file is a JSON array of records:
//!
//! ```json
//! [
//!   { "symptoms": "runny nose, sneezing", "condition": "Common Cold",
//!     "advice": "Rest and stay hydrated." }
//! ]
//! ```
//!
//! `advice` is optional. When several records share a condition, the first
//! advice listed for it is the one the advice table keeps.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::types::TrainingExample;
use crate::triage::advice::AdviceTable;

/// One labeled symptom description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub symptoms: String,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl SymptomRecord {
    pub fn new(symptoms: &str, condition: &str, advice: &str) -> Self {
        Self {
            symptoms: symptoms.to_string(),
            condition: condition.to_string(),
            advice: Some(advice.to_string()),
        }
    }
}

/// An ordered collection of symptom records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<SymptomRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SymptomRecord>) -> Self {
        Self { records }
    }

    /// Load a dataset from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let dataset: Dataset = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} symptom records from {}",
            dataset.len(),
            path.as_ref().display()
        );
        Ok(dataset)
    }

    /// The built-in 15-record reference dataset.
    pub fn reference() -> Self {
        Self::new(reference_records())
    }

    pub fn records(&self) -> &[SymptomRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Training examples, one per record, in record order.
    pub fn examples(&self) -> Vec<TrainingExample> {
        self.records
            .iter()
            .map(|record| TrainingExample::new(record.symptoms.clone(), record.condition.clone()))
            .collect()
    }

    /// Advice table keyed by condition; the first advice per condition wins.
    pub fn advice_table(&self, fallback: &str) -> AdviceTable {
        let mut table = AdviceTable::new(fallback);
        for record in &self.records {
            if let Some(advice) = &record.advice {
                table.insert_if_absent(&record.condition, advice);
            }
        }
        table
    }
}

/// The reference symptom records.
pub fn reference_records() -> Vec<SymptomRecord> {
    vec![
        SymptomRecord::new(
            "runny nose, sneezing, mild sore throat, cough",
            "Common Cold",
            "Rest, stay hydrated, and use over-the-counter medication for symptom relief.",
        ),
        SymptomRecord::new(
            "high fever, severe cough, body aches, chills, fatigue",
            "Flu",
            "Get plenty of rest and fluids. An antiviral may be prescribed by a doctor if you \
             are in a high-risk group.",
        ),
        SymptomRecord::new(
            "stomach pain, diarrhea, nausea, vomiting",
            "Gastroenteritis",
            "Focus on rehydration with oral rehydration solutions. Avoid solid food for a few hours.",
        ),
        SymptomRecord::new(
            "sharp chest pain, shortness of breath, left arm pain",
            "Emergency",
            "This is a medical emergency. Seek immediate medical attention or call emergency services.",
        ),
        SymptomRecord::new(
            "itchy eyes, sneezing, runny nose, congestion during spring",
            "Allergy",
            "Avoid allergens. Over-the-counter antihistamines can help. If severe, see an allergist.",
        ),
        SymptomRecord::new(
            "joint pain, swelling, stiffness, redness in joints",
            "Arthritis",
            "Use hot or cold packs. Anti-inflammatory drugs can help with pain and swelling. \
             Consult a doctor.",
        ),
        SymptomRecord::new(
            "sudden severe headache, vomiting, sensitivity to light",
            "Emergency",
            "This is a medical emergency. Seek immediate medical attention or call emergency services.",
        ),
        SymptomRecord::new(
            "skin rash, hives, difficulty breathing after eating nuts",
            "Emergency",
            "This is a medical emergency. Use an EpiPen if available and call emergency services \
             immediately.",
        ),
        SymptomRecord::new(
            "burning sensation when urinating, frequent urination, pelvic pain",
            "Urinary Tract Infection (UTI)",
            "Drink plenty of water and cranberry juice. A doctor will likely prescribe antibiotics.",
        ),
        SymptomRecord::new(
            "muscle cramps, fatigue, weakness, dehydration",
            "Dehydration/Electrolyte Imbalance",
            "Drink water or a sports drink with electrolytes. If symptoms persist, consult a doctor.",
        ),
        SymptomRecord::new(
            "coughing up blood, persistent cough, unexplained weight loss",
            "Emergency",
            "This is a medical emergency. Seek immediate medical attention.",
        ),
        SymptomRecord::new(
            "frequent headaches, neck stiffness, fever",
            "Meningitis",
            "Seek immediate medical attention. These could be signs of a serious infection.",
        ),
        SymptomRecord::new(
            "blurry vision, frequent urination, increased thirst",
            "Diabetes",
            "See a doctor for a blood glucose test. Lifestyle changes and medication may be needed.",
        ),
        SymptomRecord::new(
            "sore throat, white patches on tonsils, fever",
            "Strep Throat",
            "A rapid strep test from a doctor is recommended. Antibiotics are typically prescribed.",
        ),
        SymptomRecord::new(
            "difficulty sleeping, sweating, rapid heart rate, anxiety",
            "Anxiety/Thyroid Issues",
            "Consult a healthcare professional to determine the cause. Stress management or \
             medication may be needed.",
        ),
    ]
}
