//! From free text to a final triage outcome.
//!
//! [`engine::TriageEngine`] owns a trained classifier, a
//! [`policy::DecisionPolicy`] and an [`advice::AdviceResolver`]. It is built
//! once and then answers any number of queries, from any number of threads.
//!
//! ```
//! use symptom_triage::triage::TriageEngine;
//!
//! # fn main() -> symptom_triage::error::Result<()> {
//! let engine = TriageEngine::reference()?;
//!
//! let outcome = engine.classify("high fever, severe cough, body aches, chills, fatigue");
//! assert_eq!(outcome.condition, "Flu");
//!
//! let outcome = engine.classify("");
//! assert_eq!(outcome.condition, "Unknown");
//! assert_eq!(outcome.confidence, 0.0);
//! # Ok(())
//! # }
//! ```

pub mod advice;
pub mod engine;
pub mod policy;

pub use advice::{AdviceResolver, AdviceTable};
pub use engine::TriageEngine;
pub use policy::{Decision, DecisionPolicy, Outcome};
