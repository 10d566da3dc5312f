//! Herbal Formulator Rust Implementation
//!
//! Recommends a composition of botanical ingredients for a personalized
//! herbal blend from a symptom-priority profile and safety conditions.
//!
//! The pipeline runs in fixed stages:
//! - `data`: immutable plant catalog, loaded once and validated
//! - `profile`: per-request user profile with level-derived condition flags
//! - `rules`: typed constraint/antagonism rules and the condition mini-language
//! - `pipeline/`: scoring → safety → selection → interactions → dosage → output
//! - `formulator`: the coordinator tying the stages together

pub mod data;
pub mod error;
pub mod formulator;
pub mod pipeline;
pub mod profile;
pub mod rules;

// Re-export commonly used types
pub use data::{Catalog, PlantRecord};
pub use error::FormulaError;
pub use formulator::Formulator;
pub use pipeline::{FormulaComponent, FormulaResult, TOTAL_GRAMS};
pub use profile::{ProfileInput, UserProfile};
pub use rules::Role;
