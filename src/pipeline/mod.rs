//! Formulation pipeline stages.
//!
//! Each stage lives in its own module and consumes the previous stage's
//! output: scoring → safety → selection → interactions → dosage → output.
//! All per-request derived state is held in [`WorkingPlant`]s created fresh
//! for each formulation call; the shared catalog is never mutated.

pub mod dosage;
pub mod interactions;
pub mod output;
pub mod safety;
pub mod scoring;
pub mod selection;

// Re-export stage entry points
pub use dosage::assign_dosages;
pub use interactions::{apply_antagonisms, apply_synergies};
pub use output::{format_output, FormulaComponent, FormulaResult, TOTAL_GRAMS};
pub use safety::filter_safety;
pub use scoring::score_catalog;
pub use selection::{select_composition, Selected, MAX_TOTAL};

use crate::data::PlantRecord;
use crate::rules::Role;

/// Request-scoped derived state for one catalog plant.
///
/// Borrows the immutable catalog record and carries everything the pipeline
/// is allowed to mutate: the relevance score, the effective role, the working
/// dose cap (only ever lowered) and the final dose share. `notes` is an
/// append-only audit trail rendered into the component's rationale string.
#[derive(Debug, Clone)]
pub struct WorkingPlant<'a> {
    pub record: &'a PlantRecord,
    pub relevance_score: f64,
    pub final_role: Role,
    pub max_percent: f64,
    pub final_percent: f64,
    pub notes: Vec<String>,
}

impl<'a> WorkingPlant<'a> {
    pub fn new(record: &'a PlantRecord) -> Self {
        WorkingPlant {
            record,
            relevance_score: 0.0,
            final_role: record.role,
            max_percent: record.max_percent,
            final_percent: 0.0,
            notes: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }
}
