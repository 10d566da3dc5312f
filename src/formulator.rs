//! Formulator - main coordinator for blend generation.
//!
//! Wires the pipeline stages together over an immutable catalog. A
//! formulation request is a pure function of (catalog, profile): every call
//! builds a fresh working layer over the shared catalog, so concurrent
//! requests against one `Formulator` never observe each other's adjustments
//! and repeated calls are byte-identical.

use std::path::Path;

use crate::data::Catalog;
use crate::error::FormulaError;
use crate::pipeline::{
    apply_antagonisms, apply_synergies, assign_dosages, filter_safety, format_output,
    score_catalog, select_composition, FormulaResult,
};
use crate::profile::{ProfileInput, UserProfile};

pub struct Formulator {
    catalog: Catalog,
}

impl Formulator {
    pub fn new(catalog: Catalog) -> Self {
        Formulator { catalog }
    }

    /// Load the catalog from a JSON file and build a formulator.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormulaError> {
        Ok(Formulator {
            catalog: Catalog::load(path)?,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run the full formulation pipeline for one request.
    pub fn generate(&self, input: &ProfileInput) -> Result<FormulaResult, FormulaError> {
        let profile = UserProfile::from_input(input);

        let ranked = score_catalog(&self.catalog, &profile);
        let safe = filter_safety(ranked, &profile);
        let mut selected = select_composition(safe);
        apply_synergies(&mut selected);
        let mut selected = apply_antagonisms(selected, &profile);
        assign_dosages(&mut selected)?;

        Ok(format_output(&selected))
    }
}
