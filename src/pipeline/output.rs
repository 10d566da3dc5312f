//! Output formatting.
//!
//! Pure projection of the final composition into display records; invariants
//! are not re-validated here. Percentages are rounded to 1 decimal, gram
//! equivalents to 2 decimals against the fixed per-infusion weight.

use serde::Serialize;

use crate::pipeline::selection::Selected;

/// Dry weight of one infusion, in grams.
pub const TOTAL_GRAMS: f64 = 4.0;

#[derive(Debug, Clone, Serialize)]
pub struct FormulaResult {
    pub total_grams: f64,
    pub components: Vec<FormulaComponent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormulaComponent {
    pub name: String,
    pub role: String,
    pub percent: f64,
    pub grams: f64,
    pub reason: Option<String>,
}

pub fn format_output(selected: &Selected<'_>) -> FormulaResult {
    let components: Vec<FormulaComponent> = selected
        .iter()
        .map(|plant| {
            let reason = if plant.notes.is_empty() {
                None
            } else {
                Some(plant.notes.join("; ").trim().to_string())
            };
            FormulaComponent {
                name: plant.record.name.clone(),
                role: plant.final_role.title().to_string(),
                percent: round1(plant.final_percent),
                grams: round2(plant.final_percent / 100.0 * TOTAL_GRAMS),
                reason,
            }
        })
        .collect();

    // An empty composition is valid: no components, no grams to brew.
    let total_grams = if components.is_empty() {
        0.0
    } else {
        TOTAL_GRAMS
    };

    FormulaResult {
        total_grams,
        components,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
