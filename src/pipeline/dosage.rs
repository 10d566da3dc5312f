//! Dosage computation.
//!
//! Nominal percentages are role-driven, not score-driven: relevance decides
//! which plants are in the blend, roles decide how much of each. The cap
//! order is fixed and must not be reordered: per-plant clamp, then per-family
//! proportional shrink, then global shrink to 100. A plant can legitimately
//! be shrunk twice.

use rustc_hash::FxHashMap;

use crate::error::FormulaError;
use crate::pipeline::selection::{Selected, MAX_PRIMARY, MAX_SECONDARY, MAX_SUPPORT};
use crate::rules::Role;

pub const SINGLE_PRIMARY_PERCENT: f64 = 40.0;
pub const PAIRED_PRIMARY_PERCENT: f64 = 30.0;
pub const SECONDARY_PERCENT: f64 = 20.0;
pub const SUPPORT_PERCENT: f64 = 10.0;

pub fn assign_dosages(selected: &mut Selected<'_>) -> Result<(), FormulaError> {
    let count = |role: Role| selected.iter().filter(|p| p.final_role == role).count();

    let n_primary = count(Role::Primary);
    let n_secondary = count(Role::Secondary);
    let n_support = count(Role::Support);
    check_cardinality(Role::Primary, n_primary, MAX_PRIMARY)?;
    check_cardinality(Role::Secondary, n_secondary, MAX_SECONDARY)?;
    check_cardinality(Role::Support, n_support, MAX_SUPPORT)?;

    // Nominal role percentages.
    for plant in selected.iter_mut() {
        plant.final_percent = match plant.final_role {
            Role::Primary if n_primary == 1 => SINGLE_PRIMARY_PERCENT,
            Role::Primary => PAIRED_PRIMARY_PERCENT,
            Role::Secondary => SECONDARY_PERCENT,
            Role::Support => SUPPORT_PERCENT,
        };
    }

    // Per-plant clamp to the (possibly safety-capped) working maximum.
    for plant in selected.iter_mut() {
        if plant.final_percent > plant.max_percent {
            plant.final_percent = plant.max_percent;
        }
    }

    apply_family_limits(selected);

    // Global total normalization, after and independent of family scaling.
    let total: f64 = selected.iter().map(|p| p.final_percent).sum();
    if total > 100.0 {
        let ratio = 100.0 / total;
        for plant in selected.iter_mut() {
            plant.final_percent *= ratio;
        }
    }

    Ok(())
}

fn check_cardinality(role: Role, count: usize, limit: usize) -> Result<(), FormulaError> {
    if count > limit {
        return Err(FormulaError::RoleCardinality { role, count, limit });
    }
    Ok(())
}

/// Proportional shrink of any functional family whose summed share exceeds
/// its declared cap; relative ratios within the family are preserved. The
/// first declared limit among the family's selected members is the one that
/// applies.
fn apply_family_limits(selected: &mut Selected<'_>) {
    let mut family_order: Vec<String> = Vec::new();
    let mut members: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for (idx, plant) in selected.iter().enumerate() {
        let family = &plant.record.family_functional;
        members
            .entry(family.clone())
            .or_insert_with(|| {
                family_order.push(family.clone());
                Vec::new()
            })
            .push(idx);
    }

    for family in family_order {
        let indices = &members[&family];
        let limit = indices
            .iter()
            .find_map(|&i| selected[i].record.family_limit);
        let Some(limit) = limit else { continue };

        let current_sum: f64 = indices.iter().map(|&i| selected[i].final_percent).sum();
        if current_sum > limit.max_sum {
            let ratio = limit.max_sum / current_sum;
            for &i in indices {
                selected[i].final_percent *= ratio;
            }
        }
    }
}
