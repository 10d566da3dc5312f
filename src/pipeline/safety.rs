//! Safety filtering and conditional limit application.
//!
//! Every plant's constraint rules are folded in catalog order against the
//! profile's condition flags. A triggered hard exclude drops the plant from
//! candidacy (logged, first match wins); survivors carry the lowered working
//! cap, any role override, and the audit notes for each applied adjustment.

use tracing::info;

use crate::pipeline::WorkingPlant;
use crate::profile::UserProfile;
use crate::rules::{evaluate_constraints, ConstraintOutcome};

pub fn filter_safety<'a>(
    ranked: Vec<WorkingPlant<'a>>,
    profile: &UserProfile,
) -> Vec<WorkingPlant<'a>> {
    let mut safe = Vec::with_capacity(ranked.len());

    for mut plant in ranked {
        let outcome = evaluate_constraints(
            &plant.record.constraint_rules,
            profile,
            plant.max_percent,
            plant.final_role,
        );
        match outcome {
            ConstraintOutcome::Excluded { condition } => {
                info!(
                    "Safety Exclusion: {} - Excluded due to {}",
                    plant.record.name, condition
                );
            }
            ConstraintOutcome::Allowed {
                max_percent,
                role,
                mut notes,
            } => {
                plant.max_percent = max_percent;
                plant.final_role = role;
                plant.notes.append(&mut notes);
                safe.push(plant);
            }
        }
    }

    safe
}
