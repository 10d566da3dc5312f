//! Role-based composition selection.
//!
//! Operates on safety-filtered plants already ranked by descending relevance.
//! Slots are filled in a fixed order — primaries, then secondaries, then
//! supports — so primaries and secondaries win the shared total budget when
//! it binds. A plant with zero relevance is never selected; an empty slot is
//! valid and simply yields a smaller blend.

use smallvec::SmallVec;

use crate::pipeline::WorkingPlant;
use crate::rules::Role;

pub const MAX_PRIMARY: usize = 2;
pub const MAX_SECONDARY: usize = 3;
pub const MAX_SUPPORT: usize = 2;
/// Hard cap on total composition size, independent of per-slot caps.
pub const MAX_TOTAL: usize = 5;

/// The selected set, in primary → secondary → support order.
pub type Selected<'a> = SmallVec<[WorkingPlant<'a>; MAX_TOTAL]>;

pub fn select_composition(ranked: Vec<WorkingPlant<'_>>) -> Selected<'_> {
    let mut selected: Selected<'_> = SmallVec::new();
    let mut n_primary = 0;
    let mut n_secondary = 0;
    let mut n_support = 0;

    let candidates: Vec<WorkingPlant<'_>> = ranked
        .into_iter()
        .filter(|p| p.relevance_score > 0.0)
        .collect();

    for plant in &candidates {
        if plant.final_role == Role::Primary && n_primary < MAX_PRIMARY {
            selected.push(plant.clone());
            n_primary += 1;
        }
    }
    for plant in &candidates {
        if plant.final_role == Role::Secondary && n_secondary < MAX_SECONDARY {
            selected.push(plant.clone());
            n_secondary += 1;
        }
    }
    for plant in &candidates {
        if plant.final_role == Role::Support
            && n_support < MAX_SUPPORT
            && selected.len() < MAX_TOTAL
        {
            selected.push(plant.clone());
            n_support += 1;
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Catalog, PlantRecord};

    fn catalog(specs: &[(&str, &str, f64)]) -> Catalog {
        let records: Vec<String> = specs
            .iter()
            .map(|(id, role, _)| {
                format!(
                    r#"{{"id": "{id}", "name": "{id}", "family_botanical": "F",
                        "family_functional": "G", "role": "{role}",
                        "min_percent": 5.0, "max_percent": 40.0}}"#
                )
            })
            .collect();
        Catalog::from_json(&format!("[{}]", records.join(","))).unwrap()
    }

    fn ranked<'a>(catalog: &'a Catalog, specs: &[(&str, &str, f64)]) -> Vec<WorkingPlant<'a>> {
        // Build in the given order (assumed already sorted by score).
        specs
            .iter()
            .map(|(id, _, score)| {
                let record: &PlantRecord = catalog
                    .plants()
                    .iter()
                    .find(|r| r.id == *id)
                    .expect("record");
                let mut plant = WorkingPlant::new(record);
                plant.relevance_score = *score;
                plant
            })
            .collect()
    }

    #[test]
    fn fills_slots_in_score_order() {
        let specs = [
            ("p1", "primary", 10.0),
            ("p2", "primary", 9.0),
            ("p3", "primary", 8.0),
            ("s1", "secondary", 7.0),
            ("s2", "secondary", 6.0),
            ("s3", "secondary", 5.0),
            ("s4", "secondary", 4.0),
            ("u1", "support", 3.0),
        ];
        let catalog = catalog(&specs);
        let selected = select_composition(ranked(&catalog, &specs));
        let ids: Vec<&str> = selected.iter().map(|p| p.id()).collect();
        // 2 primaries, 3 secondaries; the support loses the total-of-5 budget.
        assert_eq!(ids, vec!["p1", "p2", "s1", "s2", "s3"]);
    }

    #[test]
    fn zero_relevance_is_never_selected() {
        let specs = [("p1", "primary", 0.0), ("s1", "secondary", 0.0)];
        let catalog = catalog(&specs);
        let selected = select_composition(ranked(&catalog, &specs));
        assert!(selected.is_empty());
    }

    #[test]
    fn supports_fill_remaining_budget() {
        let specs = [
            ("p1", "primary", 10.0),
            ("s1", "secondary", 7.0),
            ("u1", "support", 3.0),
            ("u2", "support", 2.0),
            ("u3", "support", 1.0),
        ];
        let catalog = catalog(&specs);
        let selected = select_composition(ranked(&catalog, &specs));
        let ids: Vec<&str> = selected.iter().map(|p| p.id()).collect();
        // Two supports max even though the total budget would allow a third.
        assert_eq!(ids, vec!["p1", "s1", "u1", "u2"]);
    }

    #[test]
    fn empty_slots_are_valid() {
        let specs = [("u1", "support", 3.0)];
        let catalog = catalog(&specs);
        let selected = select_composition(ranked(&catalog, &specs));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id(), "u1");
    }
}
