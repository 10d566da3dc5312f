//! Synergy and antagonism adjustment over the selected set.
//!
//! Both passes look only at the selected plants, never the full catalog.
//! Synergy bonuses are one-directional as declared: mirrored declarations
//! apply once per declaration, which is intentional symmetric reinforcement.
//! Antagonism exclusions are collected during the scan and applied only
//! afterwards, so one plant's removal never affects another plant's check
//! within the same pass.

use rustc_hash::FxHashSet;
use tracing::info;

use crate::pipeline::selection::Selected;
use crate::profile::UserProfile;
use crate::rules::AntagonismAction;

fn selected_ids(selected: &Selected<'_>) -> FxHashSet<String> {
    selected.iter().map(|p| p.id().to_string()).collect()
}

/// Add declared synergy bonuses for co-selected partners.
pub fn apply_synergies(selected: &mut Selected<'_>) {
    let ids = selected_ids(selected);
    for plant in selected.iter_mut() {
        let record = plant.record;
        for syn in &record.synergies {
            if ids.contains(&syn.partner) {
                plant.relevance_score += syn.bonus;
                plant
                    .notes
                    .push(format!("Synergy bonus +{} (with {})", syn.bonus, syn.partner));
            }
        }
    }
}

/// Evaluate declared antagonisms; penalties adjust scores in place, hard
/// exclusions remove the plant after the full scan.
pub fn apply_antagonisms<'a>(mut selected: Selected<'a>, profile: &UserProfile) -> Selected<'a> {
    let ids = selected_ids(&selected);
    let mut to_exclude: FxHashSet<String> = FxHashSet::default();

    for plant in selected.iter_mut() {
        let record = plant.record;
        for ant in &record.antagonisms {
            if !ids.contains(&ant.partner) || !ant.trigger.fires(profile) {
                continue;
            }
            match ant.action {
                AntagonismAction::Exclude => {
                    info!(
                        "Antagonism Exclusion: {} - antagonism with {}",
                        record.name, ant.partner
                    );
                    to_exclude.insert(record.id.clone());
                }
                AntagonismAction::Penalize { penalty } => {
                    plant.relevance_score -= penalty;
                    plant.notes.push(format!(
                        "Penalty -{} (antagonism with {})",
                        penalty, ant.partner
                    ));
                }
            }
        }
    }

    selected.retain(|p| !to_exclude.contains(p.id()));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Catalog;
    use crate::pipeline::WorkingPlant;
    use crate::profile::{ProfileInput, UserProfile};
    use approx::assert_relative_eq;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
            {"id": "valerian", "name": "Valerian", "family_botanical": "Caprifoliaceae",
             "family_functional": "Sedative", "role": "primary",
             "min_percent": 10.0, "max_percent": 40.0,
             "synergies": [{"with": "passionflower", "bonus": 15}]},
            {"id": "passionflower", "name": "Passionflower", "family_botanical": "Passifloraceae",
             "family_functional": "Sedative", "role": "secondary",
             "min_percent": 5.0, "max_percent": 25.0,
             "synergies": [{"with": "valerian", "bonus": 15}]},
            {"id": "green_tea", "name": "Green Tea", "family_botanical": "Theaceae",
             "family_functional": "Stimulant", "role": "secondary",
             "min_percent": 5.0, "max_percent": 15.0,
             "antagonisms": [{"with": "korean_ginseng", "condition": "anxiety>=6", "penalty": 10}]},
            {"id": "korean_ginseng", "name": "Korean Ginseng", "family_botanical": "Araliaceae",
             "family_functional": "Stimulant", "role": "primary",
             "min_percent": 5.0, "max_percent": 30.0,
             "antagonisms": [{"with": "green_tea", "action": "exclude", "condition": "anxiety>=8"}]}
        ]"#,
        )
        .unwrap()
    }

    fn selected_from<'a>(catalog: &'a Catalog, ids: &[&str]) -> Selected<'a> {
        ids.iter()
            .map(|id| {
                let record = catalog.plants().iter().find(|r| r.id == *id).unwrap();
                let mut plant = WorkingPlant::new(record);
                plant.relevance_score = 10.0;
                plant
            })
            .collect()
    }

    fn profile(anxiety: i32) -> UserProfile {
        let input = ProfileInput {
            anxiety_level: anxiety,
            ..Default::default()
        };
        UserProfile::from_input(&input)
    }

    #[test]
    fn mirrored_synergy_applies_per_declaration() {
        let catalog = catalog();
        let mut selected = selected_from(&catalog, &["valerian", "passionflower"]);
        apply_synergies(&mut selected);
        assert_relative_eq!(selected[0].relevance_score, 25.0, epsilon = 1e-9);
        assert_relative_eq!(selected[1].relevance_score, 25.0, epsilon = 1e-9);
        assert!(selected[0].notes[0].contains("Synergy bonus +15"));
    }

    #[test]
    fn synergy_needs_partner_selected() {
        let catalog = catalog();
        let mut selected = selected_from(&catalog, &["valerian"]);
        apply_synergies(&mut selected);
        assert_relative_eq!(selected[0].relevance_score, 10.0, epsilon = 1e-9);
        assert!(selected[0].notes.is_empty());
    }

    #[test]
    fn penalty_fires_at_condition_threshold() {
        let catalog = catalog();
        let selected = selected_from(&catalog, &["green_tea", "korean_ginseng"]);
        let adjusted = apply_antagonisms(selected, &profile(6));
        let tea = adjusted.iter().find(|p| p.id() == "green_tea").unwrap();
        assert_relative_eq!(tea.relevance_score, 0.0, epsilon = 1e-9);
        assert!(tea.notes[0].contains("Penalty -10"));
    }

    #[test]
    fn penalty_dormant_below_threshold() {
        let catalog = catalog();
        let selected = selected_from(&catalog, &["green_tea", "korean_ginseng"]);
        let adjusted = apply_antagonisms(selected, &profile(3));
        let tea = adjusted.iter().find(|p| p.id() == "green_tea").unwrap();
        assert_relative_eq!(tea.relevance_score, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn exclusion_applied_after_full_scan() {
        let catalog = catalog();
        let selected = selected_from(&catalog, &["green_tea", "korean_ginseng"]);
        let adjusted = apply_antagonisms(selected, &profile(8));
        // Ginseng excludes itself against tea at anxiety>=8, but tea's penalty
        // check still saw ginseng in the selected set.
        assert!(adjusted.iter().all(|p| p.id() != "korean_ginseng"));
        let tea = adjusted.iter().find(|p| p.id() == "green_tea").unwrap();
        assert_relative_eq!(tea.relevance_score, 0.0, epsilon = 1e-9);
    }
}
