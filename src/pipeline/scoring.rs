//! Relevance scoring.
//!
//! Runs once per request over the full catalog (the only stage that reads the
//! catalog directly). A plant's relevance is the sum of its score weights for
//! the profile's priority axes; missing axes contribute 0. The result is
//! ordered by descending score with catalog order breaking ties (stable sort)
//! so output is deterministic.

use crate::data::Catalog;
use crate::pipeline::WorkingPlant;
use crate::profile::UserProfile;

pub fn score_catalog<'a>(catalog: &'a Catalog, profile: &UserProfile) -> Vec<WorkingPlant<'a>> {
    let mut ranked: Vec<WorkingPlant<'a>> = catalog
        .plants()
        .iter()
        .map(|record| {
            let mut plant = WorkingPlant::new(record);
            let score: i32 = profile
                .priorities()
                .iter()
                .map(|axis| record.scores.get(axis).copied().unwrap_or(0))
                .sum();
            plant.relevance_score = f64::from(score);
            plant
        })
        .collect();

    // Stable sort: ties keep catalog order.
    ranked.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
