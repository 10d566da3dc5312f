//! Catalog loading and validation.
//!
//! The plant catalog is an externally supplied JSON list, loaded once at
//! startup and immutable for the process lifetime. Raw records are compiled
//! into [`PlantRecord`]s at load: dosing bounds are validated, antagonism
//! actions become typed variants, and condition strings are parsed into
//! [`Trigger`]s so no string splitting happens per request. A single bad
//! record fails the whole load — there is no partial catalog.

use std::fs;
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::FormulaError;
use crate::rules::{
    AntagonismAction, AntagonismRule, ConstraintRule, FamilyLimit, LevelRule, Role, Synergy,
    Trigger,
};

/// Catalog entry after compilation. Read-only for the process lifetime;
/// per-request derived state lives in the pipeline's working layer, never here.
#[derive(Debug, Clone)]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    pub family_botanical: String,
    pub family_functional: String,
    pub role: Role,
    pub min_percent: f64,
    pub max_percent: f64,
    pub constraint_rules: Vec<ConstraintRule>,
    pub family_limit: Option<FamilyLimit>,
    pub scores: FxHashMap<String, i32>,
    pub synergies: Vec<Synergy>,
    pub antagonisms: Vec<AntagonismRule>,
}

/// Raw catalog record as it appears in the JSON source.
#[derive(Debug, Deserialize)]
struct RawPlantRecord {
    id: String,
    name: String,
    family_botanical: String,
    family_functional: String,
    role: Role,
    min_percent: f64,
    max_percent: f64,
    #[serde(default)]
    constraints: RawConstraints,
    #[serde(default)]
    scores: FxHashMap<String, i32>,
    #[serde(default)]
    synergies: Vec<Synergy>,
    #[serde(default)]
    antagonisms: Vec<RawAntagonism>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConstraints {
    #[serde(default)]
    conditions: Vec<ConstraintRule>,
    #[serde(default)]
    global_family_limit: Option<FamilyLimit>,
}

/// Raw antagonism entry. `action` defaults to penalize, `penalty` to 0.
#[derive(Debug, Deserialize)]
struct RawAntagonism {
    #[serde(rename = "with")]
    partner: String,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    penalty: Option<f64>,
}

/// The immutable plant catalog.
#[derive(Debug)]
pub struct Catalog {
    plants: Vec<PlantRecord>,
}

impl Catalog {
    /// Load and compile a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormulaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| FormulaError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        info!("Loaded {} plants from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Compile a catalog from in-memory JSON.
    pub fn from_json(json: &str) -> Result<Self, FormulaError> {
        let raw: Vec<RawPlantRecord> = serde_json::from_str(json)?;

        let mut seen_ids: FxHashSet<String> = FxHashSet::default();
        let mut plants = Vec::with_capacity(raw.len());
        for record in raw {
            if !seen_ids.insert(record.id.clone()) {
                return Err(FormulaError::MalformedCatalogEntry {
                    id: record.id,
                    reason: "duplicate id".to_string(),
                });
            }
            plants.push(compile_record(record)?);
        }

        Ok(Catalog { plants })
    }

    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

fn compile_record(raw: RawPlantRecord) -> Result<PlantRecord, FormulaError> {
    let malformed = |id: &str, reason: String| FormulaError::MalformedCatalogEntry {
        id: id.to_string(),
        reason,
    };

    if raw.id.trim().is_empty() {
        return Err(malformed(&raw.id, "empty id".to_string()));
    }
    if raw.name.trim().is_empty() {
        return Err(malformed(&raw.id, "empty name".to_string()));
    }
    if !(0.0..=100.0).contains(&raw.min_percent) || !(0.0..=100.0).contains(&raw.max_percent) {
        return Err(malformed(
            &raw.id,
            format!(
                "dosing bounds outside 0-100 (min {}, max {})",
                raw.min_percent, raw.max_percent
            ),
        ));
    }
    if raw.min_percent > raw.max_percent {
        return Err(malformed(
            &raw.id,
            format!(
                "min_percent {} exceeds max_percent {}",
                raw.min_percent, raw.max_percent
            ),
        ));
    }
    if let Some(limit) = &raw.constraints.global_family_limit {
        if !(0.0..=100.0).contains(&limit.max_sum) {
            return Err(malformed(
                &raw.id,
                format!("family limit {} outside 0-100", limit.max_sum),
            ));
        }
    }

    let mut antagonisms = Vec::with_capacity(raw.antagonisms.len());
    for ant in raw.antagonisms {
        let action = match ant.action.as_deref() {
            None | Some("penalize") => AntagonismAction::Penalize {
                penalty: ant.penalty.unwrap_or(0.0),
            },
            Some("exclude") => AntagonismAction::Exclude,
            Some(other) => {
                return Err(malformed(
                    &raw.id,
                    format!("unknown antagonism action '{}'", other),
                ));
            }
        };
        let trigger = match ant.condition {
            None => Trigger::Always,
            Some(text) => match LevelRule::parse(&text) {
                Some(rule) => Trigger::Level(rule),
                None => {
                    warn!(
                        "plant '{}': unparseable antagonism condition '{}', rule will never fire",
                        raw.id, text
                    );
                    Trigger::Invalid
                }
            },
        };
        antagonisms.push(AntagonismRule {
            partner: ant.partner,
            trigger,
            action,
        });
    }

    Ok(PlantRecord {
        id: raw.id,
        name: raw.name,
        family_botanical: raw.family_botanical,
        family_functional: raw.family_functional,
        role: raw.role,
        min_percent: raw.min_percent,
        max_percent: raw.max_percent,
        constraint_rules: raw.constraints.conditions,
        family_limit: raw.constraints.global_family_limit,
        scores: raw.scores,
        synergies: raw.synergies,
        antagonisms,
    })
}
