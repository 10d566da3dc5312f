//! User profile construction.
//!
//! A request carries a priority list, a map of boolean conditions and numeric
//! severity levels for a small fixed set of axes. Threshold rules derive extra
//! condition flags from the levels at construction time; once built, the
//! profile is immutable for the rest of the pipeline.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

/// Raw request payload, deserializable straight from the presentation layer.
/// All fields default so partial payloads are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub priorities: Vec<String>,
    #[serde(default)]
    pub conditions: FxHashMap<String, bool>,
    #[serde(default)]
    pub anxiety_level: i32,
    #[serde(default)]
    pub insomnia_level: i32,
    #[serde(default)]
    pub stress_level: i32,
}

/// Per-request profile with level-derived condition flags already applied.
#[derive(Debug, Clone)]
pub struct UserProfile {
    priorities: Vec<String>,
    conditions: FxHashMap<String, bool>,
    anxiety_level: i32,
    insomnia_level: i32,
    stress_level: i32,
}

impl UserProfile {
    /// Build a profile, deriving condition flags from numeric levels:
    /// anxiety ≥ 7 ⇒ `high_anxiety`, anxiety ≥ 5 ⇒ `active_anxiety`,
    /// insomnia ≥ 7 ⇒ `insomnia`, stress ≥ 7 ⇒ `high_stress`.
    /// Derivation only sets flags; caller-provided flags are kept.
    pub fn from_input(input: &ProfileInput) -> Self {
        let mut conditions = input.conditions.clone();

        if input.anxiety_level >= 7 {
            conditions.insert("high_anxiety".to_string(), true);
        }
        if input.anxiety_level >= 5 {
            conditions.insert("active_anxiety".to_string(), true);
        }
        if input.insomnia_level >= 7 {
            conditions.insert("insomnia".to_string(), true);
        }
        if input.stress_level >= 7 {
            conditions.insert("high_stress".to_string(), true);
        }

        // Duplicate priority axes must not double-count in scoring.
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let priorities: Vec<String> = input
            .priorities
            .iter()
            .filter(|axis| seen.insert(axis.as_str()))
            .cloned()
            .collect();

        UserProfile {
            priorities,
            conditions,
            anxiety_level: input.anxiety_level,
            insomnia_level: input.insomnia_level,
            stress_level: input.stress_level,
        }
    }

    pub fn priorities(&self) -> &[String] {
        &self.priorities
    }

    /// Whether a named boolean condition is active. Absent flags read false.
    pub fn condition(&self, key: &str) -> bool {
        self.conditions.get(key).copied().unwrap_or(false)
    }

    /// Numeric level for a condition-language identifier. Unknown axes read 0.
    pub fn level(&self, axis: &str) -> i32 {
        match axis {
            "anxiety" => self.anxiety_level,
            "insomnia" => self.insomnia_level,
            "stress" => self.stress_level,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_flags_at_thresholds() {
        let input = ProfileInput {
            anxiety_level: 7,
            insomnia_level: 7,
            stress_level: 7,
            ..Default::default()
        };
        let profile = UserProfile::from_input(&input);
        assert!(profile.condition("high_anxiety"));
        assert!(profile.condition("active_anxiety"));
        assert!(profile.condition("insomnia"));
        assert!(profile.condition("high_stress"));
    }

    #[test]
    fn below_threshold_derives_nothing() {
        let input = ProfileInput {
            anxiety_level: 4,
            insomnia_level: 6,
            stress_level: 6,
            ..Default::default()
        };
        let profile = UserProfile::from_input(&input);
        assert!(!profile.condition("high_anxiety"));
        assert!(!profile.condition("active_anxiety"));
        assert!(!profile.condition("insomnia"));
        assert!(!profile.condition("high_stress"));
    }

    #[test]
    fn explicit_conditions_are_kept() {
        let mut input = ProfileInput::default();
        input.conditions.insert("pregnancy".to_string(), true);
        input.conditions.insert("gastritis".to_string(), false);
        let profile = UserProfile::from_input(&input);
        assert!(profile.condition("pregnancy"));
        assert!(!profile.condition("gastritis"));
        assert!(!profile.condition("never_mentioned"));
    }

    #[test]
    fn duplicate_priorities_collapse() {
        let input = ProfileInput {
            priorities: vec!["sleep".into(), "anxiety".into(), "sleep".into()],
            ..Default::default()
        };
        let profile = UserProfile::from_input(&input);
        assert_eq!(profile.priorities(), &["sleep", "anxiety"]);
    }

    #[test]
    fn level_lookup() {
        let input = ProfileInput {
            anxiety_level: 6,
            insomnia_level: 2,
            ..Default::default()
        };
        let profile = UserProfile::from_input(&input);
        assert_eq!(profile.level("anxiety"), 6);
        assert_eq!(profile.level("insomnia"), 2);
        assert_eq!(profile.level("stress"), 0);
        assert_eq!(profile.level("unknown"), 0);
    }
}
