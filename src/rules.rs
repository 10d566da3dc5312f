//! Rule types shared by catalog records and the pipeline stages.
//!
//! Constraint and antagonism actions are closed enums so that rule dispatch is
//! exhaustiveness-checked at compile time instead of comparing strings per
//! request. Antagonism condition strings ("anxiety>=6") are parsed once at
//! catalog load into [`LevelRule`] and evaluated as a pure function over the
//! profile's numeric levels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// Structural slot of a plant in the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
    Support,
}

impl Role {
    /// Title-cased label for display records.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Primary => "Primary",
            Role::Secondary => "Secondary",
            Role::Support => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Support => "support",
        };
        f.write_str(s)
    }
}

/// A conditional dosing rule on a single plant.
///
/// `condition` names a boolean flag in the profile's conditions map; the rule
/// only applies while that flag is true.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstraintRule {
    pub condition: String,
    #[serde(flatten)]
    pub action: ConstraintAction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ConstraintAction {
    /// Disqualifies the plant from the rest of the pipeline.
    Exclude,
    /// Lowers the working max dose share to `value` (never raises it).
    CapPercent { value: f64 },
    /// Overrides the plant's role for this request.
    SetRole { value: Role },
}

/// Aggregate dose cap shared by every member of a functional family.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FamilyLimit {
    pub max_sum: f64,
}

/// Declared positive interaction: boosts relevance when the partner is also
/// selected. One-directional as declared — mirrored declarations apply twice.
#[derive(Debug, Clone, Deserialize)]
pub struct Synergy {
    #[serde(rename = "with")]
    pub partner: String,
    pub bonus: f64,
}

/// Declared negative interaction, compiled from the raw catalog record.
#[derive(Debug, Clone)]
pub struct AntagonismRule {
    pub partner: String,
    pub trigger: Trigger,
    pub action: AntagonismAction,
}

#[derive(Debug, Clone)]
pub enum AntagonismAction {
    /// Removes the plant from the selected set.
    Exclude,
    /// Subtracts `penalty` from the plant's relevance score.
    Penalize { penalty: f64 },
}

/// When an antagonism entry fires.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// No condition declared: fires whenever the partner is selected.
    Always,
    /// Fires iff the level comparison holds for the current profile.
    Level(LevelRule),
    /// Condition string did not parse at load; never fires.
    Invalid,
}

impl Trigger {
    pub fn fires(&self, profile: &UserProfile) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Level(rule) => rule.holds(profile),
            Trigger::Invalid => false,
        }
    }
}

/// A single numeric comparison against a profile level, e.g. `anxiety>=6`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRule {
    pub axis: String,
    pub op: Comparator,
    pub threshold: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Ge,
    Gt,
    Eq,
    Lt,
    Le,
}

impl LevelRule {
    /// Parse `<identifier><operator><number>`. Returns `None` when the string
    /// does not fit the shape; callers decide how to handle that (the catalog
    /// loader warns and compiles [`Trigger::Invalid`]).
    pub fn parse(text: &str) -> Option<Self> {
        // Two-character operators first so ">=" is not read as ">" + "=5".
        const OPS: [(&str, Comparator); 6] = [
            (">=", Comparator::Ge),
            ("<=", Comparator::Le),
            ("==", Comparator::Eq),
            (">", Comparator::Gt),
            ("<", Comparator::Lt),
            ("=", Comparator::Eq),
        ];

        for (token, op) in OPS {
            if let Some(pos) = text.find(token) {
                let axis = text[..pos].trim();
                let rhs = text[pos + token.len()..].trim();
                if axis.is_empty()
                    || !axis.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    return None;
                }
                let threshold: i32 = rhs.parse().ok()?;
                return Some(LevelRule {
                    axis: axis.to_string(),
                    op,
                    threshold,
                });
            }
        }
        None
    }

    /// Evaluate against the profile's numeric levels. Unknown identifiers
    /// read as level 0.
    pub fn holds(&self, profile: &UserProfile) -> bool {
        let level = profile.level(&self.axis);
        match self.op {
            Comparator::Ge => level >= self.threshold,
            Comparator::Gt => level > self.threshold,
            Comparator::Eq => level == self.threshold,
            Comparator::Lt => level < self.threshold,
            Comparator::Le => level <= self.threshold,
        }
    }
}

/// Outcome of folding a plant's constraint rules against a profile.
#[derive(Debug)]
pub enum ConstraintOutcome {
    /// A triggered exclude rule disqualified the plant. First match wins.
    Excluded { condition: String },
    /// The plant survives with (possibly lowered) cap and (possibly
    /// overridden) role, plus audit notes for every applied adjustment.
    Allowed {
        max_percent: f64,
        role: Role,
        notes: Vec<String>,
    },
}

/// Ordered fold over a plant's constraint rules.
///
/// Rules are evaluated in catalog order: the first triggered `exclude` wins
/// and stops evaluation; `cap_percent` only ever lowers the cap; `set_role`
/// overwrites, so the last triggered override is the one that sticks.
pub fn evaluate_constraints(
    rules: &[ConstraintRule],
    profile: &UserProfile,
    max_percent: f64,
    default_role: Role,
) -> ConstraintOutcome {
    let mut max_percent = max_percent;
    let mut role = default_role;
    let mut notes = Vec::new();

    for rule in rules {
        if !profile.condition(&rule.condition) {
            continue;
        }
        match rule.action {
            ConstraintAction::Exclude => {
                return ConstraintOutcome::Excluded {
                    condition: rule.condition.clone(),
                };
            }
            ConstraintAction::CapPercent { value } => {
                if value < max_percent {
                    max_percent = value;
                    notes.push(format!("Capped at {}% via {}", value, rule.condition));
                }
            }
            ConstraintAction::SetRole { value } => {
                role = value;
                notes.push(format!("Shifted to {} via {}", value, rule.condition));
            }
        }
    }

    ConstraintOutcome::Allowed {
        max_percent,
        role,
        notes,
    }
}
