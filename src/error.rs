//! Error types for catalog loading and formulation.

use std::path::PathBuf;

use thiserror::Error;

use crate::rules::Role;

/// Errors surfaced by the formulation engine.
///
/// Catalog errors are fatal at load time: a single malformed record fails the
/// whole load, there is no partial catalog. Malformed antagonism condition
/// strings are deliberately NOT errors — they are logged at load and compiled
/// to a trigger that never fires.
#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("malformed catalog entry '{id}': {reason}")]
    MalformedCatalogEntry { id: String, reason: String },

    /// The dosage stage received more plants of one role than the selector
    /// is allowed to produce. This is an internal invariant violation, never
    /// silently truncated.
    #[error("composition holds {count} {role} plants (limit {limit})")]
    RoleCardinality {
        role: Role,
        count: usize,
        limit: usize,
    },
}
