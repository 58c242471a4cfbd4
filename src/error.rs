use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for taxonomy construction and configuration loading.
///
/// Every variant is a precondition violation detected before any SQL text is
/// emitted; generation itself never fails once the inputs are constructed.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// The alias table has no canonical names.
    #[error("alias table must contain at least one canonical name")]
    EmptyAliasTable,
    /// A canonical name is blank.
    #[error("canonical name must not be empty")]
    EmptyCanonicalName,
    /// A canonical name has no aliases.
    #[error("canonical name '{0}' has no aliases")]
    EmptyAliasList(String),
    /// A canonical name lists a blank alias.
    #[error("canonical name '{0}' lists a blank alias")]
    EmptyAlias(String),
    /// A canonical name appears twice in the table.
    #[error("canonical name '{0}' is defined more than once")]
    DuplicateCanonicalName(String),
    /// One raw alias is claimed by two canonical names.
    #[error("alias '{alias}' is listed under both '{first}' and '{second}'")]
    DuplicateAlias {
        /// The conflicting raw alias.
        alias: String,
        /// Canonical name that claimed the alias first.
        first: String,
        /// Canonical name that claimed it again.
        second: String,
    },
    /// The category taxonomy has no rules.
    #[error("category taxonomy must contain at least one rule")]
    EmptyTaxonomy,
    /// A category label is blank.
    #[error("category label must not be empty")]
    EmptyCategoryLabel,
    /// A category rule can never match anything.
    #[error("category '{0}' has neither primary terms nor a description pattern")]
    EmptyCategoryRule(String),
    /// A category rule sets both a raw regex and keyword fragments.
    #[error("category '{0}' sets both description_regex and description_keywords")]
    ConflictingDescriptionPattern(String),
    /// A category label appears twice in the taxonomy.
    #[error("category '{0}' is defined more than once")]
    DuplicateCategoryLabel(String),
    /// Input JSON could not be decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

/// Read a UTF-8 input file, keeping the path in the error.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TaxonomyError>;
