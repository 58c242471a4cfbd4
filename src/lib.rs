//! Compile spend-taxonomy configuration into deterministic SQL classification
//! expressions.
//!
//! The crate never executes SQL. It turns manufacturer alias tables, category
//! rules and keyword lists into expression text that a downstream query
//! engine evaluates over procurement records.
#![warn(missing_docs)]

/// Category taxonomy, keyword regex compilation, and the capital expression builder.
pub mod classifier;
/// Project vars and the capital-equipment settings resolved from them.
pub mod config;
/// Error type shared by construction and loading code paths.
pub mod error;
/// File output and markdown report generation.
pub mod output;
/// Manufacturer alias table and its canonicalizing `CASE` compiler.
pub mod registry;
/// SQL literal and predicate rendering helpers.
pub mod sql;

pub use error::{Result, TaxonomyError};
