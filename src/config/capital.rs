use serde::Serialize;
use tracing::debug;

use crate::config::vars::ProjectVars;

/// Var key for the minimum unit price of capital equipment.
pub const CAPITAL_PRICE_THRESHOLD_VAR: &str = "capital_price_threshold";
/// Var key for the pipe-delimited contract-category phrases.
pub const CAPITAL_PRIMARY_CATEGORIES_VAR: &str = "capital_primary_categories";
/// Var key for the pipe-delimited inclusion keywords.
pub const CAPITAL_POSITIVE_KEYWORDS_VAR: &str = "capital_positive_keywords";
/// Var key for the pipe-delimited exclusion keywords.
pub const CAPITAL_NEGATIVE_KEYWORDS_VAR: &str = "capital_negative_keywords";

/// Price floor applied when no threshold override is set.
pub const DEFAULT_CAPITAL_PRICE_THRESHOLD: f64 = 25_000.0;

/// Contract-category phrases that mark a line as capital imaging/monitoring.
pub const DEFAULT_PRIMARY_CATEGORY_TERMS: &[&str] = &[
    "MAGNETIC RESONANCE",
    "COMPUTED TOMOGRAPHY",
    "PHYSIOLOGICAL MONITORING",
    "ULTRASOUND RADIOLOGY CARDIOLOGY HAND CARRIED",
];

/// Description keywords that suggest a capital equipment purchase.
pub const DEFAULT_POSITIVE_KEYWORDS: &[&str] = &[
    "MRI",
    "CT",
    "TOMOGRAPHY",
    "RESONANCE",
    "MONITORING",
    "ULTRASOUND",
    "HAND CARRIED",
];

/// Description keywords that mark service, software or labor lines.
pub const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "SERVICE",
    "MAINTENANCE",
    "WARRANTY",
    "AGREEMENT",
    "REPAIR",
    "SOFTWARE",
    "LICENSE",
    "RENEWAL",
    "LABOR",
    "SOFTWARE SUPPORT",
    "INSTALLATION",
];

/// Capital-equipment classification settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapitalConfig {
    /// Minimum unit price for a line to qualify as capital equipment.
    pub price_threshold: f64,
    /// Phrases matched as substrings of the contract category.
    pub primary_category_terms: Vec<String>,
    /// Keyword fragments compiled into the inclusion regex.
    pub positive_keywords: Vec<String>,
    /// Keyword fragments compiled into the exclusion regex.
    pub negative_keywords: Vec<String>,
}

impl Default for CapitalConfig {
    fn default() -> Self {
        Self {
            price_threshold: DEFAULT_CAPITAL_PRICE_THRESHOLD,
            primary_category_terms: to_owned_list(DEFAULT_PRIMARY_CATEGORY_TERMS),
            positive_keywords: to_owned_list(DEFAULT_POSITIVE_KEYWORDS),
            negative_keywords: to_owned_list(DEFAULT_NEGATIVE_KEYWORDS),
        }
    }
}

impl CapitalConfig {
    /// Resolve settings from project vars, falling back per key to the defaults.
    ///
    /// A key is "absent" only when unset or blank. An explicit `0` threshold
    /// is kept, and a list override made only of separators (`" | "`) yields
    /// an empty list rather than the default.
    pub fn from_vars(vars: &ProjectVars) -> Self {
        let defaults = Self::default();
        let config = Self {
            price_threshold: vars
                .number(CAPITAL_PRICE_THRESHOLD_VAR)
                .unwrap_or(defaults.price_threshold),
            primary_category_terms: vars
                .list(CAPITAL_PRIMARY_CATEGORIES_VAR)
                .unwrap_or(defaults.primary_category_terms),
            positive_keywords: vars
                .list(CAPITAL_POSITIVE_KEYWORDS_VAR)
                .unwrap_or(defaults.positive_keywords),
            negative_keywords: vars
                .list(CAPITAL_NEGATIVE_KEYWORDS_VAR)
                .unwrap_or(defaults.negative_keywords),
        };
        debug!(
            threshold = config.price_threshold,
            primary_terms = config.primary_category_terms.len(),
            positive = config.positive_keywords.len(),
            negative = config.negative_keywords.len(),
            "resolved capital config"
        );
        config
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
