//! Ordered category rules for tiered classification.
//!
//! The taxonomy is a sequence, not a map: rule order is tier order, and the
//! compiled `CASE` assigns the first label whose rule matches. Keeping one
//! ordering here means the tier priority cannot drift away from the rule set.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::keyword_pattern::KeywordPattern;
use crate::error::{read_input, Result, TaxonomyError};

/// How a rule tests the free-text description field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionPattern {
    /// Hand-written regex used verbatim (e.g. `(MRI|MAGNETIC\s+RESONANCE)`).
    Regex(String),
    /// Literal keyword fragments compiled into an escaped alternation.
    Keywords(Vec<String>),
}

impl DescriptionPattern {
    /// Regex text tested against the upper-cased description; may be empty.
    ///
    /// Keyword fragments are uppercased before escaping. Raw regexes are used
    /// as written.
    pub fn compile(&self) -> String {
        match self {
            DescriptionPattern::Regex(regex) => regex.clone(),
            DescriptionPattern::Keywords(keywords) => {
                let upper: Vec<String> = keywords.iter().map(|k| k.to_uppercase()).collect();
                KeywordPattern::from_keywords(&upper).as_str().to_string()
            }
        }
    }
}

/// One tier of the report category `CASE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryRule {
    /// Label emitted when the rule matches.
    pub label: String,
    /// Phrases tested as substrings of the contract category.
    pub primary_terms: Vec<String>,
    /// Optional regex tested against the product description.
    pub description_pattern: Option<DescriptionPattern>,
}

impl CategoryRule {
    /// Rule with a hand-written description regex.
    pub fn with_regex<S: AsRef<str>>(label: &str, primary_terms: &[S], regex: &str) -> Self {
        Self {
            label: label.to_string(),
            primary_terms: primary_terms
                .iter()
                .map(|t| t.as_ref().to_string())
                .collect(),
            description_pattern: Some(DescriptionPattern::Regex(regex.to_string())),
        }
    }

    /// Rule whose description regex is compiled from literal keywords.
    pub fn with_keywords<S: AsRef<str>, K: AsRef<str>>(
        label: &str,
        primary_terms: &[S],
        keywords: &[K],
    ) -> Self {
        Self {
            label: label.to_string(),
            primary_terms: primary_terms
                .iter()
                .map(|t| t.as_ref().to_string())
                .collect(),
            description_pattern: Some(DescriptionPattern::Keywords(
                keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            )),
        }
    }

    /// Compiled description regex, or `None` when the rule has none or it is empty.
    pub fn description_regex(&self) -> Option<String> {
        self.description_pattern
            .as_ref()
            .map(DescriptionPattern::compile)
            .filter(|regex| !regex.is_empty())
    }

    fn can_match(&self) -> bool {
        !self.primary_terms.is_empty() || self.description_regex().is_some()
    }
}

/// JSON form of a rule: at most one of `description_regex` and
/// `description_keywords` may be set.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryRuleSpec {
    label: String,
    #[serde(default)]
    primary_terms: Vec<String>,
    #[serde(default)]
    description_regex: Option<String>,
    #[serde(default)]
    description_keywords: Option<Vec<String>>,
}

impl TryFrom<CategoryRuleSpec> for CategoryRule {
    type Error = TaxonomyError;

    fn try_from(spec: CategoryRuleSpec) -> Result<Self> {
        let description_pattern = match (spec.description_regex, spec.description_keywords) {
            (Some(_), Some(_)) => {
                return Err(TaxonomyError::ConflictingDescriptionPattern(spec.label));
            }
            (Some(regex), None) => Some(DescriptionPattern::Regex(regex)),
            (None, Some(keywords)) => Some(DescriptionPattern::Keywords(keywords)),
            (None, None) => None,
        };
        Ok(Self {
            label: spec.label,
            primary_terms: spec.primary_terms,
            description_pattern,
        })
    }
}

/// Validated, priority-ordered list of category rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTaxonomy {
    rules: Vec<CategoryRule>,
}

impl CategoryTaxonomy {
    /// Validate and wrap `rules`; earlier rules take priority.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(TaxonomyError::EmptyTaxonomy);
        }
        let mut labels = HashSet::new();
        for rule in &rules {
            if rule.label.trim().is_empty() {
                return Err(TaxonomyError::EmptyCategoryLabel);
            }
            if !labels.insert(rule.label.as_str()) {
                return Err(TaxonomyError::DuplicateCategoryLabel(rule.label.clone()));
            }
            if !rule.can_match() {
                return Err(TaxonomyError::EmptyCategoryRule(rule.label.clone()));
            }
        }
        debug!(tiers = rules.len(), "validated category taxonomy");
        Ok(Self { rules })
    }

    /// Load a taxonomy from a JSON array of rules.
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: Vec<CategoryRuleSpec> = serde_json::from_str(json)?;
        let rules = specs
            .into_iter()
            .map(CategoryRule::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(rules)
    }

    /// Load a taxonomy from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&read_input(path)?)
    }

    /// Rules in tier order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Labels in tier order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label.as_str())
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`: a validated taxonomy has at least one tier.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Capital imaging and monitoring tiers, highest priority first.
pub fn default_capital_taxonomy() -> CategoryTaxonomy {
    CategoryTaxonomy {
        rules: vec![
            CategoryRule::with_regex(
                "MRI",
                &["MAGNETIC RESONANCE"],
                r"(MRI|MAGNETIC\s+RESONANCE)",
            ),
            CategoryRule::with_regex(
                "CT",
                &["COMPUTED TOMOGRAPHY"],
                r"(CT|COMPUTED\s+TOMOGRAPHY|TOMOGRAPHY)",
            ),
            CategoryRule::with_regex(
                "Monitoring",
                &["PHYSIOLOGICAL MONITORING"],
                r"(MONITORING|PATIENT\s+MONITOR)",
            ),
            CategoryRule::with_regex(
                "Ultrasound HC",
                &["ULTRASOUND RADIOLOGY CARDIOLOGY HAND CARRIED"],
                r"(ULTRASOUND|HAND\s+CARRIED)",
            ),
        ],
    }
}
