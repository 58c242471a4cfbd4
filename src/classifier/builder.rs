use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::keyword_pattern::KeywordPattern;
use crate::classifier::taxonomy::CategoryTaxonomy;
use crate::config::capital::CapitalConfig;
use crate::registry::alias_table::AliasTable;
use crate::registry::canonicalize::compile_canonicalization_expression;
use crate::sql::literal::{quote_literal, regexp_contains_upper, uppercase_like};
use crate::sql::{CONTRACT_CATEGORY_FIELD, MANUFACTURER_NAME_FIELD, PRODUCT_DESCRIPTION_FIELD};

/// Every expression the capital equipment templates interpolate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapitalExpressions {
    /// Boolean: the contract category contains any primary term.
    pub category_match_expression: String,
    /// Inclusion keyword regex (may be empty).
    pub positive_regex: KeywordPattern,
    /// Exclusion keyword regex (may be empty).
    pub negative_regex: KeywordPattern,
    /// Minimum unit price for capital equipment.
    pub capital_price_threshold: f64,
    /// Canonical manufacturer `CASE` over the manufacturer column.
    pub manufacturer_case: String,
    /// Tiered report category `CASE`; `NULL` when nothing matches.
    pub report_category_case: String,
}

impl CapitalExpressions {
    /// Compile all expressions from one resolved configuration.
    pub fn build(config: &CapitalConfig, taxonomy: &CategoryTaxonomy, aliases: &AliasTable) -> Self {
        let expressions = Self {
            category_match_expression: category_match_expression(&config.primary_category_terms),
            positive_regex: KeywordPattern::from_keywords(&config.positive_keywords),
            negative_regex: KeywordPattern::from_keywords(&config.negative_keywords),
            capital_price_threshold: config.price_threshold,
            manufacturer_case: compile_canonicalization_expression(aliases, MANUFACTURER_NAME_FIELD),
            report_category_case: report_category_expression(taxonomy),
        };
        info!(
            tiers = taxonomy.len(),
            brands = aliases.len(),
            threshold = expressions.capital_price_threshold,
            "built capital classification expressions"
        );
        expressions
    }
}

/// OR of `(UPPER(Contract_Category) LIKE '%term%')` over `primary_terms`.
///
/// Zero terms yields the literal `FALSE`, so the predicate matches nothing and
/// composes safely with `AND`/`OR` in the enclosing query.
pub fn category_match_expression<S: AsRef<str>>(primary_terms: &[S]) -> String {
    if primary_terms.is_empty() {
        return "FALSE".to_string();
    }
    primary_terms
        .iter()
        .map(|term| format!("({})", uppercase_like(CONTRACT_CATEGORY_FIELD, term.as_ref())))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Tiered `CASE` assigning a category label per record.
///
/// Branches follow the taxonomy's rule order and the first match wins. Each
/// branch ORs the rule's primary-term `LIKE` clauses with its description
/// regex. Records matching no rule get `NULL`.
pub fn report_category_expression(taxonomy: &CategoryTaxonomy) -> String {
    let mut lines = Vec::with_capacity(taxonomy.len() + 3);
    lines.push("CASE".to_string());
    for rule in taxonomy.rules() {
        let mut clauses: Vec<String> = rule
            .primary_terms
            .iter()
            .map(|term| uppercase_like(CONTRACT_CATEGORY_FIELD, term))
            .collect();
        if let Some(regex) = rule.description_regex() {
            clauses.push(regexp_contains_upper(PRODUCT_DESCRIPTION_FIELD, &regex));
        }
        lines.push(format!(
            "    WHEN {} THEN {}",
            clauses.join(" OR "),
            quote_literal(&rule.label)
        ));
    }
    lines.push("    ELSE NULL".to_string());
    lines.push("  END".to_string());

    debug!(tiers = taxonomy.len(), "compiled report category expression");
    lines.join("\n")
}
