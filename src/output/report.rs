use std::fmt::Write;

use crate::classifier::builder::CapitalExpressions;
use crate::classifier::taxonomy::CategoryTaxonomy;
use crate::config::capital::CapitalConfig;
use crate::registry::alias_table::AliasTable;

/// Build a markdown summary of the configuration behind the expressions.
pub fn build_report(
    config: &CapitalConfig,
    taxonomy: &CategoryTaxonomy,
    aliases: &AliasTable,
    expressions: &CapitalExpressions,
) -> String {
    let mut report = String::new();

    writeln!(report, "# taxonomy2sql Generation Report").unwrap();
    writeln!(report).unwrap();

    writeln!(report, "## Capital Threshold").unwrap();
    writeln!(report).unwrap();
    writeln!(
        report,
        "Minimum unit price: `{}`",
        expressions.capital_price_threshold
    )
    .unwrap();
    writeln!(report).unwrap();

    writeln!(report, "## Category Tiers").unwrap();
    writeln!(report).unwrap();
    writeln!(report, "| Tier | Label | Primary Terms | Description Regex |").unwrap();
    writeln!(report, "|------|-------|---------------|-------------------|").unwrap();
    for (tier, rule) in taxonomy.rules().iter().enumerate() {
        let regex = rule
            .description_regex()
            .map(|r| format!("`{}`", escape_cell(&r)))
            .unwrap_or_else(|| "N/A".to_string());
        writeln!(
            report,
            "| {} | {} | {} | {} |",
            tier + 1,
            escape_cell(&rule.label),
            format_list(&rule.primary_terms),
            regex
        )
        .unwrap();
    }
    writeln!(report).unwrap();

    writeln!(report, "## Contract Category Terms").unwrap();
    writeln!(report).unwrap();
    if config.primary_category_terms.is_empty() {
        writeln!(report, "None configured; the category match is `FALSE`.").unwrap();
    } else {
        for term in &config.primary_category_terms {
            writeln!(report, "- {term}").unwrap();
        }
    }
    writeln!(report).unwrap();

    writeln!(report, "## Keyword Patterns").unwrap();
    writeln!(report).unwrap();
    writeln!(
        report,
        "- Positive ({} keywords): {}",
        config.positive_keywords.len(),
        format_pattern(expressions.positive_regex.as_str())
    )
    .unwrap();
    writeln!(
        report,
        "- Negative ({} keywords): {}",
        config.negative_keywords.len(),
        format_pattern(expressions.negative_regex.as_str())
    )
    .unwrap();
    writeln!(report).unwrap();

    writeln!(report, "## Manufacturer Aliases").unwrap();
    writeln!(report).unwrap();
    writeln!(report, "| Canonical | Aliases |").unwrap();
    writeln!(report, "|-----------|---------|").unwrap();
    for entry in aliases.entries() {
        writeln!(
            report,
            "| {} | {} |",
            escape_cell(&entry.canonical),
            entry.aliases.len()
        )
        .unwrap();
    }

    report
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        escape_cell(&items.join(", "))
    }
}

fn format_pattern(pattern: &str) -> String {
    if pattern.is_empty() {
        "(empty, matches nothing)".to_string()
    } else {
        format!("`{}`", escape_cell(pattern))
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
