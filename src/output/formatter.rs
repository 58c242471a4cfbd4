use std::path::{Component, Path};

use tracing::info;

use crate::classifier::builder::CapitalExpressions;
use crate::classifier::taxonomy::CategoryTaxonomy;
use crate::config::capital::CapitalConfig;
use crate::registry::alias_table::AliasTable;
use crate::output::report;

/// Write all generated artifacts to `output_dir`, prefixed with `name`.
///
/// Produces `<name>_manufacturer_case.sql`, `<name>_category_match.sql`,
/// `<name>_report_category_case.sql`, `<name>_expressions.json` and
/// `<name>_report.md`.
pub fn write_output(
    output_dir: &Path,
    name: &str,
    config: &CapitalConfig,
    taxonomy: &CategoryTaxonomy,
    aliases: &AliasTable,
    expressions: &CapitalExpressions,
) -> Result<(), String> {
    validate_output_name(name)?;

    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create output directory: {e}"))?;

    let sql_files = [
        ("manufacturer_case", &expressions.manufacturer_case),
        ("category_match", &expressions.category_match_expression),
        ("report_category_case", &expressions.report_category_case),
    ];
    for (suffix, sql) in sql_files {
        let path = output_dir.join(format!("{name}_{suffix}.sql"));
        std::fs::write(&path, format!("{sql}\n"))
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    }

    let json_path = output_dir.join(format!("{name}_expressions.json"));
    let json = serde_json::to_string_pretty(expressions)
        .map_err(|e| format!("Failed to serialize expressions: {e}"))?;
    std::fs::write(&json_path, json)
        .map_err(|e| format!("Failed to write {}: {e}", json_path.display()))?;

    let report_path = output_dir.join(format!("{name}_report.md"));
    let report_content = report::build_report(config, taxonomy, aliases, expressions);
    std::fs::write(&report_path, &report_content)
        .map_err(|e| format!("Failed to write {}: {e}", report_path.display()))?;

    info!(dir = %output_dir.display(), name, "wrote generated expressions");
    Ok(())
}

/// Output names become file-name prefixes, so they must be one plain path
/// component with no separators.
fn validate_output_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Output name must not be empty".to_string());
    }
    let path = Path::new(name);
    let problem = if path.is_absolute() {
        Some("absolute paths are not allowed")
    } else if path
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        Some("traversal segments are not allowed")
    } else if name.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else {
        None
    };
    match problem {
        Some(problem) => Err(format!("Invalid output name '{name}': {problem}")),
        None => Ok(()),
    }
}
