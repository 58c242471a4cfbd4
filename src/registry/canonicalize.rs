use tracing::debug;

use crate::registry::alias_table::AliasTable;
use crate::sql::literal::quote_literal;

/// Label emitted for raw values that match no alias.
pub const OTHER_LABEL: &str = "OTHER";

/// Compile `table` into a `CASE` expression that maps `field_name` to its
/// canonical name.
///
/// Each canonical name becomes one `WHEN UPPER(field) IN (...)` branch, in
/// table order, so the comparison is case-insensitive and exact. Aliases are
/// uppercased here to keep that true for mixed-case configuration. Unmatched
/// values land on [`OTHER_LABEL`].
///
/// `field_name` is spliced in verbatim.
pub fn compile_canonicalization_expression(table: &AliasTable, field_name: &str) -> String {
    let upper_field = format!("UPPER({field_name})");
    let mut lines = Vec::with_capacity(table.len() + 2);
    lines.push("CASE".to_string());
    for entry in table.entries() {
        let values: Vec<String> = entry
            .aliases
            .iter()
            .map(|alias| quote_literal(&alias.to_uppercase()))
            .collect();
        lines.push(format!(
            "    WHEN {upper_field} IN ({}) THEN {}",
            values.join(", "),
            quote_literal(&entry.canonical)
        ));
    }
    lines.push(format!("    ELSE {}", quote_literal(OTHER_LABEL)));
    lines.push("END".to_string());

    debug!(
        field = field_name,
        branches = table.len(),
        "compiled canonicalization expression"
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::alias_table::AliasEntry;

    #[test]
    fn single_entry_layout_is_exact() {
        let table = AliasTable::new(vec![AliasEntry::new("GE", &["GE", "GE HEALTHCARE"])])
            .expect("table should be valid");
        assert_eq!(
            compile_canonicalization_expression(&table, "Manufacturer_Name"),
            "CASE\n    WHEN UPPER(Manufacturer_Name) IN ('GE', 'GE HEALTHCARE') THEN 'GE'\n    ELSE 'OTHER'\nEND"
        );
    }

    #[test]
    fn aliases_are_uppercased_and_quotes_doubled() {
        let table = AliasTable::new(vec![AliasEntry::new(
            "O'NEIL",
            &["o'neil medical", "O'NEIL"],
        )])
        .expect("table should be valid");
        let sql = compile_canonicalization_expression(&table, "mfr");
        assert!(sql.contains("IN ('O''NEIL MEDICAL', 'O''NEIL') THEN 'O''NEIL'"));
    }

    #[test]
    fn branch_order_follows_table_order() {
        let table = AliasTable::new(vec![
            AliasEntry::new("Z", &["ZED"]),
            AliasEntry::new("A", &["AY"]),
        ])
        .expect("table should be valid");
        let sql = compile_canonicalization_expression(&table, "f");
        let z = sql.find("THEN 'Z'").expect("Z branch");
        let a = sql.find("THEN 'A'").expect("A branch");
        assert!(z < a);
    }
}
