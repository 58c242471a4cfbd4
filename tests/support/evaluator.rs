//! Row-level interpreter for the expression shapes the crate emits.
//!
//! Only understands the generated grammar (`UPPER(f) IN (...)`,
//! `UPPER(f) LIKE '%x%'`, `REGEXP_CONTAINS(UPPER(f), r'...')`, `OR`, `FALSE`),
//! which is enough to check what a query engine would return for a record.

use std::collections::HashMap;

use regex::Regex;

/// Column values for one record.
pub(crate) type Row<'a> = HashMap<&'a str, &'a str>;

pub(crate) fn row<'a>(pairs: &[(&'a str, &'a str)]) -> Row<'a> {
    pairs.iter().copied().collect()
}

fn unescape(literal: &str) -> String {
    literal.replace("''", "'")
}

fn literal_list(list: &str) -> Vec<String> {
    let item = Regex::new(r"'((?:[^']|'')*)'").expect("literal regex");
    item.captures_iter(list)
        .map(|c| unescape(&c[1]))
        .collect()
}

fn column<'a>(row: &Row<'a>, name: &str) -> String {
    row.get(name).copied().unwrap_or_default().to_uppercase()
}

/// Evaluate one boolean clause against `row`.
pub(crate) fn eval_clause(clause: &str, row: &Row<'_>) -> bool {
    let clause = clause.trim();
    let clause = clause
        .strip_prefix('(')
        .and_then(|c| c.strip_suffix(')'))
        .filter(|inner| inner.starts_with("UPPER("))
        .unwrap_or(clause);

    if clause == "FALSE" {
        return false;
    }
    let like = Regex::new(r"^UPPER\((\w+)\) LIKE '%((?:[^']|'')*)%'$").expect("like regex");
    if let Some(c) = like.captures(clause) {
        return column(row, &c[1]).contains(&unescape(&c[2]));
    }
    let regexp =
        Regex::new(r"^REGEXP_CONTAINS\(UPPER\((\w+)\), r'((?:[^']|'')*)'\)$").expect("regexp regex");
    if let Some(c) = regexp.captures(clause) {
        let pattern = Regex::new(&unescape(&c[2])).expect("generated pattern should compile");
        return pattern.is_match(&column(row, &c[1]));
    }
    let in_list = Regex::new(r"^UPPER\((\w+)\) IN \((.*)\)$").expect("in regex");
    if let Some(c) = in_list.captures(clause) {
        let value = column(row, &c[1]);
        return literal_list(&c[2]).contains(&value);
    }
    panic!("unsupported clause: {clause}");
}

/// Evaluate an `OR` chain of clauses.
///
/// An `IN` list is evaluated whole so alias text is never split.
pub(crate) fn eval_predicate(predicate: &str, row: &Row<'_>) -> bool {
    if predicate.starts_with("UPPER(") && predicate.contains(") IN (") {
        return eval_clause(predicate, row);
    }
    predicate.split(" OR ").any(|clause| eval_clause(clause, row))
}

/// Evaluate a generated `CASE` expression, returning the label or `None` for `NULL`.
pub(crate) fn eval_case(sql: &str, row: &Row<'_>) -> Option<String> {
    let when = Regex::new(r"^WHEN (.*) THEN '((?:[^']|'')*)'$").expect("when regex");
    let else_label = Regex::new(r"^ELSE '((?:[^']|'')*)'$").expect("else regex");
    for line in sql.lines().map(str::trim) {
        if let Some(c) = when.captures(line) {
            if eval_predicate(&c[1], row) {
                return Some(unescape(&c[2]));
            }
        } else if let Some(c) = else_label.captures(line) {
            return Some(unescape(&c[1]));
        } else if line == "ELSE NULL" {
            return None;
        }
    }
    panic!("CASE expression has no ELSE branch:\n{sql}");
}
