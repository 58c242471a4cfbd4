//! Literal rendering for generated SQL text.
//!
//! Quote doubling is the only SQL sanitization performed anywhere in the
//! crate. Field names pass through untouched, so callers must draw them from
//! a fixed set of known column identifiers.

/// Characters that carry special meaning in an RE2/Rust regular expression
/// outside of a character class.
const REGEX_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// Double embedded single quotes so `value` can sit inside a SQL string literal.
///
/// No other character is altered.
pub fn escape_sql_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render `value` as a single-quoted SQL string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_sql_literal(value))
}

/// Render values as a `BigQuery` array literal.
///
/// The closing bracket is preceded by a space (`['A', 'B' ]`), matching the
/// text the downstream templates already diff against.
pub fn to_sql_array<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| quote_literal(v.as_ref())).collect();
    format!("[{} ]", items.join(", "))
}

/// `UPPER(<field>) LIKE '%<needle>%'`: case-insensitive substring test.
///
/// The needle is uppercased to match the uppercased field; `%` and `_`
/// inside it keep their `LIKE` wildcard meaning.
pub fn uppercase_like(field_name: &str, needle: &str) -> String {
    format!(
        "UPPER({field_name}) LIKE '%{}%'",
        escape_sql_literal(&needle.to_uppercase())
    )
}

/// `REGEXP_CONTAINS(UPPER(<field>), r'<pattern>')`.
pub fn regexp_contains_upper(field_name: &str, pattern: &str) -> String {
    format!(
        "REGEXP_CONTAINS(UPPER({field_name}), r'{}')",
        escape_sql_literal(pattern)
    )
}

/// Backslash-escape every regex metacharacter so `value` matches literally.
pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if REGEX_METACHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
