use std::fmt;

use serde::Serialize;

use crate::sql::literal::{escape_regex, regexp_contains_upper};

/// A keyword list compiled into a single `|` alternation regex.
///
/// Every keyword is metacharacter-escaped so it matches literally. Order is
/// preserved and duplicates are kept. An empty keyword list yields an empty
/// pattern; use [`KeywordPattern::contains_predicate`] rather than splicing
/// the raw text when the list may be empty, since an empty regex matches
/// every string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct KeywordPattern(String);

impl KeywordPattern {
    /// Compile `keywords` into an escaped alternation.
    ///
    /// Blank keywords are skipped: an empty alternative would match anything.
    pub fn from_keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        let parts: Vec<String> = keywords
            .iter()
            .map(|keyword| keyword.as_ref())
            .filter(|keyword| !keyword.is_empty())
            .map(escape_regex)
            .collect();
        Self(parts.join("|"))
    }

    /// The regex text; empty when no keywords were given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the list compiled to nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Boolean SQL testing `UPPER(field)` against this pattern.
    ///
    /// Renders `FALSE` for an empty pattern so that "no keywords" matches
    /// nothing.
    pub fn contains_predicate(&self, field_name: &str) -> String {
        if self.is_empty() {
            "FALSE".to_string()
        } else {
            regexp_contains_upper(field_name, &self.0)
        }
    }
}

impl fmt::Display for KeywordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
