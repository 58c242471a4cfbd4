use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{read_input, Result};

/// Prefix for environment variables that override project vars.
///
/// `TAXONOMY2SQL_VAR_CAPITAL_PRICE_THRESHOLD=50000` sets
/// `capital_price_threshold`.
pub const ENV_PREFIX: &str = "TAXONOMY2SQL_VAR_";

/// Flat string-keyed settings, as exposed by a project's `vars` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectVars {
    vars: BTreeMap<String, String>,
}

impl ProjectVars {
    /// Create an empty set of vars.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load vars from a project settings JSON document.
    ///
    /// Accepts either a settings file with a top-level `vars` object
    /// (`dataform.json` shape) or a bare object of vars. String values are
    /// kept verbatim, numbers and booleans are stringified, and any other
    /// value is skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(json)?;
        let object = match parsed {
            Value::Object(mut root) => match root.remove("vars") {
                Some(Value::Object(vars)) => vars,
                Some(other) => {
                    root.insert("vars".to_string(), other);
                    root
                }
                None => root,
            },
            other => {
                warn!(kind = %json_kind(&other), "project settings are not a JSON object");
                serde_json::Map::new()
            }
        };

        let mut out = Self::new();
        for (key, value) in object {
            match value {
                Value::String(s) => out.set(key, s),
                Value::Number(n) => out.set(key, n.to_string()),
                Value::Bool(b) => out.set(key, b.to_string()),
                other => warn!(key = %key, value = %other, "skipping non-scalar project var"),
            }
        }
        debug!(count = out.len(), "loaded project vars from JSON");
        Ok(out)
    }

    /// Load vars from a project settings file such as `dataform.json`.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&read_input(path)?)
    }

    /// Collect vars from `(name, value)` pairs whose name starts with `prefix`.
    ///
    /// The prefix is stripped and the remainder lowercased to form the key.
    pub fn from_env_iter<I>(iter: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut out = Self::new();
        for (name, value) in iter {
            if let Some(key) = name.strip_prefix(prefix) {
                if !key.is_empty() {
                    out.set(key.to_ascii_lowercase(), value);
                }
            }
        }
        out
    }

    /// Collect overrides from the process environment using [`ENV_PREFIX`].
    pub fn from_env() -> Self {
        let out = Self::from_env_iter(std::env::vars(), ENV_PREFIX);
        debug!(count = out.len(), "loaded project vars from environment");
        out
    }

    /// Set a single var, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Overlay `other` on top of `self`; keys present in `other` win.
    pub fn merge(&mut self, other: ProjectVars) {
        self.vars.extend(other.vars);
    }

    /// Raw value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value for `key` when it is set to something other than blank text.
    ///
    /// Blank overrides count as absent so that the built-in default applies.
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// Pipe-delimited list for `key`, or `None` when absent or blank.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.non_blank(key).map(parse_list)
    }

    /// Numeric value for `key`, or `None` when absent or blank.
    ///
    /// Unparseable values coerce to `NaN` and are reported with a warning;
    /// they are not rejected.
    pub fn number(&self, key: &str) -> Option<f64> {
        let raw = self.non_blank(key)?.trim();
        match raw.parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(key, value = raw, "project var is not numeric; coercing to NaN");
                Some(f64::NAN)
            }
        }
    }

    /// Number of vars set.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// `true` when no vars are set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Split a pipe-delimited override into trimmed, non-empty items.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
