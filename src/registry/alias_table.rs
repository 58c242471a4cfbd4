use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{read_input, Result, TaxonomyError};

/// One canonical brand and the raw spellings that collapse into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasEntry {
    /// Normalized brand identity emitted by the `CASE` branch.
    pub canonical: String,
    /// Raw manufacturer strings as they appear in source records.
    pub aliases: Vec<String>,
}

impl AliasEntry {
    /// Build an entry from borrowed strings.
    pub fn new<S: AsRef<str>>(canonical: &str, aliases: &[S]) -> Self {
        Self {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }
}

/// Ordered, validated canonical-name → alias mapping.
///
/// Iteration order is insertion order and drives the branch order of the
/// compiled expression. Construction guarantees the table is non-empty and
/// that no raw alias (compared case-insensitively) belongs to two canonical
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Validate and wrap `entries`.
    pub fn new(entries: Vec<AliasEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(TaxonomyError::EmptyAliasTable);
        }

        let mut canonical_names: HashSet<&str> = HashSet::new();
        let mut owners: HashMap<String, &str> = HashMap::new();
        for entry in &entries {
            if entry.canonical.trim().is_empty() {
                return Err(TaxonomyError::EmptyCanonicalName);
            }
            if !canonical_names.insert(entry.canonical.as_str()) {
                return Err(TaxonomyError::DuplicateCanonicalName(
                    entry.canonical.clone(),
                ));
            }
            if entry.aliases.is_empty() {
                return Err(TaxonomyError::EmptyAliasList(entry.canonical.clone()));
            }
            for alias in &entry.aliases {
                if alias.trim().is_empty() {
                    return Err(TaxonomyError::EmptyAlias(entry.canonical.clone()));
                }
                let key = alias.to_uppercase();
                match owners.get(&key) {
                    Some(owner) if *owner != entry.canonical => {
                        return Err(TaxonomyError::DuplicateAlias {
                            alias: alias.clone(),
                            first: (*owner).to_string(),
                            second: entry.canonical.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(key, entry.canonical.as_str());
                    }
                }
            }
        }

        debug!(
            canonical_names = entries.len(),
            aliases = owners.len(),
            "validated alias table"
        );
        Ok(Self { entries })
    }

    /// Load a table from a JSON array of `{"canonical": .., "aliases": [..]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<AliasEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&read_input(path)?)
    }

    /// Entries in branch order.
    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    /// Number of canonical names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: an alias table is never empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names in branch order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.canonical.as_str())
    }

    /// Resolve a raw value the same way the compiled expression does.
    ///
    /// Case-insensitive exact match; `None` means the expression would fall
    /// through to its sentinel label.
    pub fn canonical_for(&self, raw: &str) -> Option<&str> {
        let needle = raw.to_uppercase();
        self.entries
            .iter()
            .find(|e| e.aliases.iter().any(|a| a.to_uppercase() == needle))
            .map(|e| e.canonical.as_str())
    }
}

/// The imaging and patient-monitoring manufacturer table used by the
/// capital equipment pipeline.
pub fn default_manufacturer_aliases() -> AliasTable {
    let entries = vec![
        AliasEntry::new(
            "GE",
            &[
                "GE",
                "GE HEALTHCARE",
                "GENERAL ELECTRIC",
                "GE MEDICAL SYSTEMS",
                "GE PRECISION HEALTHCARE LLC",
                "GE MEDICAL SYSTEMS INFORMATION TECHNOLOGIES, INC.",
                "GE HEALTHCARE MEDICAL DIAGNOSTICS",
                "GE HEALTHCARE INC.",
                "DATEX-OHMEDA, INC.",
                "GE HEALTHCARE TECHNOLOGIES INC.",
            ],
        ),
        AliasEntry::new(
            "SIEMENS",
            &[
                "SIEMENS",
                "SIEMENS HEALTHINEERS",
                "SIEMENS MEDICAL SOLUTIONS USA, INC.",
                "SIEMENS INDUSTRY, INC.",
                "SIEMENS HEALTHCARE DIAGNOSTICS INC.",
                "SIEMENS AG",
            ],
        ),
        AliasEntry::new(
            "PHILIPS",
            &[
                "PHILIPS",
                "ROYAL PHILIPS",
                "PHILIPS HEALTHCARE",
                "PHILIPS MEDICAL SYSTEMS",
                "PHILIPS NORTH AMERICA LLC",
                "ROYAL PHILIPS ELECTRONICS N.V.",
                "PHILIPS RS NORTH AMERICA LLC",
                "PHILIPS DS NORTH AMERICA LLC",
                "PHILIPS MEDICAL SYSTEMS (ATL ULTRASOUND SUPPLIES)",
            ],
        ),
        AliasEntry::new(
            "CANON",
            &[
                "CANON",
                "CANON MEDICAL",
                "CANON MEDICAL SYSTEMS USA, INC.",
                "TOSHIBA",
                "CANON INC.",
            ],
        ),
        AliasEntry::new(
            "NIHON KOHDEN",
            &[
                "NIHON KOHDEN AMERICA, LLC",
                "NIHON KOHDEN",
                "NIHON KOHDEN CORPORATION",
            ],
        ),
        AliasEntry::new(
            "SPACELABS",
            &[
                "SPACELABS HEALTHCARE, L.L.C.",
                "SPACELABS",
                "OSI SYSTEMS, INC.",
            ],
        ),
        AliasEntry::new("MINDRAY", &["MINDRAY DS USA INC", "MINDRAY"]),
        AliasEntry::new("SAMSUNG", &["NEUROLOGICA CORP", "SAMSUNG"]),
    ];
    AliasTable { entries }
}
