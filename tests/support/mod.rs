#![allow(dead_code)]

pub(crate) mod evaluator;

use std::path::PathBuf;

use taxonomy2sql::classifier::builder::CapitalExpressions;
use taxonomy2sql::classifier::taxonomy::CategoryTaxonomy;
use taxonomy2sql::config::capital::CapitalConfig;
use taxonomy2sql::config::vars::ProjectVars;
use taxonomy2sql::registry::alias_table::AliasTable;

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture(fixture: &str, file: &str) -> String {
    let path = fixture_dir(fixture).join(file);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

pub(crate) fn load_fixture_vars(fixture: &str) -> ProjectVars {
    ProjectVars::from_json(&read_fixture(fixture, "dataform.json"))
        .expect("fixture vars should parse")
}

pub(crate) fn load_fixture_aliases(fixture: &str) -> AliasTable {
    AliasTable::from_json(&read_fixture(fixture, "aliases.json"))
        .expect("fixture alias table should parse")
}

pub(crate) fn load_fixture_taxonomy(fixture: &str) -> CategoryTaxonomy {
    CategoryTaxonomy::from_json(&read_fixture(fixture, "taxonomy.json"))
        .expect("fixture taxonomy should parse")
}

pub(crate) fn build_fixture_expressions(
    fixture: &str,
) -> (CapitalConfig, CategoryTaxonomy, AliasTable, CapitalExpressions) {
    let config = CapitalConfig::from_vars(&load_fixture_vars(fixture));
    let taxonomy = load_fixture_taxonomy(fixture);
    let aliases = load_fixture_aliases(fixture);
    let expressions = CapitalExpressions::build(&config, &taxonomy, &aliases);
    (config, taxonomy, aliases, expressions)
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}
