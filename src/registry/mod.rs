/// Validated canonical-name → raw-alias table and the built-in manufacturer map.
pub mod alias_table;
/// Compiles an alias table into a canonicalizing `CASE` expression.
pub mod canonicalize;
