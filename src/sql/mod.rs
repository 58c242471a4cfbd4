/// String-literal escaping, regex escaping and predicate snippets.
pub mod literal;

/// Category column tested by primary-term `LIKE` clauses.
pub const CONTRACT_CATEGORY_FIELD: &str = "Contract_Category";
/// Free-text column tested by description regexes.
pub const PRODUCT_DESCRIPTION_FIELD: &str = "Product_Description";
/// Raw manufacturer column canonicalized by the alias registry.
pub const MANUFACTURER_NAME_FIELD: &str = "Manufacturer_Name";
