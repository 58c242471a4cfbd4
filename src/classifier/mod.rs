/// Compiles capital configuration and taxonomy into the category expressions.
pub mod builder;
/// Keyword lists compiled into escaped regex alternations.
pub mod keyword_pattern;
/// Priority-ordered category rules and the built-in capital tiers.
pub mod taxonomy;
