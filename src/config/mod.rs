/// Capital-equipment thresholds and keyword lists with built-in defaults.
pub mod capital;
/// Project vars: flat string overrides loaded from settings JSON and the environment.
pub mod vars;
