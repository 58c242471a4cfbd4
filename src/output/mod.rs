/// Writes the generated expressions, JSON bundle, and report to disk.
pub mod formatter;
/// Builds a Markdown summary of the taxonomy and thresholds behind the output.
pub mod report;
