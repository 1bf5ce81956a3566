//! Fragment line transformation
//!
//! Fragments are written as standalone declaration modules; once concatenated
//! into a single ambient scope their `import` statements are meaningless and
//! their `export ` prefixes are invalid. Two literal prefix rules apply:
//!
//! - a line whose trimmed form starts with `import` is dropped
//! - a line starting with exactly `export ` loses that prefix, rest verbatim
//!
//! Known limitation: indented `export` statements and multi-line imports are
//! not recognized; they pass through unchanged.

/// Apply the transformation rules to one fragment line.
///
/// Returns `None` when the line is dropped, otherwise the line to emit.
pub fn transform_line(line: &str) -> Option<&str> {
    if line.trim_start().starts_with("import") {
        return None;
    }
    match line.strip_prefix("export ") {
        Some(rest) => Some(rest),
        None => Some(line),
    }
}

/// Transform a whole fragment document into its output lines, in order.
pub fn transform(contents: &str) -> Vec<&str> {
    contents.split('\n').filter_map(transform_line).collect()
}
