//! Placeholder document parsing
//!
//! The placeholder document drives the merge: every line whose trimmed form
//! matches `// @merge-here <key>` names a fragment to splice in at that
//! position. All other lines are inert and never reach the output.

use regex_lite::Regex;

/// Pattern a marker line must match after trimming.
const MARKER_PATTERN: &str = r"^//\s*@merge-here\s+(.+)$";

/// Classification of a single placeholder line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderLine<'a> {
    /// A merge marker carrying the fragment key
    Marker { key: &'a str },
    /// A line that is empty after trimming
    Blank,
    /// Any other line (prose, non-directive comments)
    Other,
}

/// Classifies placeholder lines into markers, blanks, and everything else
#[derive(Debug)]
pub struct LineClassifier {
    marker_re: Regex,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier {
    pub fn new() -> Self {
        // The pattern is a compile-time constant; a parse failure here is a bug.
        Self {
            marker_re: Regex::new(MARKER_PATTERN).unwrap(),
        }
    }

    /// Classify one line of the placeholder document
    pub fn classify<'a>(&self, line: &'a str) -> PlaceholderLine<'a> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return PlaceholderLine::Blank;
        }
        if !trimmed.starts_with("//") {
            return PlaceholderLine::Other;
        }
        match self.marker_re.captures(trimmed) {
            Some(caps) => match caps.get(1) {
                Some(key) => PlaceholderLine::Marker {
                    key: key.as_str().trim(),
                },
                None => PlaceholderLine::Other,
            },
            None => PlaceholderLine::Other,
        }
    }
}

/// Extract fragment keys from a placeholder document, in document order.
///
/// Duplicate markers are kept; the merge emits the fragment once per marker.
pub fn collect_markers(contents: &str) -> Vec<String> {
    let classifier = LineClassifier::new();
    contents
        .split('\n')
        .filter_map(|line| match classifier.classify(line) {
            PlaceholderLine::Marker { key } => Some(key.to_string()),
            _ => None,
        })
        .collect()
}
