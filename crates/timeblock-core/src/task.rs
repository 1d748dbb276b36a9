//! Task lines and bracket extraction.

use chrono::NaiveDateTime;

use crate::duration::Duration;

/// Completion-marker prefixes recognized (and stripped) at the start of a
/// task line. The trailing space is part of the prefix.
const COMPLETION_MARKERS: [&str; 2] = ["- [ ] ", "- [x] "];

/// A task line resolved to an absolute start time and a duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    /// The original bracket-interior text, trimmed.
    pub time_expression: String,
    /// Task text with the bracket expression removed, trimmed.
    pub description: String,
    /// Absolute start, in local wall-clock time.
    pub start: NaiveDateTime,
    pub duration: Duration,
}

impl ScheduledTask {
    /// End of the task (`start + duration`), when the duration is resolved.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.duration
            .total_minutes()
            .map(|m| self.start + chrono::Duration::minutes(m))
    }
}

/// Strip a leading completion marker from an already-trimmed line.
fn strip_completion_marker(line: &str) -> &str {
    for marker in COMPLETION_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest;
        }
    }
    line
}

/// Extract the first bracketed expression from a raw task line, brackets
/// included. Returns an empty string when either bracket is absent.
///
/// The first `]` after the opening `[` ends the match; nested brackets are
/// not balanced.
pub fn bracketed_expression(line: &str) -> &str {
    let text = strip_completion_marker(line.trim());
    let Some(start) = text.find('[') else {
        return "";
    };
    let rest = &text[start..];
    match rest.find(']') {
        Some(end) => &rest[..=end],
        None => "",
    }
}

/// Split a raw task line into `(description, time expression)`.
///
/// The description is the marker-stripped line with the first occurrence
/// of the bracketed expression removed, trimmed; the expression is the
/// bracket interior, trimmed. Both parts may be empty.
pub fn split_line(line: &str) -> (String, String) {
    let text = strip_completion_marker(line.trim());
    let matched = bracketed_expression(text);
    if matched.is_empty() {
        return (text.to_string(), String::new());
    }
    let description = text.replacen(matched, "", 1).trim().to_string();
    let interior = matched[1..matched.len() - 1].trim().to_string();
    (description, interior)
}
