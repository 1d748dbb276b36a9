//! Parsing normalized scheduled lines back into tasks.
//!
//! The inverse of [`crate::format::normalized_line`]: locates the
//! `[length:: ...]` and `[scheduled:: ...]` markers, excises them, and
//! rebuilds the informal time annotation. A missing marker is an explicit
//! error, never a silent garbage substring.

use chrono::NaiveDateTime;

use crate::duration::{minutes_to_words, Duration};
use crate::error::ParseError;
use crate::format;
use crate::task::ScheduledTask;

const LENGTH_MARKER: &str = "[length::";
const SCHEDULED_MARKER: &str = "[scheduled::";

/// Locate `marker ... ]` in `line`; return the trimmed interior and the
/// line with the whole bracketed segment excised.
fn excise_marker(line: &str, marker: &str) -> Option<(String, String)> {
    let start = line.find(marker)?;
    let after = &line[start + marker.len()..];
    let close = after.find(']')?;
    let interior = after[..close].trim().to_string();
    let mut rest = String::with_capacity(line.len());
    rest.push_str(&line[..start]);
    rest.push_str(&after[close + 1..]);
    Some((interior, rest))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Parse a normalized scheduled line back into a [`ScheduledTask`].
///
/// `previous_line`, when given, is parsed exactly one level deep (with no
/// predecessor of its own) and used only to compute its implied end time:
/// when that end equals this task's start, the task is assumed to follow
/// its predecessor immediately and the rebuilt time annotation omits the
/// ` on <datetime>` suffix.
///
/// Leading whitespace/tab indentation is preserved on the description.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the missing marker when either
/// `[length::]` or `[scheduled::]` is absent or unclosed, or an
/// invalid-value error when a marker interior does not parse.
pub fn parse_scheduled_line(
    line: &str,
    previous_line: Option<&str>,
) -> Result<ScheduledTask, ParseError> {
    let previous = match previous_line {
        Some(prev) => Some(parse_scheduled_line(prev, None)?),
        None => None,
    };

    let indentation: String = line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let task = line.trim();

    let (length_text, task) =
        excise_marker(task, LENGTH_MARKER).ok_or(ParseError::MissingLengthMarker)?;
    let minutes: u32 = length_text
        .replacen("minutes", "", 1)
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidLength {
            value: length_text.clone(),
        })?;

    let (scheduled_text, task) =
        excise_marker(&task, SCHEDULED_MARKER).ok_or(ParseError::MissingScheduledMarker)?;
    let start = parse_timestamp(&scheduled_text).ok_or(ParseError::InvalidTimestamp {
        value: scheduled_text.clone(),
    })?;

    // Excision leaves double spaces behind; collapse one pair at a time
    // until none remain.
    let mut cleaned = task;
    while cleaned.contains("  ") {
        cleaned = cleaned.replacen("  ", " ", 1);
    }

    let mut time_expression = format!("for {}", minutes_to_words(i64::from(minutes)));
    let follows_previous = previous
        .as_ref()
        .and_then(ScheduledTask::end)
        .is_some_and(|end| end == start);
    if !follows_previous {
        time_expression.push_str(&format!(" on {}", format::human_readable(start)));
    }

    Ok(ScheduledTask {
        time_expression,
        description: format!("{indentation}{}", cleaned.trim()),
        start,
        duration: Duration::from_minutes(minutes),
    })
}
