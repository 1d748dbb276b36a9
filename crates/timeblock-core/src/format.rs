//! Rendering resolved tasks back into text.
//!
//! Two independent renderers: a human-readable datetime form used inside
//! informal time annotations, and the normalized structured line with
//! `[length::]` and `[scheduled::]` markers.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::task::ScheduledTask;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Render a datetime as `<Weekday> <MM>/<DD>/<YYYY> @ <H>:<MM> am|pm`.
///
/// The 12-hour boundary is deliberately non-standard and load-bearing for
/// round trips: hours above 12 flip to pm and drop 12, hour 12 keeps its
/// value and reads pm, and hour 0 renders as `0:MM am`.
pub fn human_readable(dt: NaiveDateTime) -> String {
    let weekday = WEEKDAYS[dt.weekday().num_days_from_sunday() as usize];
    let hour = dt.hour();
    let (hour, meridiem) = if hour > 12 {
        (hour - 12, "pm")
    } else if hour == 12 {
        (12, "pm")
    } else {
        (hour, "am")
    };
    format!(
        "{weekday} {:02}/{:02}/{} @ {hour}:{:02} {meridiem}",
        dt.month(),
        dt.day(),
        dt.year(),
        dt.minute(),
    )
}

/// Render a task as its normalized structured line:
/// `<description> [length:: <N> minutes] [scheduled:: <YYYY>-<MM>-<DD>T<HH>:<MM>]`.
///
/// Never emits a completion-marker prefix, even if the source line had one.
pub fn normalized_line(task: &ScheduledTask) -> String {
    // Tasks are only constructed with a resolved duration.
    let minutes = task.duration.total_minutes().unwrap_or(0);
    format!(
        "{} [length:: {} minutes] [scheduled:: {}]",
        task.description,
        minutes,
        task.start.format("%Y-%m-%dT%H:%M"),
    )
}

/// Render a task as an informal line: `<description> [<time expression>]`.
pub fn informal_line(task: &ScheduledTask) -> String {
    format!("{} [{}]", task.description, task.time_expression)
}
