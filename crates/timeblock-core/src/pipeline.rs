//! The scheduling pipeline.
//!
//! Processes an ordered list of task lines strictly in order, carrying
//! the previous task's end time forward so an unspecified start defaults
//! to the end of the previous task. Each line gets exactly one resolution
//! attempt: the deterministic cascade, then the natural-language fallback
//! on a miss. A line that cannot be resolved is dropped from the output,
//! reported, and does not stop the run.

use chrono::{Local, NaiveDateTime};

use crate::error::{ParseError, ResolveError};
use crate::format;
use crate::parse;
use crate::resolver::{self, LanguageResolver, Resolution};
use crate::storage::Config;
use crate::task::{self, ScheduledTask};

/// A line the pipeline could not resolve.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number within the input selection.
    pub line: usize,
    /// The raw line text.
    pub text: String,
    pub reason: ResolveError,
}

/// Outcome of a scheduling run.
#[derive(Debug, Default)]
pub struct ScheduleReport {
    /// Successfully resolved tasks, in input order.
    pub tasks: Vec<ScheduledTask>,
    /// Lines dropped from the output, with the reason each failed.
    pub skipped: Vec<SkippedLine>,
}

impl ScheduleReport {
    /// The normalized replacement text for the selection.
    pub fn to_normalized_text(&self) -> String {
        self.tasks
            .iter()
            .map(format::normalized_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Forward scheduling over a text selection.
pub struct SchedulePipeline {
    language: LanguageResolver,
}

impl SchedulePipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            language: LanguageResolver::new(config),
        }
    }

    /// Schedule every task line in `text`, in order.
    pub async fn schedule(&self, text: &str) -> ScheduleReport {
        self.schedule_at(text, Local::now().naive_local()).await
    }

    /// Like [`schedule`](Self::schedule) with an explicit "now" (the date
    /// the resolution service is told is today).
    pub async fn schedule_at(&self, text: &str, now: NaiveDateTime) -> ScheduleReport {
        let mut report = ScheduleReport::default();
        let mut previous_end: Option<NaiveDateTime> = None;

        for (index, line) in text.lines().enumerate() {
            log::debug!("scheduling task {}", index + 1);
            match self.schedule_line(line, previous_end, now).await {
                Ok(scheduled) => {
                    // The end of this task becomes the default start of
                    // the next one.
                    if let Some(end) = scheduled.end() {
                        previous_end = Some(end);
                    }
                    report.tasks.push(scheduled);
                }
                Err(reason) => {
                    log::warn!("could not schedule line {}: {reason}", index + 1);
                    report.skipped.push(SkippedLine {
                        line: index + 1,
                        text: line.to_string(),
                        reason,
                    });
                }
            }
        }
        report
    }

    async fn schedule_line(
        &self,
        line: &str,
        previous_end: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<ScheduledTask, ResolveError> {
        let (description, expression) = task::split_line(line);
        if expression.is_empty() {
            return Err(ResolveError::MissingExpression);
        }

        let deterministic = resolver::resolve_deterministic(&expression, previous_end);
        let (start, duration) = match deterministic {
            Some(Resolution {
                start: Some(start),
                duration,
            }) => (start, duration),
            // No full match, or a duration-only match with nothing to
            // inherit the start from.
            _ => {
                self.language
                    .resolve(&expression, previous_end, now)
                    .await?
            }
        };

        Ok(ScheduledTask {
            time_expression: expression,
            description,
            start,
            duration,
        })
    }
}

/// Map normalized lines back to informal `<description> [<time>]` lines.
///
/// Each line is parsed with its predecessor so a task that starts exactly
/// when the previous one ends keeps its date implicit.
///
/// # Errors
///
/// Stops at the first malformed line, reporting its 1-based line number
/// and which marker is missing or invalid.
pub fn unschedule(text: &str) -> Result<String, ParseError> {
    let mut lines = Vec::new();
    let mut previous: Option<&str> = None;
    for (index, line) in text.lines().enumerate() {
        let scheduled =
            parse::parse_scheduled_line(line, previous).map_err(|source| ParseError::AtLine {
                line: index + 1,
                source: Box::new(source),
            })?;
        lines.push(format::informal_line(&scheduled));
        previous = Some(line);
    }
    Ok(lines.join("\n"))
}
