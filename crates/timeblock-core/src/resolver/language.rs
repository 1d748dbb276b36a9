//! Natural-language fallback resolution.
//!
//! Two ordered exchanges against the chat service: first the duration of
//! the expression, then the absolute start given that duration and, when
//! known, the end of the previous task. Each stage fails independently;
//! neither is retried.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::duration::Duration;
use crate::error::ResolveError;
use crate::format;
use crate::service::{ChatClient, ChatMessage};
use crate::storage::Config;

#[derive(Debug, Deserialize)]
struct DatetimeReply {
    datetime: String,
}

/// Resolver for expressions the deterministic cascade cannot handle.
pub struct LanguageResolver {
    client: ChatClient,
    duration_model: String,
    datetime_model: String,
}

impl LanguageResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            client: ChatClient::new(&config.llm.api_base, &config.llm.api_key),
            duration_model: config.llm.duration_model.clone(),
            datetime_model: config.llm.datetime_model.clone(),
        }
    }

    /// Resolve `expr` through the two-stage exchange. `now` is the date
    /// given to the service as "today"; `previous_end`, when present, is
    /// offered as the default start for expressions without one.
    pub async fn resolve(
        &self,
        expr: &str,
        previous_end: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<(NaiveDateTime, Duration), ResolveError> {
        let (duration, duration_json) = self.duration_stage(expr).await?;
        log::debug!("duration stage resolved {expr:?} to {duration_json}");
        let start = self
            .datetime_stage(expr, &duration_json, previous_end, now)
            .await?;
        Ok((start, duration))
    }

    /// Stage 1: ask for the duration expressed in the text, as sparse JSON.
    /// Returns the parsed duration and the raw reply (fed to stage 2).
    async fn duration_stage(&self, expr: &str) -> Result<(Duration, String), ResolveError> {
        let prompt = format!(
            "The following text contains a duration in minutes, hours, or days. \
             What is the duration? Output the duration in JSON with the following format: \
             {{\"minutes\": <minutes>, \"hours\": <hours>, \"days\": <days>}}. \
             Do not convert days to hours or hours to minutes. Here is the text:\n\n{expr}"
        );
        let reply = self
            .client
            .complete_json(&self.duration_model, &[ChatMessage::user(prompt)])
            .await?;
        let duration = parse_duration_reply(&reply)?;
        Ok((duration, reply))
    }

    /// Stage 2: ask for the absolute start, with the stage-1 duration as
    /// prior context.
    async fn datetime_stage(
        &self,
        expr: &str,
        duration_json: &str,
        previous_end: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<NaiveDateTime, ResolveError> {
        let prompt = match previous_end {
            Some(end) => format!(
                "Your colleague is scheduling a meeting. The previous meeting ended at {}. \
                 The following information will include the duration of the new meeting and may \
                 include the day and/or time when the new meeting should start: {expr}. \
                 If the new meeting time is specified, use that time; otherwise schedule the \
                 meeting to start when the previous meeting ended. \
                 What is the date and time of the new meeting? \
                 (Do not add the duration of the meeting to the start time.) \
                 Format the response as JSON and include a `datetime` field with the date and \
                 time of the meeting in ISO-8601 format.",
                format::human_readable(end),
            ),
            None => format!(
                "Today is {} and your colleague is scheduling a meeting AFTER today. \
                 The meeting is {expr}. What is the date and time of the meeting? \
                 (Do not add the duration of the meeting to the start time.) \
                 Format the response as JSON and include a `datetime` field with the date and \
                 time of the meeting in ISO-8601 format.",
                format::human_readable(now),
            ),
        };
        let messages = [
            ChatMessage::user("The JSON in the next message contains the duration of a meeting:"),
            ChatMessage::user(duration_json),
            ChatMessage::user(prompt),
        ];
        let reply = self
            .client
            .complete_json(&self.datetime_model, &messages)
            .await?;
        parse_datetime_reply(&reply)
    }
}

/// Parse a stage-1 reply into a duration. An all-absent duration is a
/// failure, not an empty success.
fn parse_duration_reply(reply: &str) -> Result<Duration, ResolveError> {
    let duration: Duration =
        serde_json::from_str(reply).map_err(|source| ResolveError::MalformedDuration {
            reply: reply.to_string(),
            source,
        })?;
    if !duration.is_resolved() {
        return Err(ResolveError::EmptyDuration);
    }
    Ok(duration)
}

/// Parse a stage-2 reply's `datetime` field into a local wall-clock
/// timestamp. An offset, if present, is read at face value; no timezone
/// conversion happens.
fn parse_datetime_reply(reply: &str) -> Result<NaiveDateTime, ResolveError> {
    let parsed: DatetimeReply =
        serde_json::from_str(reply).map_err(|_| ResolveError::MalformedDatetime {
            reply: reply.to_string(),
        })?;
    let value = parsed.datetime.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| ResolveError::MalformedDatetime {
            reply: reply.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_duration_reply_sparse() {
        let d = parse_duration_reply(r#"{"minutes": 45}"#).unwrap();
        assert_eq!(d, Duration::from_minutes(45));

        let d = parse_duration_reply(r#"{"hours": 1, "minutes": 15}"#).unwrap();
        assert_eq!(d.total_minutes(), Some(75));
    }

    #[test]
    fn test_parse_duration_reply_all_absent_fails() {
        let err = parse_duration_reply("{}").unwrap_err();
        assert!(matches!(err, ResolveError::EmptyDuration));
    }

    #[test]
    fn test_parse_duration_reply_garbage_fails() {
        let err = parse_duration_reply("sometime next week").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedDuration { .. }));
    }

    #[test]
    fn test_parse_datetime_reply_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        for reply in [
            r#"{"datetime": "2024-01-02T09:00"}"#,
            r#"{"datetime": "2024-01-02T09:00:00"}"#,
            r#"{"datetime": "2024-01-02T09:00:00Z"}"#,
            r#"{"datetime": "2024-01-02T09:00:00-05:00"}"#,
        ] {
            assert_eq!(parse_datetime_reply(reply).unwrap(), expected, "{reply}");
        }
    }

    #[test]
    fn test_parse_datetime_reply_missing_field_fails() {
        let err = parse_datetime_reply(r#"{"date": "2024-01-02"}"#).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedDatetime { .. }));
    }
}
