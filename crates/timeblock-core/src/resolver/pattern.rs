//! Deterministic time-expression patterns.
//!
//! A fixed cascade of textual patterns resolved without any service call.
//! Matching is case-sensitive and anchored to the whole expression; the
//! first full match wins.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::duration::Duration;

use super::Resolution;

struct ExprPatterns {
    days: Regex,
    hours: Regex,
    minutes: Regex,
    full: Regex,
}

fn patterns() -> &'static ExprPatterns {
    static PATTERNS: OnceLock<ExprPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ExprPatterns {
        // for 2 days
        days: Regex::new(r"^for (?P<duration>\d+) day[s]?$").unwrap(),
        // for 4 hours
        hours: Regex::new(r"^for (?P<duration>\d+) hour[s]?$").unwrap(),
        // for 45 minutes
        minutes: Regex::new(r"^for (?P<duration>\d+) minute[s]?$").unwrap(),
        // for 45 minutes on Monday 1/8/2024 @ 3:00 pm (weekday optional,
        // accepted and discarded without checking it against the date)
        full: Regex::new(
            r"^for (?P<duration>\d+) (?P<unit>minute|hour|day)[s]? on (?:Sunday|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday)?( )?(?P<date>\d+/\d+/\d+) @ (?P<time>\d+:\d+) (?P<ampm>am|pm)$",
        )
        .unwrap(),
    })
}

/// Resolve `expr` against the fixed pattern cascade.
///
/// Duration-only patterns pass `inherited` through as the start. Returns
/// `None` when no pattern matches the whole expression (or a matched
/// date/time has out-of-range components), signaling the caller to fall
/// back to the natural-language resolver.
pub fn resolve_deterministic(expr: &str, inherited: Option<NaiveDateTime>) -> Option<Resolution> {
    let p = patterns();

    if let Some(caps) = p.days.captures(expr) {
        let days = caps["duration"].parse().ok()?;
        return Some(Resolution {
            start: inherited,
            duration: Duration::from_days(days),
        });
    }
    if let Some(caps) = p.hours.captures(expr) {
        let hours = caps["duration"].parse().ok()?;
        return Some(Resolution {
            start: inherited,
            duration: Duration::from_hours(hours),
        });
    }
    if let Some(caps) = p.minutes.captures(expr) {
        let minutes = caps["duration"].parse().ok()?;
        return Some(Resolution {
            start: inherited,
            duration: Duration::from_minutes(minutes),
        });
    }
    if let Some(caps) = p.full.captures(expr) {
        let amount: u32 = caps["duration"].parse().ok()?;
        let duration = match &caps["unit"] {
            "minute" => Duration::from_minutes(amount),
            "hour" => Duration::from_hours(amount),
            _ => Duration::from_days(amount),
        };
        let start = parse_date_time(&caps["date"], &caps["time"], &caps["ampm"])?;
        return Some(Resolution {
            start: Some(start),
            duration,
        });
    }
    None
}

/// Build a local wall-clock timestamp from `M/D/Y`, `H:MM`, and a meridiem.
fn parse_date_time(date: &str, time: &str, meridiem: &str) -> Option<NaiveDateTime> {
    let mut parts = date.split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;

    let (hour_str, minute_str) = time.split_once(':')?;
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour = match (hour, meridiem) {
        (12, "am") => 0,
        (12, "pm") => 12,
        (h, "pm") => h + 12,
        (h, _) => h,
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}
