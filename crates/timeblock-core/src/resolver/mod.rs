//! Layered resolution of time expressions.
//!
//! A time expression is resolved in two stages: a deterministic pattern
//! cascade for unambiguous spellings ([`resolve_deterministic`]), then a
//! natural-language fallback that defers to the chat-completion service
//! ([`LanguageResolver`]). The fallback runs whenever the cascade leaves
//! either the start or the duration unresolved.

mod language;
mod pattern;

pub use language::LanguageResolver;
pub use pattern::resolve_deterministic;

use chrono::NaiveDateTime;

use crate::duration::Duration;

/// Outcome of the deterministic cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Absolute start in local wall-clock time. Duration-only patterns
    /// pass the inherited start through, so this stays `None` when the
    /// expression carries no date and no start was inherited.
    pub start: Option<NaiveDateTime>,
    pub duration: Duration,
}
