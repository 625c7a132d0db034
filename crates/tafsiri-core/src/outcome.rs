use std::fmt;

use tafsiri_translator::TranslateError;

use crate::cache::CacheTier;

/// Where a translation came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Memory,
    Persisted,
    /// Fresh from a provider, by provider id
    Provider(String),
}

impl From<CacheTier> for Origin {
    fn from(tier: CacheTier) -> Self {
        match tier {
            CacheTier::Memory => Origin::Memory,
            CacheTier::Persisted => Origin::Persisted,
        }
    }
}

/// Why the original text was returned instead of a translation
#[derive(Debug)]
pub enum FallbackReason {
    RateLimited,
    /// Provider answered with the input unchanged
    Echoed,
    Provider(TranslateError),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::RateLimited => f.write_str("rate limited"),
            FallbackReason::Echoed => f.write_str("provider echoed the input"),
            FallbackReason::Provider(e) => write!(f, "provider error: {e}"),
        }
    }
}

/// Result of a translation request. Every variant carries displayable text.
#[derive(Debug)]
pub enum TranslationOutcome {
    /// Nothing to do: blank text or pivot target
    Passthrough(String),
    Translated { text: String, origin: Origin },
    Fallback { text: String, reason: FallbackReason },
}

impl TranslationOutcome {
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Passthrough(text)
            | TranslationOutcome::Translated { text, .. }
            | TranslationOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            TranslationOutcome::Passthrough(text)
            | TranslationOutcome::Translated { text, .. }
            | TranslationOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated { .. })
    }

    pub fn origin(&self) -> Option<&Origin> {
        match self {
            TranslationOutcome::Translated { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            TranslationOutcome::Fallback { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
