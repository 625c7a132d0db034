use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A line of UI text to translate into the active language
    TextInput(String),
    SetLanguage(String),
    LanguageChanged(LanguageCode),
    ShowTranslation {
        original: String,
        text: String,
        to_lang: LanguageCode,
        translated: bool,
    },
    ShowStatus,
    Quit,
}

/// Snapshot of the global provider back-off window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub is_limited: bool,
    pub minutes_remaining: u64,
}
