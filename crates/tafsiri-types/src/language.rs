use std::fmt;

use serde::{Deserialize, Serialize};

/// Source language of every UI string. Never translated.
pub const PIVOT: &str = "en";

/// ISO 639-1 codes the UI ships translations for
pub const SUPPORTED_LANGUAGES: [&str; 20] = [
    "en", "fr", "sw", "es", "pt", "ar", "zh", "hi", "de", "it", "ja", "ko", "ru", "tr", "vi",
    "nl", "pl", "th", "uk", "rw",
];

/// Supported UI languages, in picker order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
    Swahili,
    Spanish,
    Portuguese,
    Arabic,
    Chinese,
    Hindi,
    German,
    Italian,
    Japanese,
    Korean,
    Russian,
    Turkish,
    Vietnamese,
    Dutch,
    Polish,
    Thai,
    Ukrainian,
    Kinyarwanda,
}

impl Language {
    const ALL: [Language; 20] = [
        Language::English,
        Language::French,
        Language::Swahili,
        Language::Spanish,
        Language::Portuguese,
        Language::Arabic,
        Language::Chinese,
        Language::Hindi,
        Language::German,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Russian,
        Language::Turkish,
        Language::Vietnamese,
        Language::Dutch,
        Language::Polish,
        Language::Thai,
        Language::Ukrainian,
        Language::Kinyarwanda,
    ];

    pub fn all() -> &'static [Language] {
        &Self::ALL
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::Swahili => "sw",
            Language::Spanish => "es",
            Language::Portuguese => "pt",
            Language::Arabic => "ar",
            Language::Chinese => "zh",
            Language::Hindi => "hi",
            Language::German => "de",
            Language::Italian => "it",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Russian => "ru",
            Language::Turkish => "tr",
            Language::Vietnamese => "vi",
            Language::Dutch => "nl",
            Language::Polish => "pl",
            Language::Thai => "th",
            Language::Ukrainian => "uk",
            Language::Kinyarwanda => "rw",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Swahili => "Swahili",
            Language::Spanish => "Spanish",
            Language::Portuguese => "Portuguese",
            Language::Arabic => "Arabic",
            Language::Chinese => "Chinese",
            Language::Hindi => "Hindi",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Russian => "Russian",
            Language::Turkish => "Turkish",
            Language::Vietnamese => "Vietnamese",
            Language::Dutch => "Dutch",
            Language::Polish => "Polish",
            Language::Thai => "Thai",
            Language::Ukrainian => "Ukrainian",
            Language::Kinyarwanda => "Kinyarwanda",
        }
    }

    /// Name of the language written in that language
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "Français",
            Language::Swahili => "Kiswahili",
            Language::Spanish => "Español",
            Language::Portuguese => "Português",
            Language::Arabic => "العربية",
            Language::Chinese => "中文",
            Language::Hindi => "हिन्दी",
            Language::German => "Deutsch",
            Language::Italian => "Italiano",
            Language::Japanese => "日本語",
            Language::Korean => "한국어",
            Language::Russian => "Русский",
            Language::Turkish => "Türkçe",
            Language::Vietnamese => "Tiếng Việt",
            Language::Dutch => "Nederlands",
            Language::Polish => "Polski",
            Language::Thai => "ไทย",
            Language::Ukrainian => "Українська",
            Language::Kinyarwanda => "Ikinyarwanda",
        }
    }

    /// Look up a language by code. Region suffixes are ignored.
    pub fn from_code(code: &str) -> Option<Language> {
        let normalized = LanguageCode::normalize(code);
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == normalized.as_str())
    }
}

/// Normalized base language code, e.g. `pt` for `pt-BR`.
///
/// Codes outside [`SUPPORTED_LANGUAGES`] are kept as-is so an unanticipated
/// but valid code can still be sent to a provider and used as a cache partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn normalize(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        let base = lowered
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim();

        if base.is_empty() {
            return Self::pivot();
        }

        Self(base.to_string())
    }

    pub fn pivot() -> Self {
        Self(PIVOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_pivot(&self) -> bool {
        self.0 == PIVOT
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_LANGUAGES.contains(&self.0.as_str())
    }

    pub fn language(&self) -> Option<Language> {
        Language::from_code(&self.0)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::pivot()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Language> for LanguageCode {
    fn from(lang: Language) -> Self {
        Self(lang.code().to_string())
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_suffix_is_dropped() {
        assert_eq!(LanguageCode::normalize("pt-BR").as_str(), "pt");
        assert_eq!(LanguageCode::normalize("zh_Hant").as_str(), "zh");
        assert_eq!(LanguageCode::normalize("  FR ").as_str(), "fr");
    }

    #[test]
    fn test_blank_code_is_pivot() {
        assert!(LanguageCode::normalize("").is_pivot());
        assert!(LanguageCode::normalize("-US").is_pivot());
    }

    #[test]
    fn test_unknown_code_is_kept() {
        let code = LanguageCode::normalize("eo");
        assert_eq!(code.as_str(), "eo");
        assert!(!code.is_supported());
        assert!(code.language().is_none());
    }

    #[test]
    fn test_every_language_round_trips_through_code() {
        assert_eq!(Language::all().len(), SUPPORTED_LANGUAGES.len());
        for (lang, code) in Language::all().iter().zip(SUPPORTED_LANGUAGES) {
            assert_eq!(lang.code(), code);
            assert_eq!(Language::from_code(code), Some(*lang));
            assert!(LanguageCode::from(*lang).is_supported());
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let code = LanguageCode::normalize("sw-KE");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"sw\"");
    }
}
