pub mod language;
pub mod types;

pub use language::{Language, LanguageCode, PIVOT, SUPPORTED_LANGUAGES};
pub use types::{AppEvent, RateLimitStatus};
