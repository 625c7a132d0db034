pub mod cache;
pub mod clock;
pub mod context;
pub mod observer;
pub mod outcome;
pub mod rate_limit;
pub mod service;
pub mod storage;


pub use cache::{CacheStats, CacheTier};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{LanguageChanges, LanguageContext};
pub use observer::SubscriptionId;
pub use outcome::{FallbackReason, Origin, TranslationOutcome};
pub use service::TranslationService;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
