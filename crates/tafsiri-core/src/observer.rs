use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tafsiri_types::LanguageCode;

pub type LanguageCallback = Arc<dyn Fn(&LanguageCode) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscribers to language switches. Each `notify` calls every current
/// subscriber once, synchronously, on the caller's thread.
#[derive(Default)]
pub struct LanguageObservers {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, LanguageCallback)>>,
}

impl LanguageObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: LanguageCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers().push((id, callback));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    pub fn notify(&self, lang: &LanguageCode) {
        // Snapshot so callbacks may subscribe or call back into the service
        let snapshot: Vec<LanguageCallback> = self
            .subscribers()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        tracing::debug!("Notifying {} language subscribers", snapshot.len());
        for callback in snapshot {
            callback(lang);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn subscribers(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, LanguageCallback)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
