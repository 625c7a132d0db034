//! Two-tier text → language → translation cache.
//!
//! The memory tier is a plain map owned by the process. The persisted tier is
//! a single JSON object stored under [`keys::TRANSLATION_CACHE`]. Writes go to
//! both tiers; when the serialized persisted tier would outgrow its cap, or the
//! store refuses the write, the whole persisted tier is dropped instead of
//! being partially pruned.
//!
//! The persisted tier is parsed once and kept alongside the memory tier; the
//! store is only read again by [`TranslationCache::load`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tafsiri_types::LanguageCode;

use crate::storage::{KeyValueStore, keys};

/// language code → translation
type LanguageMap = HashMap<String, String>;
/// text key → translations of that text
type CacheMap = HashMap<String, LanguageMap>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTier {
    Memory,
    Persisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub memory_entries: usize,
    pub persisted_entries: usize,
    pub persisted_bytes: usize,
}

/// Cache key for a UI string: trimmed and lowercased
pub fn cache_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Both tiers behind one lock, so read-modify-write of the persisted tier
/// cannot interleave with another writer.
#[derive(Default)]
struct Tiers {
    memory: CacheMap,
    /// Parsed copy of the persisted tier, read from the store on first use
    persisted: Option<CacheMap>,
}

pub struct TranslationCache {
    store: Arc<dyn KeyValueStore>,
    max_persisted_bytes: usize,
    tiers: Mutex<Tiers>,
}

impl TranslationCache {
    pub fn new(store: Arc<dyn KeyValueStore>, max_persisted_bytes: usize) -> Self {
        Self {
            store,
            max_persisted_bytes,
            tiers: Mutex::default(),
        }
    }

    /// Re-read the persisted tier and replace the memory tier with it
    pub fn load(&self) {
        let persisted = self.read_persisted();
        tracing::debug!("Loaded {} cached texts from storage", persisted.len());

        let mut tiers = self.tiers();
        tiers.memory = persisted.clone();
        tiers.persisted = Some(persisted);
    }

    pub fn lookup(&self, text: &str, lang: &LanguageCode) -> Option<(String, CacheTier)> {
        let key = cache_key(text);
        let mut tiers = self.tiers();

        if let Some(hit) = tiers
            .memory
            .get(&key)
            .and_then(|langs| langs.get(lang.as_str()))
        {
            return Some((hit.clone(), CacheTier::Memory));
        }

        let hit = self
            .persisted(&mut tiers)
            .get(&key)
            .and_then(|langs| langs.get(lang.as_str()))
            .cloned()?;

        tiers
            .memory
            .entry(key)
            .or_default()
            .insert(lang.to_string(), hit.clone());

        Some((hit, CacheTier::Persisted))
    }

    pub fn insert(&self, text: &str, lang: &LanguageCode, translation: &str) {
        let key = cache_key(text);
        let mut tiers = self.tiers();

        tiers
            .memory
            .entry(key.clone())
            .or_default()
            .insert(lang.to_string(), translation.to_string());

        self.persisted(&mut tiers)
            .entry(key)
            .or_default()
            .insert(lang.to_string(), translation.to_string());
        self.write_persisted(&mut tiers);
    }

    /// Drop the memory tier only
    pub fn clear_memory(&self) {
        self.tiers().memory.clear();
    }

    /// Drop both tiers
    pub fn clear_all(&self) {
        let mut tiers = self.tiers();
        tiers.memory.clear();
        self.reset_persisted(&mut tiers);
    }

    /// Drop one language from both tiers, leaving the others intact
    pub fn clear_language(&self, lang: &LanguageCode) {
        let mut tiers = self.tiers();
        remove_language(&mut tiers.memory, lang);

        let persisted = self.persisted(&mut tiers);
        if remove_language(persisted, lang) == 0 {
            return;
        }

        if persisted.is_empty() {
            self.reset_persisted(&mut tiers);
        } else {
            self.write_persisted(&mut tiers);
        }
    }

    pub fn stats(&self) -> CacheStats {
        let mut tiers = self.tiers();
        let memory_entries = count_entries(&tiers.memory);
        let persisted_entries = count_entries(self.persisted(&mut tiers));
        let persisted_bytes = self
            .store
            .get(keys::TRANSLATION_CACHE)
            .map(|raw| raw.len())
            .unwrap_or_default();

        CacheStats {
            memory_entries,
            persisted_entries,
            persisted_bytes,
        }
    }

    fn tiers(&self) -> MutexGuard<'_, Tiers> {
        self.tiers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persisted<'a>(&self, tiers: &'a mut Tiers) -> &'a mut CacheMap {
        tiers.persisted.get_or_insert_with(|| self.read_persisted())
    }

    fn read_persisted(&self) -> CacheMap {
        let Some(raw) = self.store.get(keys::TRANSLATION_CACHE) else {
            return CacheMap::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable translation cache: {e}");
            CacheMap::new()
        })
    }

    /// Store the parsed persisted tier, or reset it when it cannot be stored
    fn write_persisted(&self, tiers: &mut Tiers) {
        let serialized = match serde_json::to_string(self.persisted(tiers)) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::warn!("Failed to serialize translation cache: {e}");
                self.reset_persisted(tiers);
                return;
            }
        };

        if serialized.len() > self.max_persisted_bytes {
            tracing::warn!(
                "Translation cache would grow to {} bytes (cap {}), resetting persisted tier",
                serialized.len(),
                self.max_persisted_bytes
            );
            self.reset_persisted(tiers);
            return;
        }

        if let Err(e) = self.store.set(keys::TRANSLATION_CACHE, &serialized) {
            tracing::warn!("Failed to persist translation cache, resetting persisted tier: {e}");
            self.reset_persisted(tiers);
        }
    }

    fn reset_persisted(&self, tiers: &mut Tiers) {
        tiers.persisted = Some(CacheMap::new());
        if let Err(e) = self.store.remove(keys::TRANSLATION_CACHE) {
            tracing::warn!("Failed to remove persisted translation cache: {e}");
        }
    }
}

fn remove_language(cache: &mut CacheMap, lang: &LanguageCode) -> usize {
    let mut removed = 0;
    cache.retain(|_, langs| {
        if langs.remove(lang.as_str()).is_some() {
            removed += 1;
        }
        !langs.is_empty()
    });
    removed
}

fn count_entries(cache: &CacheMap) -> usize {
    cache.values().map(HashMap::len).sum()
}
