use std::sync::Arc;

use anyhow::Context;
use tafsiri_config::Config;
use tafsiri_core::{FileStore, KeyValueStore, LanguageContext, TranslationService};
use tafsiri_translator::Providers;
use tokio::sync::RwLock;

use crate::status::SessionStatus;

pub struct AppState {
    pub config: Arc<Config>,
    pub context: LanguageContext,
    pub status: Arc<RwLock<SessionStatus>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_path));
        let providers = Providers::from_config(&config.translator)
            .context("Failed to build translation providers")?;

        let service = Arc::new(TranslationService::new(&config, store, providers.primary));
        service.init(config.default_language.as_deref(), providers.secondary);

        Ok(Self {
            config: Arc::new(config),
            context: LanguageContext::new(service),
            status: Arc::new(RwLock::new(SessionStatus::default())),
        })
    }

    pub fn service(&self) -> &Arc<TranslationService> {
        self.context.service()
    }
}
