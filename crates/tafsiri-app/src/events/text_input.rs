use std::sync::Arc;
use std::time::SystemTime;

use kanal::AsyncSender;
use tafsiri_core::TranslationOutcome;
use tafsiri_types::AppEvent;

use crate::commands::log_outcome;
use crate::state::AppState;

pub async fn handle_text_input(
    state: &Arc<AppState>,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    // Resolved once here; a switch while the request is in flight does not retarget it
    let to_lang = state.context.language();
    let outcome = state
        .service()
        .translate_detailed(&text, Some(to_lang.as_str()))
        .await;
    log_outcome(&outcome);

    {
        let mut status = state.status.write().await;
        match &outcome {
            TranslationOutcome::Translated { .. } => status.translated += 1,
            TranslationOutcome::Fallback { reason, .. } => {
                status.fallbacks += 1;
                status.last_fallback = Some(reason.to_string());
            }
            TranslationOutcome::Passthrough(_) => {}
        }
        status.last_translation_time = Some(SystemTime::now());
    }

    let translated = outcome.is_translated();
    app_to_ui_tx
        .send(AppEvent::ShowTranslation {
            original: text,
            text: outcome.into_text(),
            to_lang,
            translated,
        })
        .await?;

    Ok(())
}
