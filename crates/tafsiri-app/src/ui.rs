use std::sync::Arc;

use kanal::AsyncReceiver;
use tafsiri_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::status::render_status;

/// Prints what the event loop produces. Translations go to stdout, notices to stderr.
pub async fn ui_loop(
    state: Arc<AppState>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => show(&state, event?).await,
            _ = cancel.cancelled() => {
                // flush whatever was produced before the session ended
                while let Ok(Some(event)) = app_to_ui_rx.try_recv() {
                    show(&state, event).await;
                }
                break;
            }
        }
    }

    Ok(())
}

async fn show(state: &AppState, event: AppEvent) {
    match event {
        AppEvent::ShowTranslation {
            original,
            text,
            to_lang,
            translated,
        } => {
            if !translated && !to_lang.is_pivot() {
                tracing::debug!("Untranslated ({to_lang}): {original}");
            }
            println!("{text}");
        }
        AppEvent::LanguageChanged(lang) => {
            let name = lang
                .language()
                .map(|l| l.native_name())
                .unwrap_or("unsupported");
            eprintln!("language: {lang} ({name})");
        }
        AppEvent::ShowStatus => {
            eprintln!("{}", render_status(state).await);
        }
        _ => {}
    }
}
