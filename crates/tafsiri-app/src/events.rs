use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tafsiri_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod set_language;
pub mod text_input;

use set_language::handle_set_language;
use text_input::handle_text_input;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("Session started in {}", state.context.language());

    loop {
        let event = tokio::select! {
            event = input_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));
        handle_events(&state, &app_to_ui_tx, &cancel, event).await?;
    }

    Ok(())
}

async fn handle_events(
    state: &Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput(text) => {
            handle_text_input(state, text, app_to_ui_tx).await?;
        }
        AppEvent::SetLanguage(lang) => {
            handle_set_language(state, &lang);
        }
        AppEvent::ShowStatus => {
            app_to_ui_tx.send(AppEvent::ShowStatus).await?;
        }
        AppEvent::Quit => {
            tracing::info!("Session ending");
            cancel.cancel();
        }
        AppEvent::LanguageChanged(_) | AppEvent::ShowTranslation { .. } => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}
