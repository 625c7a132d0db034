use tafsiri_core::TranslationOutcome;

use crate::cli::Command;
use crate::state::AppState;
use crate::status::{render_status, status_json};

/// Run a one-shot command, printing results to stdout
pub async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    let context = &state.context;

    match command {
        Command::Translate { texts, to } => {
            if let [text] = texts.as_slice() {
                let outcome = state.service().translate_detailed(text, to.as_deref()).await;
                log_outcome(&outcome);
                println!("{}", outcome.text());
            } else {
                for line in context.translate_batch(&texts, to.as_deref()).await {
                    println!("{line}");
                }
            }
        }
        Command::Cached { text, to } => {
            println!("{}", context.t_sync(&text, to.as_deref()));
        }
        Command::Language { lang: Some(lang) } => {
            let lang = context.set_language(&lang);
            println!("{lang}");
        }
        Command::Language { lang: None } => {
            println!("{}", context.language());
        }
        Command::Languages => {
            let active = context.language();
            for lang in context.languages() {
                let marker = if lang.code() == active.as_str() { "*" } else { " " };
                println!(
                    "{marker} {}  {:<12} {}",
                    lang.code(),
                    lang.english_name(),
                    lang.native_name()
                );
            }
        }
        Command::Status { json: true } => {
            println!("{}", serde_json::to_string_pretty(&status_json(state))?);
        }
        Command::Status { json: false } => {
            println!("{}", render_status(state).await);
        }
        Command::Clear { lang: Some(lang) } => {
            state.service().clear_language_cache(&lang);
        }
        Command::Clear { lang: None } => {
            state.service().clear_cache();
        }
        Command::ResetRateLimit => {
            state.service().reset_rate_limit();
        }
        Command::Session => {
            anyhow::bail!("session is run by the controller");
        }
    }

    Ok(())
}

pub fn log_outcome(outcome: &TranslationOutcome) {
    match outcome {
        TranslationOutcome::Translated { origin, .. } => {
            tracing::debug!("Translated ({origin:?})");
        }
        TranslationOutcome::Fallback { reason, .. } => {
            tracing::info!("Showing original text: {reason}");
        }
        TranslationOutcome::Passthrough(_) => {}
    }
}
