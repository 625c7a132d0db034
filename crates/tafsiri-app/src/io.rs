use std::io::BufRead;

use kanal::AsyncSender;
use tafsiri_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Feed stdin lines to the app as events until input ends or the session is cancelled
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Reading text from stdin (:lang <code>, :status, :quit)");

    // Blocking stdin lives on its own thread so it never holds up runtime shutdown
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            };

            let Some(event) = parse_line(&line) else {
                continue;
            };

            if let Err(e) = event_tx.try_send(event) {
                tracing::debug!("Input dropped, session is gone: {}", e);
                return;
            }
        }

        let _ = event_tx.try_send(AppEvent::Quit);
    });

    cancel.cancelled().await;
    tracing::info!("Input watcher stopping");
    Ok(())
}

/// Map an input line to an event. Blank lines are ignored.
pub fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let Some(command) = line.trim().strip_prefix(':') else {
        return Some(AppEvent::TextInput(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("lang" | "language"), Some(lang)) => Some(AppEvent::SetLanguage(lang.to_string())),
        (Some("status"), None) => Some(AppEvent::ShowStatus),
        (Some("quit" | "q" | "exit"), None) => Some(AppEvent::Quit),
        _ => {
            tracing::warn!("Unknown command {line:?}, translating it as text");
            Some(AppEvent::TextInput(line.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_text() {
        match parse_line("Book now\r\n") {
            Some(AppEvent::TextInput(text)) => assert_eq!(text, "Book now"),
            other => panic!("Wrong event: {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_is_ignored() {
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn test_commands() {
        assert!(matches!(
            parse_line(":lang pt-BR"),
            Some(AppEvent::SetLanguage(lang)) if lang == "pt-BR"
        ));
        assert!(matches!(parse_line(" :status"), Some(AppEvent::ShowStatus)));
        assert!(matches!(parse_line(":q"), Some(AppEvent::Quit)));
    }

    #[test]
    fn test_unknown_command_is_text() {
        assert!(matches!(
            parse_line(":lang"),
            Some(AppEvent::TextInput(text)) if text == ":lang"
        ));
    }
}
