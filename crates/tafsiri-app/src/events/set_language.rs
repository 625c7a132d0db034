use std::sync::Arc;

use crate::state::AppState;

/// Unsupported codes are warned about by the service and still applied
pub fn handle_set_language(state: &Arc<AppState>, lang: &str) {
    let previous = state.context.language();
    let lang = state.context.set_language(lang);
    tracing::info!("Switched language {previous} -> {lang}");
}
