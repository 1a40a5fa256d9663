use omni_types::{AppEvent, UiEvent};

use crate::context::AppContext;

/// Handles the history commands: list, search, show and delete
pub async fn handle_history_event(event: UiEvent, ctx: &AppContext) -> anyhow::Result<()> {
    let (reply, changed) = {
        let mut session = ctx.state.session.lock().await;

        match event {
            UiEvent::ListHistory => (AppEvent::ShowHistory(session.items()), None),
            UiEvent::SearchHistory(search) => {
                session.filter(&search);
                (AppEvent::ShowHistory(session.items()), None)
            }
            UiEvent::SelectHistory(index) => match session.select(index) {
                Some(result) => {
                    ctx.speak_async(&result.english_text);
                    (AppEvent::ShowResult(result), None)
                }
                None => (AppEvent::Status(format!("No history entry {}", index)), None),
            },
            UiEvent::DeleteHistory(index) => match session.delete(index) {
                Some(removed) => {
                    tracing::info!("Deleted '{}' from history", removed.input);
                    (
                        AppEvent::Status(format!("Deleted '{}'", removed.input)),
                        Some(session.history().to_vec()),
                    )
                }
                None => (AppEvent::Status(format!("No history entry {}", index)), None),
            },
            // Handled by the event loop
            UiEvent::Close => return Ok(()),
        }
    };

    if let Some(history) = changed {
        ctx.state.storage.save(&history).await;
    }

    ctx.event_tx.send(reply).await?;
    Ok(())
}
