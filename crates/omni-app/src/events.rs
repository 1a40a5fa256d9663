use std::time::Duration;

use kanal::AsyncReceiver;
use omni_types::{AppEvent, UiEvent};

use crate::context::AppContext;

pub mod history;
pub mod text_input;

use history::handle_history_event;
use text_input::handle_text_input;

/// App's main loop. Returns once the user asks to close.
pub async fn event_loop(ctx: AppContext, ui_to_app_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    let timeout = {
        let config = ctx.state.config.read().await;
        Duration::from_secs(config.timeout_seconds)
    };

    ctx.event_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        if let AppEvent::UiEvent(UiEvent::Close) = event {
            tracing::info!("[EVENT_LOOP] Close requested");
            ctx.event_tx.send(event).await?;
            return Ok(());
        }

        handle_events(&ctx, event, timeout).await?;
    }
}

pub async fn handle_events(ctx: &AppContext, event: AppEvent, timeout: Duration) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput(text) => {
            tracing::debug!("TextInput received: {} chars", text.len());

            match tokio::time::timeout(timeout, handle_text_input(text.clone(), ctx)).await {
                Ok(result) => result?,
                Err(_) => {
                    tracing::error!("Handling '{}' timed out after {:?}", text, timeout);
                    ctx.event_tx
                        .send(AppEvent::TranslationFailed {
                            input: text,
                            error: format!("timed out after {}s", timeout.as_secs()),
                        })
                        .await?;
                }
            }
        }
        AppEvent::UiEvent(event) => {
            handle_history_event(event, ctx).await?;
        }
        AppEvent::ShowResult(_)
        | AppEvent::ShowHistory(_)
        | AppEvent::Status(_)
        | AppEvent::TranslationFailed { .. }
        | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}
