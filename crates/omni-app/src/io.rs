use std::io::BufRead;
use std::time::Duration;

use kanal::AsyncSender;
use omni_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

/// Maps one stdin line to the event sent to the app
pub fn input_event(line: String) -> AppEvent {
    match UiEvent::parse(&line) {
        Some(event) => AppEvent::UiEvent(event),
        None => AppEvent::TextInput(line),
    }
}

/// Watcher for stdin. Lines are read on a dedicated thread; EOF closes the app.
pub async fn watcher_io(
    delta_time: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let tx = event_tx.to_sync();

    let reader = std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                };

                let event = input_event(line);
                let close = matches!(event, AppEvent::UiEvent(UiEvent::Close));

                if tx.send(event).is_err() || close {
                    return;
                }
            }

            tracing::info!("stdin closed");
            let _ = tx.send(AppEvent::UiEvent(UiEvent::Close));
        })?;

    let mut reader = Some(reader);
    let mut interval = tokio::time::interval(delta_time);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("stdin watcher stopping");
                break;
            }
            _ = interval.tick(), if reader.is_some() => {
                if reader.as_ref().is_some_and(|handle| handle.is_finished()) {
                    tracing::debug!("stdin reader finished");
                    reader = None;
                }
            }
        }
    }

    Ok(())
}
