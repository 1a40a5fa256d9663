use std::sync::Arc;

use kanal::AsyncReceiver;
use omni_config::Config;
use omni_types::{AppEvent, UiEvent};
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::RwLock;

use crate::render::{format_history, format_result};

/// Terminal front-end: renders backend events to stdout until close.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let (prompt, show_system_info) = {
        let config = config.read().await;
        (config.ui.prompt.clone(), config.ui.show_system_info)
    };
    let interactive = atty::is(atty::Stream::Stdin);

    let mut stdout = tokio::io::stdout();

    loop {
        let event = app_to_ui_rx.recv().await?;

        let output = match event {
            AppEvent::ShowResult(result) => format_result(&result, show_system_info),
            AppEvent::ShowHistory(items) => format_history(&items),
            AppEvent::Status(status) => format!("{}\n", status),
            AppEvent::TranslationFailed { input, error } => {
                format!("Translation error for '{}': {}\n", input, error)
            }
            AppEvent::BackendReady => {
                tracing::info!("Backend ready");
                String::new()
            }
            AppEvent::UiEvent(UiEvent::Close) => {
                tracing::info!("UI closing");
                return Ok(());
            }
            AppEvent::UiEvent(_) | AppEvent::TextInput(_) => continue,
        };

        write_output(&mut stdout, &output, interactive.then_some(prompt.as_str())).await?;
    }
}

async fn write_output(stdout: &mut Stdout, output: &str, prompt: Option<&str>) -> anyhow::Result<()> {
    if !output.is_empty() {
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    if let Some(prompt) = prompt {
        stdout.write_all(prompt.as_bytes()).await?;
    }

    stdout.flush().await?;
    Ok(())
}
