use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use kanal::AsyncReceiver;
use omni_types::{AppEvent, TranslationResult};
use tokio::signal;

pub mod cli;
pub mod context;
pub mod controller;
pub mod events;
pub mod history;
pub mod io;
pub mod logger;
pub mod profile;
pub mod render;
pub mod session;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::cli::Args;
use self::context::{AppContext, Services};
use self::controller::AppController;
use self::events::text_input::handle_text_input;
use self::state::AppState;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logger::init_logger(args.verbose, args.log_json);

    if let Some(path) = &args.init_config {
        profile::init_config(path)?;
        return Ok(());
    }

    let mut config = profile::load_config(args.config.as_deref())?;
    if args.no_speech {
        config.speech.enabled = false;
    }

    let services = Services::from_config(&config);
    let state = Arc::new(AppState::new(config));

    match args.text {
        Some(text) => run_once(state, services, text).await,
        None => run(state, services).await,
    }
}

/// Handles a single input, prints the outcome and waits for speech to finish
async fn run_once(state: Arc<AppState>, mut services: Services, text: String) -> anyhow::Result<()> {
    let speaker = services.speaker.take();
    let show_system_info = state.config.read().await.ui.show_system_info;

    let (event_tx, event_rx) = kanal::unbounded_async();
    let ctx = AppContext::new(state, event_tx, services);

    let Some(result) = process_once(&ctx, &event_rx, text).await? else {
        return Ok(());
    };

    print!("{}", render::format_result(&result, show_system_info));

    if let Some(speaker) = &speaker
        && let Err(e) = speaker.speak(&result.english_text).await
    {
        tracing::warn!("Speech failed: {}", e);
    }

    Ok(())
}

/// Runs `text` through the input handler and returns the result it produced, if any
async fn process_once(
    ctx: &AppContext,
    event_rx: &AsyncReceiver<AppEvent>,
    text: String,
) -> anyhow::Result<Option<TranslationResult>> {
    handle_text_input(text, ctx).await?;

    let mut shown = None;
    while let Some(event) = event_rx.try_recv()? {
        match event {
            AppEvent::ShowResult(result) => shown = Some(result),
            AppEvent::TranslationFailed { input, error } => {
                anyhow::bail!("Translation error for '{}': {}", input, error);
            }
            _ => {}
        }
    }

    Ok(shown)
}

async fn run(state: Arc<AppState>, services: Services) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(services).await;

    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task exited: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();

    // Let the UI drain what is already queued
    let drain = async { while tasks.join_next().await.is_some() {} };
    if tokio::time::timeout(SHUTDOWN_GRACE, drain).await.is_err() {
        tasks.abort_all();
    }

    Ok(())
}
