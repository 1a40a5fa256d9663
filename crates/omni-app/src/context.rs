use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use omni_config::Config;
use omni_dictionary::{CambridgeClient, Dictionary};
use omni_speech::{GoogleSpeech, Speaker};
use omni_translator::{GoogleTranslator, Translator};
use omni_types::AppEvent;

use crate::state::AppState;

/// External collaborators. Each one is optional; a missing one degrades the result.
#[derive(Clone, Default)]
pub struct Services {
    pub translator: Option<Arc<dyn Translator>>,
    pub dictionary: Option<Arc<dyn Dictionary>>,
    pub speaker: Option<Speaker>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let translator = if config.translator.enabled && config.translator.provider != "google" {
            tracing::error!("Unknown translator provider '{}'", config.translator.provider);
            None
        } else if config.translator.enabled {
            match GoogleTranslator::new(
                config.translator.api_url.clone(),
                Duration::from_secs(config.translator.timeout_seconds),
            ) {
                Ok(translator) => {
                    let metadata = translator.metadata();
                    tracing::info!(
                        "Translator: {} (api key required: {}, free tier: {})",
                        metadata.name,
                        metadata.requires_api_key,
                        metadata.free_tier_available
                    );
                    Some(Arc::new(translator) as Arc<dyn Translator>)
                }
                Err(e) => {
                    tracing::error!("Failed to create translator: {}", e);
                    None
                }
            }
        } else {
            tracing::warn!("Translator disabled");
            None
        };

        let dictionary = if config.dictionary.enabled {
            match CambridgeClient::try_new(
                config.dictionary.base_url.clone(),
                &config.dictionary.user_agent,
                Duration::from_secs(config.dictionary.timeout_seconds),
            ) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn Dictionary>),
                Err(e) => {
                    tracing::error!("Failed to create dictionary client: {}", e);
                    None
                }
            }
        } else {
            tracing::warn!("Dictionary disabled");
            None
        };

        let speaker = if config.speech.enabled {
            build_speaker(config)
        } else {
            None
        };

        Self {
            translator,
            dictionary,
            speaker,
        }
    }
}

fn build_speaker(config: &Config) -> Option<Speaker> {
    let speech = GoogleSpeech::new(
        config.speech.api_url.clone(),
        config.speech.language.clone(),
        Duration::from_secs(config.speech.timeout_seconds),
    )
    .inspect_err(|e| tracing::error!("Failed to create speech client: {}", e))
    .ok()?;

    let speaker = Speaker::new(Arc::new(speech), config.speech.player.as_deref())
        .inspect_err(|e| tracing::error!("Failed to create speaker: {}", e))
        .ok()?;

    if !speaker.has_player() {
        tracing::warn!("No audio player configured, speech is off (set speech.player or OMNI_PLAYER)");
        return None;
    }

    Some(speaker)
}

/// Shared dependencies of the event handlers
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub services: Services,
}

impl AppContext {
    pub fn new(state: Arc<AppState>, event_tx: AsyncSender<AppEvent>, services: Services) -> Self {
        Self {
            state,
            event_tx,
            services,
        }
    }

    /// Speaks `text` in the background; failures are only logged
    pub fn speak_async(&self, text: &str) {
        let Some(speaker) = self.services.speaker.clone() else {
            tracing::debug!("Speech unavailable, not speaking '{}'", text);
            return;
        };

        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = speaker.speak(&text).await {
                tracing::warn!("Speech failed for '{}': {}", text, e);
            }
        });
    }
}
