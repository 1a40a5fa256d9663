use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::history::HistoryConfig;
use self::speech::SpeechConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod dictionary;
pub mod history;
pub mod speech;
pub mod translator;
pub mod ui;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub speech: SpeechConfig,
    pub history: HistoryConfig,
    pub ui: UiConfig,

    /// App main loop delta time
    pub delta_time: u64,
    /// Upper bound for handling a single input
    pub timeout_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment overrides on top of an already loaded config
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(delta_time) = env_parse("DELTA_TIME_MS") {
            self.delta_time = delta_time;
        }

        if let Some(timeout_seconds) = env_parse("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout_seconds;
        }

        if let Ok(path) = env::var("OMNI_HISTORY_PATH") {
            self.history.path = path;
        }

        if let Ok(player) = env::var("OMNI_PLAYER")
            && !player.trim().is_empty()
        {
            self.speech.player = Some(player);
        }

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dictionary: DictionaryConfig::default(),
            translator: TranslatorConfig::default(),
            speech: SpeechConfig::default(),
            history: HistoryConfig::default(),
            ui: UiConfig::default(),

            delta_time: 100,     // 100ms default
            timeout_seconds: 30, // 30 seconds default
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
