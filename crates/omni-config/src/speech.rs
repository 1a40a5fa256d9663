use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_api_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Command line of an audio player; the audio file path is appended as the last argument
    pub player: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            language: default_language(),
            api_url: default_api_url(),
            player: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
