use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://dictionary.cambridge.org/dictionary/english/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_max_words() -> usize {
    2
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Entry pages live at `{base_url}{term}`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Longest input, in words, that is still looked up
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            max_words: default_max_words(),
        }
    }
}
