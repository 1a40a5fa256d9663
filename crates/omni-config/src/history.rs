use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "translation_history.json".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
