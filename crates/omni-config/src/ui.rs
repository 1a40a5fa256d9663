use serde::{Deserialize, Serialize};

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_show_system_info() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Append input, detected language, spoken text and time to each result
    #[serde(default = "default_show_system_info")]
    pub show_system_info: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_system_info: default_show_system_info(),
        }
    }
}
