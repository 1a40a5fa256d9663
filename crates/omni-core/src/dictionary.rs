use serde::{Deserialize, Serialize};

/// Structured dictionary data recovered for one looked-up term.
///
/// Only records with at least one definition are ever handed out; `pronunciation`,
/// `part_of_speech` and `examples` may all be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRecord {
    pub term: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub part_of_speech: String,
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl DictionaryRecord {
    /// First definition, used for one-line summaries
    pub fn primary_definition(&self) -> Option<&str> {
        self.definitions.first().map(String::as_str)
    }
}
