use omni_core::{DictionaryRecord, Language};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    TextInput(String),
    ShowResult(TranslationResult),
    ShowHistory(Vec<HistoryItem>),
    Status(String),
    TranslationFailed {
        input: String,
        error: String,
    },
    BackendReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ListHistory,
    SearchHistory(String),
    SelectHistory(usize),
    DeleteHistory(usize),
    Close,
}

/// One translated input, as shown to the user and stored in the history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub input: String,
    pub detected_lang: Language,
    pub translation: String,
    /// The English side of the pair; this is what gets spoken
    pub english_text: String,
    #[serde(default)]
    pub dictionary: Option<DictionaryRecord>,
    pub timestamp: String,
}

/// A row of the (possibly filtered) history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Position in the filtered list, used by select and delete
    pub index: usize,
    pub input: String,
    /// Primary definition when there is one, the translation otherwise
    pub summary: String,
}

impl UiEvent {
    /// Parses a `:command` line. Returns `None` for anything that is not a known command.
    pub fn parse(line: &str) -> Option<UiEvent> {
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") || line == ":q" {
            return Some(UiEvent::Close);
        }

        let command = line.strip_prefix(':')?;
        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (command, ""),
        };

        match name {
            "history" | "h" => Some(UiEvent::ListHistory),
            "search" | "s" => Some(UiEvent::SearchHistory(argument.to_lowercase())),
            "show" => argument.parse().ok().map(UiEvent::SelectHistory),
            "delete" | "d" => argument.parse().ok().map(UiEvent::DeleteHistory),
            "quit" => Some(UiEvent::Close),
            _ => None,
        }
    }
}
