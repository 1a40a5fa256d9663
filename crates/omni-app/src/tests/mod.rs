mod history_tests;
mod pipeline_tests;

use omni_core::{DictionaryRecord, Language};
use omni_types::TranslationResult;
use uuid::Uuid;

pub(crate) fn entry(input: &str, translation: &str) -> TranslationResult {
    TranslationResult {
        id: Uuid::new_v4(),
        input: input.to_string(),
        detected_lang: Language::detect(input),
        translation: translation.to_string(),
        english_text: input.to_string(),
        dictionary: None,
        timestamp: "12:00:00".to_string(),
    }
}

pub(crate) fn record(term: &str, definition: &str) -> DictionaryRecord {
    DictionaryRecord {
        term: term.to_string(),
        pronunciation: String::new(),
        part_of_speech: "noun".to_string(),
        definitions: vec![definition.to_string()],
        examples: vec![],
    }
}
