use std::fmt::Write;

use omni_types::{HistoryItem, TranslationResult};

/// Formats a result as translation, dictionary and (optionally) system info sections
pub fn format_result(result: &TranslationResult, show_system_info: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Translation ===");
    let _ = writeln!(out, "{}", result.translation);

    if let Some(record) = &result.dictionary {
        let _ = writeln!(out, "\n=== Dictionary ===");

        if !record.part_of_speech.is_empty() {
            let _ = writeln!(out, "Part of speech: {}", record.part_of_speech);
        }
        if !record.pronunciation.is_empty() {
            let _ = writeln!(out, "Pronunciation: /{}/", record.pronunciation);
        }

        if !record.definitions.is_empty() {
            let _ = writeln!(out, "\nDefinitions:");
            for (i, definition) in record.definitions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, definition);
            }
        }

        if !record.examples.is_empty() {
            let _ = writeln!(out, "\nExamples:");
            for (i, example) in record.examples.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, example);
            }
        }
    }

    if show_system_info {
        let _ = writeln!(out, "\n=== System ===");
        let _ = writeln!(out, "Input: {}", result.input);
        let _ = writeln!(out, "Detected language: {}", result.detected_lang);
        let _ = writeln!(out, "Spoken text: {}", result.english_text);
        let _ = writeln!(out, "Time: {}", result.timestamp);
    }

    out
}

pub fn format_history(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return "No history entries\n".to_string();
    }

    items
        .iter()
        .map(|item| format!("[{}] {}: {}\n", item.index, item.input, item.summary))
        .collect()
}
