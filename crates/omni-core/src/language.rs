use serde::{Deserialize, Serialize};

/// Language of a piece of user input, as far as translation routing is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Language {
    English,
    Chinese,
    /// Any other language, by its provider code
    Other(String),
}

impl Language {
    /// Guesses the language of `text` from its script.
    ///
    /// Han characters outnumbering Latin letters means Chinese, any Latin letters otherwise
    /// means English. Text with neither is `Other("und")`.
    pub fn detect(text: &str) -> Self {
        let (han, latin) = text.chars().fold((0usize, 0usize), |(han, latin), c| {
            if is_han(c) {
                (han + 1, latin)
            } else if c.is_ascii_alphabetic() {
                (han, latin + 1)
            } else {
                (han, latin)
            }
        });

        if han > 0 && han >= latin {
            Language::Chinese
        } else if latin > 0 {
            Language::English
        } else {
            Language::Other("und".to_string())
        }
    }

    /// Maps a provider language code ("en", "zh-CN", "zh-tw", ...) onto a `Language`.
    pub fn from_code(code: &str) -> Self {
        let lower = code.to_lowercase();

        match lower.as_str() {
            "en" => Language::English,
            "zh" | "zh-cn" | "zh-tw" => Language::Chinese,
            _ => Language::Other(lower),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
            Language::Other(code) => code,
        }
    }

    /// Source code to hand to a translation provider.
    pub fn translation_source(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Chinese | Language::Other(_) => "auto",
        }
    }

    /// Chinese goes to English, everything else to Traditional Chinese.
    pub fn translation_target(&self) -> &'static str {
        match self {
            Language::Chinese => "en",
            Language::English | Language::Other(_) => "zh-TW",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Whether `text` should be looked up in the English dictionary.
///
/// Only input detected as English with between one and `max_words` words qualifies.
pub fn is_lookup_candidate(text: &str, language: &Language, max_words: usize) -> bool {
    let words = text.split_whitespace().count();

    language.is_english() && (1..=max_words).contains(&words)
}

fn is_han(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}')
}
