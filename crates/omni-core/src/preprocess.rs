use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default input preprocessor
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFKC)
        text = text.nfkc().collect();

        text = text.replace(['\n', '\r'], " ").trim().to_string();

        // Lookups and history matching are case-insensitive
        if text.chars().any(char::is_uppercase) {
            text = text.to_lowercase();
        }

        text
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
