use std::time::Duration;

use async_trait::async_trait;

use crate::{SpeechError, Synthesizer};

/// Longest text the endpoint accepts in one request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Client for Google Translate's text-to-speech endpoint.
#[derive(Clone)]
pub struct GoogleSpeech {
    client: reqwest::Client,
    api_url: String,
    language: String,
}

impl GoogleSpeech {
    pub fn new(api_url: String, language: String, timeout: Duration) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url,
            language,
        })
    }

    async fn fetch_chunk(&self, chunk: &str) -> Result<Vec<u8>, SpeechError> {
        let params = [
            ("ie", "UTF-8"),
            ("client", "tw-ob"),
            ("tl", self.language.as_str()),
            ("q", chunk),
        ];

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(SpeechError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Synthesizer for GoogleSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        // MP3 frames can simply be concatenated
        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.fetch_chunk(chunk).await?);
        }

        tracing::debug!("Synthesized {} chunks, {} bytes", chunks.len(), audio.len());

        Ok(audio)
    }
}

/// Splits `text` on whitespace into chunks of at most `max_chars` characters.
///
/// Words longer than `max_chars` are split mid-word.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > max_chars {
            let chars: Vec<char> = word.chars().collect();
            let mut pieces = chars.chunks(max_chars).map(|piece| piece.iter().collect::<String>());
            let last = pieces.next_back().unwrap_or_default();

            chunks.extend(pieces);
            current_len = last.chars().count();
            current = last;
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 {
        chunks.push(current);
    }

    chunks
}
