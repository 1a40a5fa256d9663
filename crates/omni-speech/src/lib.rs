mod google;
mod speaker;

pub use google::{GoogleSpeech, MAX_CHUNK_CHARS, split_chunks};
pub use speaker::Speaker;

/// Text-to-speech provider interface
#[async_trait::async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize `text`, returning MP3 audio
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Nothing to speak")]
    EmptyText,

    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Speech service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("No audio player configured")]
    NoPlayer,

    #[error("Invalid player command: {0}")]
    InvalidPlayer(String),

    #[error("Audio player failed: {0}")]
    Player(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
