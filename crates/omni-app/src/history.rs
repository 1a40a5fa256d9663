use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use omni_types::TranslationResult;

/// Translation history persisted as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct HistoryStorage {
    path: PathBuf,
}

impl HistoryStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load history, falling back to an empty list on any error
    pub fn load(&self) -> Vec<TranslationResult> {
        match self.try_load() {
            Ok(history) => {
                tracing::info!(
                    "Loaded {} history entries from {}",
                    history.len(),
                    self.path.display()
                );
                history
            }
            Err(e) => {
                tracing::error!("Error loading history: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Save history, logging instead of failing
    pub async fn save(&self, history: &[TranslationResult]) {
        if let Err(e) = self.try_save(history).await {
            tracing::error!("Error saving history: {:#}", e);
        }
    }

    pub fn try_load(&self) -> anyhow::Result<Vec<TranslationResult>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    pub async fn try_save(&self, history: &[TranslationResult]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(history)?;

        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}
