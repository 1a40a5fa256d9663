use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use uuid::Uuid;

use crate::{SpeechError, Synthesizer};

/// Speaks text by synthesizing it and handing the audio to an external player.
#[derive(Clone)]
pub struct Speaker {
    synthesizer: Arc<dyn Synthesizer>,
    /// Program and leading arguments; the audio file is appended
    player: Option<Vec<String>>,
}

impl Speaker {
    pub fn new(synthesizer: Arc<dyn Synthesizer>, player: Option<&str>) -> Result<Self, SpeechError> {
        let player = match player {
            Some(command) => {
                let args = shlex::split(command)
                    .filter(|args| !args.is_empty())
                    .ok_or_else(|| SpeechError::InvalidPlayer(command.to_string()))?;
                Some(args)
            }
            None => None,
        };

        Ok(Self { synthesizer, player })
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    pub async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let player = self.player.as_ref().ok_or(SpeechError::NoPlayer)?;
        let audio = self.synthesizer.synthesize(text).await?;

        let path = std::env::temp_dir().join(format!("omni-{}.mp3", Uuid::new_v4()));
        tokio::fs::write(&path, &audio).await?;

        let result = play(player, &path).await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }

        result
    }
}

async fn play(player: &[String], path: &Path) -> Result<(), SpeechError> {
    let (program, args) = player
        .split_first()
        .ok_or_else(|| SpeechError::InvalidPlayer(String::new()))?;

    tracing::debug!("Playing {} with {}", path.display(), program);

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await?;

    if !status.success() {
        return Err(SpeechError::Player(status.to_string()));
    }

    Ok(())
}
