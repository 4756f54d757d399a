use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::common::{Transcription, WhisperCppOutput};
use super::Transcriber;
use crate::config::TranscriberConfig;
use crate::error::{BisubError, Result};

/// Adapter around the whisper.cpp CLI with token-level timestamps enabled.
pub struct WhisperCppTranscriber {
    config: TranscriberConfig,
}

impl WhisperCppTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    fn run_whisper(&self, audio_path: &Path) -> Result<Transcription> {
        info!("Transcribing: {}", audio_path.display());

        // whisper-cli writes its JSON next to the requested output base.
        let temp_dir = tempfile::tempdir()
            .map_err(|e| BisubError::Transcriber(format!("Failed to create temp directory: {}", e)))?;
        let output_base = temp_dir.path().join("transcription");

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg("-m")
            .arg(&self.config.model_path)
            .arg("-l")
            .arg(&self.config.language)
            .arg("--output-json-full")
            .arg("--output-file")
            .arg(&output_base)
            .arg(audio_path);

        debug!("Running: {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            BisubError::Transcriber(format!(
                "Failed to execute {}: {}",
                self.config.binary_path, e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BisubError::Transcriber(format!(
                "whisper-cli failed: {}",
                stderr
            )));
        }

        let json_file = output_base.with_extension("json");
        let json_content = std::fs::read_to_string(&json_file)
            .map_err(|e| BisubError::Transcriber(format!("Failed to read whisper output: {}", e)))?;

        let whisper_output: WhisperCppOutput = serde_json::from_str(&json_content)
            .map_err(|e| BisubError::Transcriber(format!("Failed to parse whisper JSON: {}", e)))?;

        Ok(whisper_output.into())
    }
}

#[async_trait]
impl Transcriber for WhisperCppTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription> {
        self.run_whisper(audio_path)
    }
}
