// Modular transcription architecture
//
// The recognizer is consumed as a black box behind the `Transcriber` trait:
// audio path in, word-timestamped segments out. The factory pattern keeps
// room for further engines; the pipeline only ever sees `Transcription`.

pub mod common;
pub mod whisper_cpp;

use async_trait::async_trait;
use std::path::Path;

pub use common::{Segment, Transcription, Word};

use crate::config::TranscriberConfig;
use crate::error::Result;

/// Main trait for transcription operations
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file into word-timestamped segments
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription>;
}

/// Transcriber implementation type
#[derive(Debug, Clone)]
pub enum TranscriberImplementation {
    WhisperCpp,
    // Future implementations can be added here:
    // OpenAI,
    // Azure,
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create a transcriber based on implementation type
    pub fn create_transcriber(
        implementation: TranscriberImplementation,
        config: TranscriberConfig,
    ) -> Box<dyn Transcriber> {
        match implementation {
            TranscriberImplementation::WhisperCpp => {
                Box::new(whisper_cpp::WhisperCppTranscriber::new(config))
            }
        }
    }

    /// Create with the default implementation
    pub fn create_default(config: TranscriberConfig) -> Box<dyn Transcriber> {
        Self::create_transcriber(TranscriberImplementation::WhisperCpp, config)
    }
}
