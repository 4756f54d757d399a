use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BisubError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub transcriber: TranscriberConfig,
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the whisper.cpp CLI binary
    pub binary_path: String,
    /// Path to the ggml model file
    pub model_path: String,
    /// Source language passed to the recognizer
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Trimmed words that end with a period but never end a sentence
    pub abbreviations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Extra tail padding on a cue's end (milliseconds)
    pub smoothing_ms: u64,
    /// Minimum silence kept between consecutive cues (milliseconds)
    pub min_gap_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translate endpoint URL
    pub endpoint: String,
    /// API credentials; fall back to ~/.bisub/credentials.json when unset
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    /// Source language code sent with each request
    pub source_lang: String,
    /// Target language code sent with each request
    pub target_lang: String,
    /// Maximum attempts per cue
    pub max_retries: u32,
    /// Pause between attempts (milliseconds)
    pub retry_delay_ms: u64,
    /// What to do once the attempts for a cue are exhausted
    pub policy: TranslationPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationPolicy {
    /// Fail the file and stop the whole batch
    Strict,
    /// Switch the rest of the run to the no-translation sentinel
    DegradeToSentinel,
    /// Fail the file; the batch continues with the next file
    AbortOnExhaustion,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            binary_path: "whisper-cli".to_string(),
            model_path: "models/ggml-base.en.bin".to_string(),
            language: "en".to_string(),
        }
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            abbreviations: vec![
                "Mr.".to_string(),
                "Ms.".to_string(),
                "Dr.".to_string(),
            ],
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            smoothing_ms: 300,
            min_gap_ms: 100,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://fanyi-api.baidu.com/api/trans/vip/translate".to_string(),
            app_id: None,
            app_key: None,
            source_lang: "en".to_string(),
            target_lang: "zh".to_string(),
            max_retries: 3,
            retry_delay_ms: 1000,
            policy: TranslationPolicy::DegradeToSentinel,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BisubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| BisubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BisubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| BisubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timing.smoothing_ms, 300);
        assert_eq!(config.timing.min_gap_ms, 100);
        assert_eq!(config.translate.max_retries, 3);
        assert_eq!(config.translate.policy, TranslationPolicy::DegradeToSentinel);
        assert_eq!(config.segmenter.abbreviations, vec!["Mr.", "Ms.", "Dr."]);
    }

    #[test]
    fn test_partial_file_keeps_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [timing]
            smoothing_ms = 500
            min_gap_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.smoothing_ms, 500);
        assert_eq!(config.translate.target_lang, "zh");
        assert_eq!(config.transcriber.language, "en");
    }

    #[test]
    fn test_policy_spelling() {
        let config: Config = toml::from_str(
            r#"
            [translate]
            endpoint = "http://localhost:9000/translate"
            source_lang = "en"
            target_lang = "zh"
            max_retries = 2
            retry_delay_ms = 0
            policy = "abort_on_exhaustion"
            "#,
        )
        .unwrap();

        assert_eq!(config.translate.policy, TranslationPolicy::AbortOnExhaustion);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::default();
        config.save_to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();

        assert_eq!(loaded.timing.smoothing_ms, config.timing.smoothing_ms);
        assert_eq!(loaded.translate.endpoint, config.translate.endpoint);
    }
}
