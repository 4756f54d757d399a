use thiserror::Error;

#[derive(Error, Debug)]
pub enum BisubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    #[error("Malformed word: {0}")]
    MalformedWord(String),

    #[error("Transcription produced no words")]
    EmptyTranscription,

    #[error("Cue collision: {0}")]
    CueCollision(String),

    #[error("Translation exhausted after {0} attempts")]
    TranslationExhausted(u32),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Transcriber error: {0}")]
    Transcriber(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, BisubError>;
