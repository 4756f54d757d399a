use serde::{Deserialize, Serialize};

/// A single recognized token with word-level timestamps, in seconds.
/// The text may carry leading whitespace as emitted by the recognizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// A recognizer grouping of words. Segments are carriers of the word
/// stream only; segment boundaries do not imply cue boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub words: Vec<Word>,
}

/// The typed result of one transcription run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub language: String,
    pub segments: Vec<Segment>,
}

impl Transcription {
    /// The flattened word stream, in temporal order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.segments.iter().flat_map(|segment| segment.words.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.words().next().is_none()
    }
}

// Structs for parsing whisper-cli full JSON output

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOutput {
    pub result: WhisperCppResult,
    pub transcription: Vec<WhisperCppSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppResult {
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppSegment {
    pub offsets: WhisperCppOffsets,
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<WhisperCppToken>,
}

/// Millisecond offsets relative to the start of the audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOffsets {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppToken {
    pub text: String,
    pub offsets: WhisperCppOffsets,
}

impl From<WhisperCppOutput> for Transcription {
    fn from(output: WhisperCppOutput) -> Self {
        let segments = output
            .transcription
            .into_iter()
            .map(|segment| {
                let words = segment
                    .tokens
                    .into_iter()
                    .filter(|token| !is_marker_token(&token.text))
                    .map(|token| Word {
                        text: token.text,
                        start: token.offsets.from as f64 / 1000.0,
                        end: token.offsets.to as f64 / 1000.0,
                    })
                    .collect();

                Segment {
                    start: segment.offsets.from as f64 / 1000.0,
                    end: segment.offsets.to as f64 / 1000.0,
                    words,
                }
            })
            .collect();

        Transcription {
            language: output.result.language,
            segments,
        }
    }
}

/// whisper-cli emits non-lexical markers such as `[_BEG_]` and `[_TT_150]`
/// among the word tokens.
fn is_marker_token(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with("[_") && trimmed.ends_with(']')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_whisper_output() {
        let json = r#"{
            "result": { "language": "en" },
            "transcription": [
                {
                    "timestamps": { "from": "00:00:00,000", "to": "00:00:01,000" },
                    "offsets": { "from": 0, "to": 1000 },
                    "text": " Good morning.",
                    "tokens": [
                        { "text": "[_BEG_]", "offsets": { "from": 0, "to": 0 } },
                        { "text": " Good", "offsets": { "from": 0, "to": 300 } },
                        { "text": " morning.", "offsets": { "from": 300, "to": 900 } }
                    ]
                }
            ]
        }"#;

        let output: WhisperCppOutput = serde_json::from_str(json).unwrap();
        let transcription: Transcription = output.into();

        assert_eq!(transcription.language, "en");
        assert_eq!(transcription.segments.len(), 1);

        let words: Vec<&Word> = transcription.words().collect();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, " Good");
        assert_eq!(words[0].start, 0.0);
        assert_eq!(words[0].end, 0.3);
        assert_eq!(words[1].text, " morning.");
        assert_eq!(words[1].end, 0.9);
    }

    #[test]
    fn test_marker_tokens_filtered() {
        assert!(is_marker_token("[_BEG_]"));
        assert!(is_marker_token(" [_TT_150]"));
        assert!(!is_marker_token(" Good"));
        assert!(!is_marker_token("[laughs]"));
    }

    #[test]
    fn test_empty_transcription() {
        let transcription = Transcription {
            language: "en".to_string(),
            segments: vec![Segment { start: 0.0, end: 1.0, words: Vec::new() }],
        };
        assert!(transcription.is_empty());
    }
}
