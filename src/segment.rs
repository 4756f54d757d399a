use crate::cue::Cue;
use crate::error::{BisubError, Result};
use crate::transcribe::{Transcription, Word};

/// Groups the recognized word stream into sentence-level cues.
///
/// A word ends a sentence when its trimmed text carries terminal
/// punctuation and is not one of the configured abbreviations; the
/// abbreviation list guards against splitting after titles like "Mr.".
pub struct SentenceSegmenter {
    abbreviations: Vec<String>,
}

impl SentenceSegmenter {
    pub fn new(abbreviations: Vec<String>) -> Self {
        Self { abbreviations }
    }

    /// Group the flattened word stream into pre-smoothing cues.
    ///
    /// Cue end-times are the raw word end-times here; they are only final
    /// after the boundary smoother has run over the whole list.
    pub fn segment(&self, transcription: &Transcription) -> Result<Vec<Cue>> {
        let mut cues: Vec<Cue> = Vec::new();
        let mut buffer: Vec<Word> = Vec::new();
        let mut sentence_start: Option<u64> = None;

        for word in transcription.words() {
            if word.start < 0.0 || word.end < 0.0 || word.start > word.end {
                return Err(BisubError::MalformedWord(format!(
                    "word '{}' has timestamps {}..{}",
                    word.text.trim(),
                    word.start,
                    word.end
                )));
            }

            if sentence_start.is_none() {
                sentence_start = Some(to_millis(word.start));
            }
            buffer.push(word.clone());

            let trimmed = word.text.trim();
            if trimmed.is_empty() {
                // Keep for spacing, but an empty word never ends a sentence.
                continue;
            }

            if self.ends_sentence(trimmed) {
                let start_ms = sentence_start.take().unwrap_or_else(|| to_millis(word.start));
                let end_ms = to_millis(word.end);
                if let Some(cue) = build_cue(cues.len() + 1, start_ms, end_ms, &mut buffer) {
                    cues.push(cue);
                }
            }
        }

        // Flush a trailing unterminated sentence.
        if let (Some(start_ms), Some(last)) = (sentence_start, buffer.last()) {
            let end_ms = to_millis(last.end);
            if let Some(cue) = build_cue(cues.len() + 1, start_ms, end_ms, &mut buffer) {
                cues.push(cue);
            }
        }

        Ok(cues)
    }

    fn ends_sentence(&self, trimmed: &str) -> bool {
        trimmed.ends_with(['.', '!', '?'])
            && !self.abbreviations.iter().any(|abbreviation| abbreviation == trimmed)
    }
}

/// Round a seconds timestamp to integer milliseconds.
pub fn to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

/// Build a cue from the buffered words, leaving the buffer empty.
///
/// Yields nothing when the buffer holds no visible text; a cue's primary
/// text must be non-empty.
fn build_cue(index: usize, start_ms: u64, end_ms: u64, buffer: &mut Vec<Word>) -> Option<Cue> {
    let words = std::mem::take(buffer);
    let raw: String = words.iter().map(|word| word.text.as_str()).collect();
    let text: String = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return None;
    }

    Some(Cue {
        index,
        start_ms,
        end_ms,
        text_primary: text,
        text_secondary: None,
        words,
    })
}
