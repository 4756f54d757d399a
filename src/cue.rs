use serde::{Deserialize, Serialize};

use crate::transcribe::Word;

/// Output shape selection for the cue writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One text line per cue: the recognized sentence.
    Monolingual,
    /// Two text lines per cue: the recognized sentence and its translation.
    Bilingual,
}

/// A single subtitle cue.
///
/// Timing is kept in integer milliseconds; the seconds reported by the
/// recognizer are rounded once on cue construction and every later
/// adjustment stays in integer math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cue {
    /// 1-based position in the cue list, dense and strictly increasing.
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    /// The recognized sentence, whitespace-normalized and trimmed.
    pub text_primary: String,
    /// Translation, when one was produced for this run.
    pub text_secondary: Option<String>,
    /// The words that formed this cue.
    pub words: Vec<Word>,
}
