use std::io::Write;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::cue::{Cue, OutputMode};
use crate::error::{BisubError, Result};
use crate::timecode::format_millis;
use crate::translate::NO_TRANSLATION;

/// Render an ordered cue list as SRT text.
///
/// LF line endings, a blank line after every cue including the last. The
/// bilingual shape carries the literal line prefixes downstream players
/// expect.
pub fn render_srt(cues: &[Cue], mode: OutputMode) -> String {
    let mut srt_content = String::new();

    for cue in cues {
        srt_content.push_str(&format!(
            "{}\n{} --> {}\n",
            cue.index,
            format_millis(cue.start_ms),
            format_millis(cue.end_ms)
        ));

        match mode {
            OutputMode::Monolingual => {
                srt_content.push_str(&cue.text_primary);
                srt_content.push('\n');
            }
            OutputMode::Bilingual => {
                let secondary = cue.text_secondary.as_deref().unwrap_or(NO_TRANSLATION);
                srt_content.push_str(&format!(
                    "英文：{}\n中文：{}\n",
                    cue.text_primary, secondary
                ));
            }
        }

        srt_content.push('\n');
    }

    srt_content
}

/// Write the SRT file atomically.
///
/// The content goes to a sibling temporary file that is renamed into place
/// on success, so a failed run never leaves a partial output path behind.
pub async fn write_srt<P: AsRef<Path>>(cues: &[Cue], mode: OutputMode, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Generating SRT file: {}", output_path.display());

    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).await?;

    let content = render_srt(cues, mode);

    let mut temp = tempfile::Builder::new()
        .prefix(".bisub-")
        .suffix(".srt.tmp")
        .tempfile_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.persist(output_path)
        .map_err(|e| BisubError::Io(e.error))?;

    info!("SRT file generated successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcribe::Word;

    fn cue(index: usize, start_ms: u64, end_ms: u64, text: &str, secondary: Option<&str>) -> Cue {
        Cue {
            index,
            start_ms,
            end_ms,
            text_primary: text.to_string(),
            text_secondary: secondary.map(str::to_string),
            words: vec![Word { text: text.to_string(), start: 0.0, end: 0.0 }],
        }
    }

    #[test]
    fn test_monolingual_grammar() {
        let cues = vec![cue(1, 0, 1200, "Good morning.", None)];
        let srt = render_srt(&cues, OutputMode::Monolingual);
        assert_eq!(srt, "1\n00:00:00,000 --> 00:00:01,200\nGood morning.\n\n");
    }

    #[test]
    fn test_monolingual_two_cues() {
        let cues = vec![
            cue(1, 0, 700, "Hi.", None),
            cue(2, 1500, 2900, "How are you?", None),
        ];
        let srt = render_srt(&cues, OutputMode::Monolingual);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:00,700\nHi.\n\n\
             2\n00:00:01,500 --> 00:00:02,900\nHow are you?\n\n"
        );
    }

    #[test]
    fn test_bilingual_grammar() {
        let cues = vec![cue(1, 0, 1200, "Good morning.", Some("早上好。"))];
        let srt = render_srt(&cues, OutputMode::Bilingual);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,200\n英文：Good morning.\n中文：早上好。\n\n"
        );
    }

    #[test]
    fn test_bilingual_missing_translation_uses_sentinel() {
        let cues = vec![cue(1, 0, 1200, "Good morning.", None)];
        let srt = render_srt(&cues, OutputMode::Bilingual);
        assert!(srt.contains("中文：无翻译\n"));
    }

    #[test]
    fn test_empty_cue_list_renders_nothing() {
        assert_eq!(render_srt(&[], OutputMode::Monolingual), "");
    }

    #[tokio::test]
    async fn test_write_is_atomic_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.srt");

        let cues = vec![cue(1, 0, 1200, "Good morning.", None)];
        write_srt(&cues, OutputMode::Monolingual, &output).await.unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "1\n00:00:00,000 --> 00:00:01,200\nGood morning.\n\n");

        // No stray temporary files next to the output.
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != output)
            .collect();
        assert!(leftovers.is_empty());
    }
}
