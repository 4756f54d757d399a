use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::{Config, TranslationPolicy};
use crate::cue::{Cue, OutputMode};
use crate::error::{BisubError, Result};
use crate::segment::SentenceSegmenter;
use crate::subtitle::write_srt;
use crate::timecode::format_millis;
use crate::timing::smooth;
use crate::transcribe::{Transcriber, TranscriberFactory};
use crate::translate::{Translator, TranslatorFactory, NO_TRANSLATION};

/// Audio container extensions accepted by the batch driver.
const AUDIO_EXTENSIONS: [&str; 3] = ["mp3", "wav", "m4a"];

/// Terminal state of one processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The output was generated and renamed into place.
    Written,
    /// The output already existed; nothing was touched.
    Skipped,
}

/// Counts reported after a directory run.
#[derive(Debug, Default, Clone)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub struct Workflow {
    config: Config,
    transcriber: Box<dyn Transcriber>,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        let transcriber = TranscriberFactory::create_default(config.transcriber.clone());
        Self { config, transcriber }
    }

    /// Process a single audio file into an SRT at `output_path`.
    pub async fn process_file(
        &self,
        input_path: &Path,
        output_path: &Path,
        mode: OutputMode,
    ) -> Result<FileOutcome> {
        if output_path.exists() {
            info!("Output already exists, skipping: {}", output_path.display());
            return Ok(FileOutcome::Skipped);
        }

        if !input_path.exists() {
            return Err(BisubError::FileNotFound(input_path.display().to_string()));
        }

        let translator = match mode {
            OutputMode::Bilingual => {
                Some(TranslatorFactory::create_translator(self.config.translate.clone())?)
            }
            OutputMode::Monolingual => None,
        };

        self.run_pipeline(input_path, output_path, mode, translator).await
    }

    /// The per-file pipeline: transcribe, segment, smooth, translate, write.
    async fn run_pipeline(
        &self,
        input_path: &Path,
        output_path: &Path,
        mode: OutputMode,
        mut translator: Option<Box<dyn Translator>>,
    ) -> Result<FileOutcome> {
        info!("Processing file: {}", input_path.display());

        let transcription = self.transcriber.transcribe(input_path).await?;
        if transcription.is_empty() {
            return Err(BisubError::EmptyTranscription);
        }

        let segmenter = SentenceSegmenter::new(self.config.segmenter.abbreviations.clone());
        let mut cues = segmenter.segment(&transcription)?;
        if cues.is_empty() {
            return Err(BisubError::EmptyTranscription);
        }
        info!(
            "Segmented {} cues from {} recognizer segments",
            cues.len(),
            transcription.segments.len()
        );

        smooth(&mut cues, &self.config.timing)?;

        match translator.as_deref_mut() {
            Some(translator) => self.translate_cues(&mut cues, translator).await?,
            None => {
                let total = cues.len();
                for cue in &cues {
                    info!(
                        "cue {}/{} [{} --> {}] {}",
                        cue.index,
                        total,
                        format_millis(cue.start_ms),
                        format_millis(cue.end_ms),
                        cue.text_primary
                    );
                }
            }
        }

        write_srt(&cues, mode, output_path).await?;

        info!("Completed: {}", output_path.display());
        Ok(FileOutcome::Written)
    }

    /// Translate every cue in order, applying the exhaustion policy.
    async fn translate_cues(&self, cues: &mut [Cue], translator: &mut dyn Translator) -> Result<()> {
        let total = cues.len();

        for idx in 0..total {
            info!("┌─ Translating cue {}/{} ────────", idx + 1, total);
            info!("│ Source: {}", cues[idx].text_primary);

            match translator.translate(&cues[idx].text_primary).await {
                Ok(translation) => {
                    info!("│ Target: {}", translation);
                    info!("└─────────────────────────────────────");
                    cues[idx].text_secondary = Some(translation);
                }
                Err(BisubError::TranslationExhausted(attempts)) => {
                    warn!("│ Exhausted after {} attempts", attempts);
                    warn!("└─────────────────────────────────────");

                    match self.config.translate.policy {
                        TranslationPolicy::DegradeToSentinel => {
                            warn!("Switching to no-translation mode for the rest of this run");
                            translator.disable();
                            // The finished file must be uniform: cues
                            // translated before the failure fall back to the
                            // sentinel as well.
                            for cue in cues[..=idx].iter_mut() {
                                cue.text_secondary = Some(NO_TRANSLATION.to_string());
                            }
                        }
                        TranslationPolicy::Strict | TranslationPolicy::AbortOnExhaustion => {
                            return Err(BisubError::TranslationExhausted(attempts));
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Process every audio file under `input_dir`, mirroring its layout
    /// below `output_dir`.
    pub async fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        mode: OutputMode,
    ) -> Result<BatchSummary> {
        info!("Processing directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(BisubError::Config("input path is not a directory".to_string()));
        }
        fs::create_dir_all(output_dir).await?;

        let mut audio_files = Vec::new();
        for entry in WalkDir::new(input_dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(extension) = entry.path().extension().and_then(|e| e.to_str()) {
                if AUDIO_EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
                    audio_files.push(entry.path().to_path_buf());
                }
            }
        }
        audio_files.sort();

        info!("Found {} audio files to process", audio_files.len());

        let progress = ProgressBar::new(audio_files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut summary = BatchSummary::default();
        for audio_path in &audio_files {
            if let Some(name) = audio_path.file_name() {
                progress.set_message(name.to_string_lossy().into_owned());
            }

            let output_path = output_path_for(audio_path, input_dir, output_dir);
            match self.process_file(audio_path, &output_path, mode).await {
                Ok(FileOutcome::Written) => {
                    summary.written += 1;
                    info!("Successfully processed: {}", audio_path.display());
                }
                Ok(FileOutcome::Skipped) => {
                    summary.skipped += 1;
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", audio_path.display(), e);
                    summary.failed += 1;

                    let strict = self.config.translate.policy == TranslationPolicy::Strict;
                    if strict && matches!(e, BisubError::TranslationExhausted(_)) {
                        progress.finish_and_clear();
                        return Err(e);
                    }
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Batch complete: {} written, {} skipped, {} failed",
            summary.written, summary.skipped, summary.failed
        );
        Ok(summary)
    }
}

/// Mirror the input-relative path under the output directory, with the
/// `.srt` extension.
fn output_path_for(audio_path: &Path, input_dir: &Path, output_dir: &Path) -> PathBuf {
    let relative = pathdiff::diff_paths(audio_path, input_dir)
        .unwrap_or_else(|| PathBuf::from(audio_path.file_name().unwrap_or_default()));
    output_dir.join(relative).with_extension("srt")
}
