use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate subtitles for a single audio file
    Process {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output SRT file (defaults to the input path with .srt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output shape: mono or bilingual
        #[arg(long, default_value = "mono")]
        mode: String,
    },

    /// Generate subtitles for every audio file in a directory
    Batch {
        /// Input directory containing audio files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output directory for SRT files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Output shape: mono or bilingual
        #[arg(long, default_value = "mono")]
        mode: String,
    },

    /// Cache translate API credentials in the user home directory
    Credentials {
        /// Translate API app id
        #[arg(long)]
        app_id: String,

        /// Translate API app key
        #[arg(long)]
        app_key: String,
    },
}
