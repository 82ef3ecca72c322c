// Command-line interface definitions for vibevox
//
// This module is separate so it can be used by both the binary (main.rs)
// and build.rs for generating the man page.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "vibevox")]
#[command(author, version, about = "Verbatim voice transcription for the terminal")]
#[command(after_help = "\
EXAMPLES:
  vibevox                    Interactive mode with the base model
  vibevox -m large-v3        Use a large model for better accuracy
  vibevox -1 -c              Single recording, copy to clipboard
  vibevox -q | pbcopy        Quiet mode, pipe to clipboard (macOS)
  vibevox -o transcript.txt  Append transcriptions to a file
  vibevox -l en              Force English (skip auto-detection)
")]
pub struct Cli {
    /// Path to config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// Whisper model size (tiny, base, small, medium, large, large-v2, large-v3)
    #[arg(short, long, value_name = "SIZE")]
    pub model: Option<String>,

    /// Force language (e.g. en, es, fr); auto-detect when omitted
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Append transcription to a file instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<std::path::PathBuf>,

    /// Copy transcription to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Single recording, then exit
    #[arg(short = '1', long)]
    pub once: bool,

    /// Output only the transcription (no prompts or banners)
    #[arg(short, long)]
    pub quiet: bool,

    /// Include segment timestamps in the output
    #[arg(long)]
    pub timestamps: bool,

    /// Include word-level timestamps in the result
    #[arg(long)]
    pub word_timestamps: bool,

    /// Audio input device ("default" uses the system default)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Show available audio input devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
