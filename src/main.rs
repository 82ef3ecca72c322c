//! Vibevox - local voice transcription for the terminal
//!
//! Run with `vibevox` to start an interactive recording session.
//! Use `vibevox --list-devices` to enumerate input devices.
//! Use `vibevox -1` to record once, transcribe, and exit.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vibevox::audio;
use vibevox::config;
use vibevox::error::VibevoxError;
use vibevox::output::Emitter;
use vibevox::transcribe::{self, ModelSize};
use vibevox::{Cli, SessionLoop, SessionOptions};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> vibevox::Result<()> {
    // Initialize logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("vibevox={},warn", log_level))),
        )
        .with_target(false)
        .init();

    if cli.list_devices {
        println!("{}", audio::list_devices()?);
        return Ok(());
    }

    // Load configuration and apply CLI overrides
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.whisper.model = model;
    }
    if let Some(language) = cli.language {
        config.whisper.language = language;
    }
    if let Some(device) = cli.device {
        config.audio.device = device;
    }

    // Validate the model name before touching the audio device or network
    let model: ModelSize = config.whisper.model.parse()?;
    let language = if config.whisper.language == "auto" {
        None
    } else {
        Some(config.whisper.language.clone())
    };

    // Ctrl+C ends the run cleanly, whatever the loop is doing
    let quiet = cli.quiet;
    ctrlc::set_handler(move || {
        if !quiet {
            println!("\n\nGoodbye!");
        }
        std::process::exit(0);
    })
    .map_err(|e| {
        VibevoxError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    })?;

    let caps = transcribe::HostCaps::detect();
    let mut backend = transcribe::select_backend(&caps, config.whisper.threads);

    if !cli.quiet {
        println!("Backend: {}", backend.name());
        println!("Model: {}", model);
        println!("Loading model...");
    }
    backend.load_model(model)?;

    let capture = audio::create_capture(&config.audio);
    let emitter = Emitter {
        quiet: cli.quiet,
        timestamps: cli.timestamps || cli.word_timestamps,
        output_file: cli.output,
        copy: cli.copy,
    };

    let options = SessionOptions {
        once: cli.once,
        quiet: cli.quiet,
        language,
        word_timestamps: cli.word_timestamps,
    };

    SessionLoop::new(capture, backend, emitter, options).run()
}
