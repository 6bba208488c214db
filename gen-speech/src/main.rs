//! gen-speech - Convert a text file to speech with a remote TTS service

mod audio;
mod config;
mod error;
mod input;
mod pipeline;
mod text;
mod tts;

use anyhow::{Context, Result};
use audio::FfmpegMerger;
use clap::{Parser, Subcommand};
use config::GenSpeechConfig;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use pipeline::Pipeline;
use speech_client::SpeechSettings;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tts::Synthesizer;

#[derive(Parser, Debug)]
#[command(name = "gen-speech")]
#[command(about = "Convert a text file to speech using a remote TTS service", long_about = None)]
#[command(version)]
struct Args {
    /// Text file to convert, relative to the working directory
    #[arg(short, long, default_value = input::DEFAULT_INPUT)]
    input: PathBuf,

    /// Working directory for temporary segments and the output file
    #[arg(short = 'C', long, default_value = ".")]
    dir: PathBuf,

    /// Keep temporary segments if the run aborts
    #[arg(long)]
    keep_partial: bool,

    /// Show how the text would be chunked without calling the service
    #[arg(long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the speech API base URL
    SetBaseUrl {
        /// URL, e.g. https://api.openai.com/v1
        url: String,
    },
    /// Set the FFmpeg binary used for merging
    SetFfmpeg {
        /// Path to the ffmpeg executable
        path: PathBuf,
    },
    /// Set whether partial segments are kept after a failed run
    SetKeepPartial {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    let input_path = args.dir.join(&args.input);
    let text = input::load_input(&input_path)?;

    if args.dry_run {
        print_plan(&text);
        return Ok(());
    }

    let config = GenSpeechConfig::load().context("Failed to load configuration")?;
    let settings = SpeechSettings::default();
    let keep_partial = args.keep_partial || config.keep_partial;

    debug!("Input: {}", input_path.display());
    debug!("Working directory: {}", args.dir.display());
    debug!(
        "Model: {}, voice: {}, format: {}",
        settings.model, settings.voice, settings.format
    );

    // Build the client once; every chunk goes through it.
    let provider = speech_client::get_provider(&config.provider)?;
    let synthesizer = Synthesizer::new(Arc::from(provider), settings);
    synthesizer.check()?;
    info!("Using {} speech provider", synthesizer.provider_name());

    let merger = Arc::new(FfmpegMerger::new(config.ffmpeg.clone()));
    let pipeline = Pipeline::new(synthesizer, merger, &args.dir).keep_partial(keep_partial);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let result = pipeline
        .convert(&text, |progress| {
            pb.set_length(progress.total_chunks as u64);
            pb.set_position(progress.completed as u64);
            pb.set_message(format!(
                "{}/{} chars",
                progress.chars_sent, progress.total_chars
            ));
        })
        .await;
    pb.finish_and_clear();

    let output = result?;
    println!("Done: {}", output.display());

    Ok(())
}

/// Print the chunking plan for `--dry-run`.
fn print_plan(text: &str) {
    let plan = Pipeline::plan(text);

    println!(
        "{} characters, {} sentences, {} chunks (limit {} characters)",
        plan.total_chars,
        plan.sentences,
        plan.chunks.len(),
        text::INPUT_LIMIT
    );
    for chunk in &plan.chunks {
        println!("  chunk #{}: {} characters", chunk.index, chunk.char_len());
    }
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = GenSpeechConfig::load()?;
            println!("Configuration file: {:?}", GenSpeechConfig::config_path()?);
            println!();
            if config.provider.api_key.is_some() {
                println!("provider.api_key = (set)");
            } else {
                println!(
                    "provider.api_key = (from {})",
                    speech_client::providers::OPENAI_API_KEY_ENV
                );
            }
            println!("provider.base_url = \"{}\"", config.provider.base_url());
            if let Some(ffmpeg) = &config.ffmpeg {
                println!("ffmpeg = \"{}\"", ffmpeg.display());
            } else {
                println!("ffmpeg = (search PATH)");
            }
            println!("keep_partial = {}", config.keep_partial);
        }
        ConfigAction::SetBaseUrl { url } => {
            let mut config = GenSpeechConfig::load()?;
            config.provider.base_url = Some(url.trim_end_matches('/').to_string());
            config.save()?;
            println!("Base URL set to: {}", config.provider.base_url());
        }
        ConfigAction::SetFfmpeg { path } => {
            let mut config = GenSpeechConfig::load()?;
            config.ffmpeg = Some(path.clone());
            config.save()?;
            println!("FFmpeg binary set to: {}", path.display());
        }
        ConfigAction::SetKeepPartial { value } => {
            let mut config = GenSpeechConfig::load()?;
            config.keep_partial = *value;
            config.save()?;
            println!("keep_partial set to: {}", value);
        }
    }
    Ok(())
}
