//! Solace CLI
//!
//! Usage:
//!   solace --text "journal entry"                 # Single text analysis
//!   solace --wav clip.wav                         # Voice sample analysis
//!   solace --wav clip.wav --transcribe            # Transcribe, then analyze both
//!   solace --interactive                          # Journal lines from stdin
//!   solace --serve                                # HTTP API server
//!   solace --text "..." --json                    # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

use solace::config::Config;
use solace::core::{
    read_wav, representative_tag, run_server, TranscriptionClient, WellnessPipeline,
};
use solace::types::{JournalReport, SentimentTag, VoiceMetrics, VoiceReport};
use solace::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "solace",
    version = VERSION,
    about = "Solace - local voice and journal analysis with a safety firewall",
    long_about = "Solace analyses journal text and voice samples locally.\n\n\
                  Text is tagged against keyword dictionaries, voice samples are\n\
                  reduced to pitch/energy variance and speaking rate, and both\n\
                  feed a stress score. A safety firewall runs before any\n\
                  suggestion step and can force a CRISIS response.\n\n\
                  This tool does not diagnose anything."
)]
struct Args {
    /// Journal text to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// WAV file to analyze
    #[arg(short, long)]
    wav: Option<PathBuf>,

    /// With --wav: transcribe the recording and analyze the transcript too
    #[arg(long)]
    transcribe: bool,

    /// Interactive mode - read journal lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Opt in to remote suggestions (needs [suggestions].endpoint)
    #[arg(long)]
    remote: bool,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSONL record store (overrides config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show tag triggers and stress signals
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("solace=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                error!(path = %path.display(), error = %e, "cannot load config");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(store) = &args.store {
        config.store.path = Some(store.clone());
    }
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }

    let pipeline = Arc::new(WellnessPipeline::from_config(&config));

    let result = if args.serve {
        run_server(&config.server.addr, pipeline).await
    } else if let Some(path) = &args.wav {
        run_wav(path, &args, &config, &pipeline).await
    } else if let (Some(text), false) = (&args.text, args.interactive) {
        run_single(text, &args, &pipeline).await;
        Ok(())
    } else {
        run_interactive(&args, &pipeline).await;
        Ok(())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "solace failed");
            ExitCode::FAILURE
        }
    }
}

/// Run single text evaluation
async fn run_single(text: &str, args: &Args, pipeline: &WellnessPipeline) {
    let report = pipeline.analyze_text(text, None, args.remote).await;
    print_journal(&report, args);
}

/// Analyze a WAV file, optionally transcribing it first
async fn run_wav(
    path: &Path,
    args: &Args,
    config: &Config,
    pipeline: &WellnessPipeline,
) -> solace::Result<()> {
    let audio = read_wav(path)?;
    let voice = pipeline.analyze_voice(&audio.samples, audio.sample_rate, None);
    print_voice(&voice, args);

    if !args.transcribe {
        return Ok(());
    }

    let Some(client) = TranscriptionClient::from_config(&config.transcription) else {
        println!("{}", "No [transcription].endpoint configured; skipping transcript.".yellow());
        return Ok(());
    };

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let text = client.transcribe(bytes, &file_name).await;
    if text.is_empty() {
        println!("{}", "(no speech recognised)".dimmed());
        return Ok(());
    }

    if !args.json {
        println!("{} {}", "transcript:".dimmed(), text);
    }
    let report = pipeline.analyze_text(&text, Some(&voice.metrics), args.remote).await;
    print_journal(&report, args);
    Ok(())
}

/// Interactive journal mode
async fn run_interactive(args: &Args, pipeline: &WellnessPipeline) {
    print_header();
    println!("Write a journal line and press Enter. Type 'quit' to exit.");
    println!("Type '/voice <file.wav>' to attach a voice sample to the next entries.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::default();

    loop {
        print!("{}", "journal> ".dimmed());
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Entries: {}", session.entries);
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Some(path) = line.strip_prefix("/voice") {
            match read_wav(Path::new(path.trim())) {
                Ok(audio) => {
                    let voice = session.voice(pipeline, &audio.samples, audio.sample_rate);
                    print_voice(&voice, args);
                }
                Err(e) => println!("{} {}", "voice:".red(), e),
            }
            continue;
        }

        let report = session.entry(pipeline, line, args.remote).await;
        print_journal(&report, args);
    }
}

/// Interactive state, passed to every call explicitly
#[derive(Debug, Default)]
struct Session {
    last_voice: Option<VoiceMetrics>,
    /// Latest journal tag; applies to every recording until the next entry
    last_tag: Option<SentimentTag>,
    entries: usize,
}

impl Session {
    fn voice(&mut self, pipeline: &WellnessPipeline, samples: &[f32], sample_rate: u32) -> VoiceReport {
        let report = pipeline.analyze_voice(samples, sample_rate, self.last_tag);
        self.last_voice = Some(report.metrics);
        report
    }

    async fn entry(&mut self, pipeline: &WellnessPipeline, text: &str, remote: bool) -> JournalReport {
        let report = pipeline.analyze_text(text, self.last_voice.as_ref(), remote).await;
        self.entries += 1;
        self.last_tag = Some(representative_tag(&report.analysis));
        report
    }
}

fn print_journal(report: &JournalReport, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "cannot serialize report"),
        }
        return;
    }

    if args.no_color {
        println!("{}", report.to_parseable_string());
    } else {
        println!("{}", report.to_terminal_string());
    }

    if args.verbose {
        for (tag, words) in &report.analysis.triggers {
            println!("  {:<11} {}", format!("{}:", tag).dimmed(), words.join(", "));
        }
        if !report.analysis.stress_signals.is_empty() {
            println!(
                "  {} {}",
                "signals:".dimmed(),
                report.analysis.stress_signals.join(", ")
            );
        }
        println!("  {} {}", "reason:".dimmed(), report.safety.code);
    }
}

fn print_voice(report: &VoiceReport, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "cannot serialize report"),
        }
    } else if args.no_color {
        println!("{}", report.to_parseable_string());
    } else {
        println!("{}", report.to_terminal_string());
    }
}

fn print_header() {
    println!("{}", "╔══════════════════════════════════════╗".green());
    println!("{}", format!("║  Solace {:<29}║", VERSION).green());
    println!("{}", "╚══════════════════════════════════════╝".green());
    println!();
}
