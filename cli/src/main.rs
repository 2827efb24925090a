//! # CyberGuardian Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the CyberGuardian chatbot.
//! It handles:
//! - Command-line option parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration and starting one chat session
//!
//! There are no subcommands: every run is a single interactive session. The
//! options only inject configuration (audio clip, typing speed, colors) and
//! never change what the session does.
//!
//! ## Examples
//!
//! ```bash
//! # Chat with the defaults
//! cyberguardian
//!
//! # Play a greeting first, type faster, and log what happens
//! cyberguardian --audio ~/sounds/greeting.wav --typing-delay 10 -vv
//! ```
//!
//! Startup flow:
//! 1. Parse options via Clap
//! 2. Configure logging (stderr) based on verbosity level
//! 3. Load and validate the layered configuration
//! 4. Run the session; a failure has already been shown in red, so only the
//!    exit status is set here
//!
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod common; // Terminal output and audio playback
mod core; // Configuration and error types
mod session; // The chatbot itself

use crate::common::audio::SystemPlayer;
use crate::common::ui::{layout, style::Palette};
use crate::core::config::{self, Config, ConfigOverrides};
use crate::session::ChatSession;

/// Top-level command-line options.
#[derive(Parser, Debug)]
#[command(
    name = "cyberguardian",
    about = "CyberGuardian: your console guide to staying safe online",
    long_about = "Starts an interactive chat that answers basic cybersecurity questions.\n\
                  Type 'exit' at the prompt to leave.",
    version
)]
struct Cli {
    /// Read settings from this TOML file instead of the user and project files.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Introductory audio clip to play before the chat starts.
    #[arg(long, value_name = "PATH")]
    audio: Option<PathBuf>,

    /// Skip the introductory audio clip.
    #[arg(long)]
    no_audio: bool,

    /// Milliseconds between typed characters (0 prints instantly).
    #[arg(long, value_name = "MS")]
    typing_delay: Option<u64>,

    /// Print without colors.
    #[arg(long)]
    no_color: bool,

    /// Exit right after the goodbye message instead of waiting for Enter.
    #[arg(long)]
    no_pause: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            audio_clip: self.audio.clone(),
            no_audio: self.no_audio,
            typing_delay_ms: self.typing_delay,
            no_color: self.no_color,
            no_pause: self.no_pause,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let mut config = match config::load_config(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {:?}", e);
            report_startup_error(
                !cli.no_color && io::stdout().is_terminal(),
                &format!("{:#}", e),
            );
            std::process::exit(1);
        }
    };

    apply_terminal(&mut config, io::stdout().is_terminal());

    let player = SystemPlayer::new(config.audio.player.as_deref());
    let color = config.display.color;
    let stdin = io::stdin();
    let mut session = match ChatSession::new(config, Box::new(player), stdin.lock(), io::stdout()) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Session setup failed: {:?}", e);
            report_startup_error(color, &format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if session.run().is_err() {
        // Already reported on stdout by the session.
        std::process::exit(1);
    }
    tracing::info!("Session finished");
}

/// Turns off colors and screen clearing when stdout is not a terminal.
fn apply_terminal(config: &mut Config, stdout_is_terminal: bool) {
    if !stdout_is_terminal {
        tracing::debug!("stdout is not a terminal, disabling colors and screen clearing");
        config.display.color = false;
        config.display.clear_screen = false;
    }
}

/// Shows a failure that happened before a session existed.
fn report_startup_error(color: bool, message: &str) {
    let mut stdout = io::stdout();
    let text = format!("An unexpected error occurred: {}", message);
    if let Err(e) = layout::display_error(&mut stdout, Palette::new(color), &text) {
        eprintln!("Error: {} ({})", message, e);
    }
}
