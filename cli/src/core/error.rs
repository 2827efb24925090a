//! # CyberGuardian Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the CyberGuardian chatbot.
//! It follows a two-level approach:
//! - `GuardianError`: A `thiserror` enum for the failures the program knows how
//!   to name (configuration problems, audio problems, bad response tables).
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so that any failure can
//!   carry context on its way up to the session driver.
//!
//! ## Handling Policy
//!
//! Not every error ends the session:
//! - Audio errors (`MissingAudioFile`, `AudioPlayback`, `NoAudioPlayer`) are
//!   caught where playback happens, shown to the user in red, and the session
//!   carries on without the clip.
//! - Blank chat input is not an error at all; the chat loop answers it inline.
//! - Everything else bubbles up to the session driver, which reports
//!   `An unexpected error occurred: ...` and ends the session.
//!
//! ```rust
//! // Checking whether an anyhow error is a specific domain error
//! if let Some(GuardianError::MissingAudioFile { path }) = err.downcast_ref::<GuardianError>() {
//!     println!("No clip at {}", path.display());
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the CyberGuardian application.
#[derive(Error, Debug)]
pub enum GuardianError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio file not found: {}", path.display())]
    MissingAudioFile { path: PathBuf },

    #[error("Audio could not be played: {0}")]
    AudioPlayback(String),

    #[error("Audio could not be played: no audio player was found (tried {tried})")]
    NoAudioPlayer { tried: String },

    #[error("Duplicate response key '{key}' (keys are compared case-insensitively)")]
    DuplicateResponseKey { key: String },

    #[error("Response keys cannot be empty")]
    EmptyResponseKey,
}

/// Type alias for Result using anyhow::Error, so context can be attached anywhere.
pub type Result<T> = anyhow::Result<T>;
