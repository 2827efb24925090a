//! # CyberGuardian Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities that sit between the session logic (`session::`) and the
//! operating system's terminal and audio devices:
//!
//! - **`audio`**: Plays the introductory clip through a system audio player.
//! - **`ui`**: Colors, typewriter output, and the fixed screen sections.
//!

/// Introductory clip playback via system audio players.
pub mod audio;
/// Terminal output: styles, typewriter effect, banner/box/divider layout.
pub mod ui;
