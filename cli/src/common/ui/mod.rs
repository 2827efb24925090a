//! # CyberGuardian UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Everything the chatbot draws on the terminal goes through this module.
//!
//! ## Architecture
//!
//! - **`style`**: The `Palette` and the scoped `StyleGuard` that sets a
//!   foreground color and always restores the neutral style.
//! - **`typewriter`**: Character-by-character output with a per-character delay.
//! - **`layout`**: Banner, welcome box, dividers, help summary, and error lines.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui::{layout, style::Palette, typewriter};
//!
//! let palette = Palette::new(true);
//! layout::render_divider(&mut out, palette, "Chat Help")?;
//! typewriter::type_line(&mut out, "CyberGuardian: Hello!", Duration::from_millis(typewriter::DEFAULT_DELAY_MS))?;
//! layout::display_error(&mut out, palette, "Audio file not found: intro.wav")?;
//! ```
//!

pub mod layout;
pub mod style;
pub mod typewriter;
