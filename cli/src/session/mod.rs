//! # CyberGuardian Chat Session
//!
//! File: cli/src/session/mod.rs
//!
//! ## Overview
//!
//! The chatbot itself: what it knows, how it answers a turn, and the order in
//! which a session unfolds.
//!
//! - `responses`: The immutable, case-insensitive question/answer table
//! - `chat_loop`: Turn classification and the prompt/response loop
//! - `driver`: `ChatSession`, which sequences banner, audio, greeting, chat, and goodbye
//!
//! ```rust
//! let config = config::load_config(None, &ConfigOverrides::default())?;
//! let player = SystemPlayer::new(config.audio.player.as_deref());
//! let stdin = io::stdin();
//! let mut session = ChatSession::new(config, Box::new(player), stdin.lock(), io::stdout())?;
//! session.run()?;
//! ```
//!

pub mod chat_loop;
pub mod driver;
pub mod responses;

pub use driver::ChatSession;
