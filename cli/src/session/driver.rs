//! # Chat Session Driver
//!
//! File: cli/src/session/driver.rs
//!
//! ## Overview
//!
//! `ChatSession` owns one run of the chatbot from banner to goodbye. It is
//! built from a `Config`, an `AudioPlayer`, and the input and output streams,
//! which keeps the whole sequence drivable from tests with in-memory buffers.
//!
//! ## Sequence
//!
//! 1. Banner (optionally clearing the screen first)
//! 2. Introductory audio clip. Failures are shown in red and skipped.
//! 3. Name prompt
//! 4. Welcome box
//! 5. Help summary
//! 6. Q&A loop (see `chat_loop`)
//! 7. Closing message, then an optional "Press Enter" pause
//!
//! Any other failure along the way is reported once, as
//! `An unexpected error occurred: ...`, and returned to the caller, which ends
//! the process.
//!
use super::chat_loop::{read_line, ChatLoop, SessionState};
use super::responses::ResponseTable;
use crate::common::audio::{self, AudioPlayer};
use crate::common::ui::{
    layout,
    style::{Palette, Style},
    typewriter,
};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::{debug, error, info, warn};

/// Prompt shown before the user's name is read.
pub const NAME_PROMPT: &str = "Please enter your name: ";

/// One complete chatbot run over the given input and output.
pub struct ChatSession<R: BufRead, W: Write> {
    config: Config,
    table: ResponseTable,
    palette: Palette,
    player: Box<dyn AudioPlayer>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ChatSession<R, W> {
    /// Builds a session. Fails if the configured responses do not form a valid table.
    pub fn new(config: Config, player: Box<dyn AudioPlayer>, input: R, output: W) -> Result<Self> {
        let table = config.response_table()?;
        let palette = Palette::new(config.display.color);
        Ok(Self {
            config,
            table,
            palette,
            player,
            input,
            output,
        })
    }

    /// Runs the whole session, reporting any failure on the output before
    /// returning it.
    pub fn run(&mut self) -> Result<()> {
        let result = self.run_sequence();
        if let Err(e) = &result {
            error!("Session failed: {:?}", e);
            let message = format!("An unexpected error occurred: {:#}", e);
            if let Err(report_err) = layout::display_error(&mut self.output, self.palette, &message) {
                warn!("Could not report session failure: {}", report_err);
            }
        }
        result
    }

    /// Consumes the session and hands back the output stream.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn run_sequence(&mut self) -> Result<()> {
        layout::render_banner(
            &mut self.output,
            self.palette,
            &self.config.bot_name,
            &self.config.tagline,
            self.config.display.clear_screen,
        )
        .context("Failed to draw banner")?;

        self.play_intro_clip()?;

        let user_name = self.ask_name()?;
        let mut state = SessionState::new(user_name);

        layout::render_box(
            &mut self.output,
            self.palette,
            &layout::welcome_lines(&state.user_name, &self.config.bot_name),
            self.config.welcome_delay(),
        )
        .context("Failed to draw welcome message")?;

        layout::render_help(&mut self.output, self.palette, &self.config.help_topics)
            .context("Failed to draw help summary")?;

        let chat = ChatLoop {
            table: &self.table,
            bot_name: &self.config.bot_name,
            palette: self.palette,
            delay: self.config.typing_delay(),
        };
        let answered = chat.run(&mut state, &mut self.input, &mut self.output)?;
        info!("Chat ended after {} answered questions", answered);

        self.say_goodbye(&state)
    }

    /// Plays the configured clip. Audio problems are shown and never propagated.
    fn play_intro_clip(&mut self) -> Result<()> {
        if !self.config.audio.enabled {
            info!("Audio disabled, skipping introductory clip");
            return Ok(());
        }
        let Some(clip) = self.config.audio.clip.as_deref() else {
            debug!("No introductory clip configured");
            return Ok(());
        };

        if let Err(e) = audio::play_intro(self.player.as_ref(), clip) {
            warn!("Introductory clip skipped: {}", e);
            layout::display_error(&mut self.output, self.palette, &e.to_string())?;
        }
        Ok(())
    }

    fn ask_name(&mut self) -> Result<String> {
        write!(self.output, "{}", NAME_PROMPT)?;
        self.output.flush()?;
        let name = read_line(&mut self.input)
            .context("Failed to read user name")?
            .unwrap_or_default();
        Ok(name.trim().to_string())
    }

    fn say_goodbye(&mut self, state: &SessionState) -> Result<()> {
        let palette = self.palette;
        let delay = self.config.typing_delay();
        let pause = self.config.display.pause_on_exit;

        layout::render_divider(&mut self.output, palette, "Session Ended")?;
        {
            let mut out = palette.styled(&mut self.output, Style::Bot)?;
            typewriter::type_line(
                &mut out,
                &format!(
                    "\nThank you for using {}, {}!",
                    self.config.bot_name, state.user_name
                ),
                delay,
            )?;
            let farewell = if pause {
                "Stay safe, stay smart. Press Enter to exit."
            } else {
                "Stay safe, stay smart."
            };
            typewriter::type_line(&mut out, farewell, delay)?;
            out.finish()?;
        }

        if pause {
            // End of input counts as the key press.
            read_line(&mut self.input).context("Failed to read final key press")?;
        }
        Ok(())
    }
}
