//! # Interactive Q&A Loop
//!
//! File: cli/src/session/chat_loop.rs
//!
//! ## Overview
//!
//! One turn of the conversation is: show the prompt, read a line, answer it.
//! Each line the user enters is classified into one of four outcomes:
//!
//! | Input (after trimming)         | Outcome          | Output                          |
//! |--------------------------------|------------------|---------------------------------|
//! | `exit`, any casing             | `ExitRequested`  | nothing; the loop ends          |
//! | empty or whitespace only       | `Unclear`        | red "didn't understand" line    |
//! | a question in the table        | `AnswerFound`    | `<bot>: <answer>`, typed, green |
//! | anything else                  | `AnswerNotFound` | `<bot>: <fallback>`, typed      |
//!
//! The exit check happens before any lookup, so a table entry named `exit`
//! can never shadow the exit command. End of input also ends the loop.
//!
use super::responses::ResponseTable;
use crate::common::ui::{
    layout,
    style::{Palette, Style},
    typewriter,
};
use crate::core::error::Result;
use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::{debug, info};

/// Typing this (case-insensitively) leaves the chat.
pub const EXIT_COMMAND: &str = "exit";

/// Shown for blank input.
pub const CLARIFY_MESSAGE: &str = "I didn't quite understand that. Could you rephrase?";

/// Answer for questions the table does not know.
pub const FALLBACK_ANSWER: &str =
    "I'm still learning! Try asking about cybersecurity topics like phishing or password safety.";

/// How a single line of user input is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn<'a> {
    ExitRequested,
    Unclear,
    AnswerFound(&'a str),
    AnswerNotFound,
}

/// Decides what to do with one line of input.
pub fn classify<'a>(table: &'a ResponseTable, input: &str) -> Turn<'a> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case(EXIT_COMMAND) {
        return Turn::ExitRequested;
    }
    if trimmed.is_empty() {
        return Turn::Unclear;
    }
    match table.lookup(trimmed) {
        Some(answer) => Turn::AnswerFound(answer),
        None => Turn::AnswerNotFound,
    }
}

/// Reads one line without its line ending. `None` at end of input.
///
/// Bytes that are not valid UTF-8 become U+FFFD.
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut raw = Vec::new();
    if input.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&raw);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Per-session state: who is chatting and whether the loop should continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user_name: String,
    running: bool,
}

impl SessionState {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

/// The prompt/response loop, borrowing what it needs from the session.
pub struct ChatLoop<'a> {
    pub table: &'a ResponseTable,
    pub bot_name: &'a str,
    pub palette: Palette,
    pub delay: Duration,
}

impl ChatLoop<'_> {
    /// Runs turns until the user exits or input ends. Returns the number of
    /// questions answered (known or not).
    pub fn run<R: BufRead, W: Write>(
        &self,
        state: &mut SessionState,
        input: &mut R,
        out: &mut W,
    ) -> Result<usize> {
        let mut answered = 0;

        while state.is_running() {
            writeln!(out)?;
            self.palette
                .write(out, Style::Prompt, &format!("{}: ", state.user_name))?;

            let line = match read_line(input).context("Failed to read chat input")? {
                Some(line) => line,
                None => {
                    info!("End of input reached, leaving chat");
                    // Keep the goodbye message off the prompt line.
                    writeln!(out)?;
                    state.stop();
                    break;
                }
            };

            let turn = classify(self.table, &line);
            debug!("Turn classified as {:?}", turn);
            match turn {
                Turn::ExitRequested => state.stop(),
                Turn::Unclear => layout::display_error(out, self.palette, CLARIFY_MESSAGE)?,
                Turn::AnswerFound(answer) => {
                    self.say(out, answer)?;
                    answered += 1;
                }
                Turn::AnswerNotFound => {
                    self.say(out, FALLBACK_ANSWER)?;
                    answered += 1;
                }
            }
        }

        Ok(answered)
    }

    fn say<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        let mut out = self.palette.styled(out, Style::Bot)?;
        typewriter::type_line(&mut out, &format!("{}: {}", self.bot_name, text), self.delay)?;
        out.finish()
    }
}
