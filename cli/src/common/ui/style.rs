//! # Styled Output
//!
//! File: cli/src/common/ui/style.rs
//!
//! ## Overview
//!
//! Console color is process-wide state, so instead of setting and resetting it
//! by hand at every call site, output is written through a `StyleGuard`. The
//! guard sets the foreground color when it is created and queues a color reset
//! when it is dropped, which means the terminal returns to the neutral style on
//! every exit path, including `?` early returns.
//!
//! Colors come from `crossterm` and are written as ANSI sequences into whatever
//! `Write` the caller supplies, so the same code drives the real terminal and
//! the in-memory buffers used by tests. A `Palette` with color disabled makes
//! the guard a plain pass-through.
//!
//! ```rust
//! let palette = Palette::new(true);
//! let mut out = palette.styled(&mut stdout, Style::Error)?;
//! writeln!(out, "Audio file not found: intro.wav")?;
//! // color reset happens here, when `out` goes out of scope
//! ```
//!
use crossterm::{
    queue,
    style::{Color, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

/// The visual groups used by the chatbot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Title banner.
    Banner,
    /// Welcome box.
    Welcome,
    /// Help summary list.
    Help,
    /// The user's input prompt.
    Prompt,
    /// Bot answers and the closing message.
    Bot,
    /// Error lines.
    Error,
    /// Divider rules.
    Rule,
    /// Divider titles.
    RuleTitle,
}

impl Style {
    pub fn color(self) -> Color {
        match self {
            Style::Banner => Color::Magenta,
            Style::Welcome => Color::Cyan,
            Style::Help => Color::DarkCyan,
            Style::Prompt => Color::White,
            Style::Bot => Color::Green,
            Style::Error => Color::Red,
            Style::Rule => Color::DarkGrey,
            Style::RuleTitle => Color::Grey,
        }
    }
}

/// Decides whether styles are emitted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Switches `out` to `style` until the returned guard is dropped.
    pub fn styled<'a, W: Write>(&self, out: &'a mut W, style: Style) -> io::Result<StyleGuard<'a, W>> {
        if self.enabled {
            queue!(out, SetForegroundColor(style.color()))?;
        }
        Ok(StyleGuard {
            out,
            active: self.enabled,
        })
    }

    /// Writes `text` in `style` and returns to the neutral style.
    pub fn write<W: Write>(&self, out: &mut W, style: Style, text: &str) -> io::Result<()> {
        let mut guard = self.styled(out, style)?;
        guard.write_all(text.as_bytes())?;
        guard.finish()
    }

    /// Writes `text` plus a line break in `style`.
    pub fn writeln<W: Write>(&self, out: &mut W, style: Style, text: &str) -> io::Result<()> {
        let mut guard = self.styled(out, style)?;
        writeln!(guard, "{}", text)?;
        guard.finish()
    }
}

/// Scoped foreground color. Resets the color when dropped.
pub struct StyleGuard<'a, W: Write> {
    out: &'a mut W,
    active: bool,
}

impl<W: Write> StyleGuard<'_, W> {
    /// Switches to another style without leaving the guard.
    pub fn restyle(&mut self, style: Style) -> io::Result<()> {
        if self.active {
            queue!(self.out, SetForegroundColor(style.color()))?;
        }
        Ok(())
    }

    /// Resets the color and flushes, reporting any error the drop would swallow.
    pub fn finish(mut self) -> io::Result<()> {
        self.reset()?;
        self.out.flush()
    }

    fn reset(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            queue!(self.out, ResetColor)?;
        }
        Ok(())
    }
}

impl<W: Write> Write for StyleGuard<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for StyleGuard<'_, W> {
    fn drop(&mut self) {
        // Nowhere to report a failed reset from a destructor.
        let _ = self.reset();
        let _ = self.out.flush();
    }
}
