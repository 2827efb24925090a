//! # Screen Layout Helpers
//!
//! File: cli/src/common/ui/layout.rs
//!
//! ## Overview
//!
//! The fixed pieces of the CyberGuardian screen:
//! - **Banner**: large-text title framed by `═` rules as wide as the art, with a
//!   tagline underneath.
//! - **Welcome box**: a `*` border sized to the longest line, each row typed out.
//! - **Divider**: a titled section break between phases of the session.
//! - **Help summary**: the list of topics the bot can answer.
//! - **Error line**: a single red line used for every user-facing failure.
//!
//! Every function takes the output and a `Palette` explicitly and returns to the
//! neutral style before it returns, so no color state leaks between sections.
//! Widths are counted in characters, not bytes, so non-ASCII names still get a
//! square box.
//!
use super::style::{Palette, Style};
use super::typewriter;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

/// Large-text rendering of the default bot name.
pub const CYBERGUARDIAN_ART: &str = r#"  ____         _                   ____                          _  _
 / ___| _   _ | |__    ___  _ __  / ___| _   _   __ _  _ __   __| |(_)  __ _  _ __
| |    | | | || '_ \  / _ \| '__|| |  _ | | | | / _` || '__| / _` || | / _` || '_ \
| |___ | |_| || |_) ||  __/| |   | |_| || |_| || (_| || |   | (_| || || (_| || | | |
 \____| \__, ||_.__/  \___||_|    \____| \__,_| \__,_||_|    \__,_||_| \__,_||_| |_|
        |___/"#;

const BANNER_RULE: char = '═';
const BOX_BORDER: char = '*';
const DIVIDER_WIDTH: usize = 40;
const HELP_RULE_WIDTH: usize = 30;

/// Width of a string in characters.
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Picks the banner art for a title: the large-text art for the default bot
/// name, the title itself otherwise.
pub fn banner_art(title: &str) -> &str {
    if title.trim().eq_ignore_ascii_case("CyberGuardian") {
        CYBERGUARDIAN_ART
    } else {
        title
    }
}

/// Draws the title banner. Clears the screen first when `clear` is set.
pub fn render_banner<W: Write>(
    out: &mut W,
    palette: Palette,
    title: &str,
    tagline: &str,
    clear: bool,
) -> io::Result<()> {
    if clear {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }

    let art = banner_art(title);
    let width = art.lines().map(text_width).max().unwrap_or(0);
    let rule = BANNER_RULE.to_string().repeat(width);

    let mut out = palette.styled(out, Style::Banner)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", art)?;
    writeln!(out, "{}", rule)?;
    if !tagline.is_empty() {
        writeln!(out, "      {}", tagline)?;
        writeln!(out, "{}", rule)?;
    }
    out.finish()
}

/// Draws a `*`-bordered box around `lines`, typing each row at `delay`.
pub fn render_box<W: Write>(
    out: &mut W,
    palette: Palette,
    lines: &[String],
    delay: Duration,
) -> io::Result<()> {
    let inner = lines.iter().map(|l| text_width(l)).max().unwrap_or(0);
    let border = BOX_BORDER.to_string().repeat(inner + 6);

    let mut out = palette.styled(out, Style::Welcome)?;
    writeln!(out)?;
    writeln!(out, "{}", border)?;
    for line in lines {
        let padded = format!("{:<width$}", line, width = inner);
        write!(out, "{}  ", BOX_BORDER)?;
        typewriter::type_out(&mut out, &padded, delay)?;
        writeln!(out, "  {}", BOX_BORDER)?;
    }
    writeln!(out, "{}", border)?;
    out.finish()
}

/// The three welcome lines for `user_name`, greeted by `bot_name`.
pub fn welcome_lines(user_name: &str, bot_name: &str) -> Vec<String> {
    vec![
        format!("Welcome, {}!", user_name),
        format!("I'm {}, your cybersecurity companion.", bot_name),
        "Ask me anything about staying safe online.".to_string(),
    ]
}

/// Draws a titled section break.
pub fn render_divider<W: Write>(out: &mut W, palette: Palette, title: &str) -> io::Result<()> {
    let rule = "-".repeat(DIVIDER_WIDTH);
    let mut out = palette.styled(out, Style::Rule)?;
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    out.restyle(Style::RuleTitle)?;
    writeln!(out, "[ {} ]", title)?;
    out.restyle(Style::Rule)?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    out.finish()
}

/// Prints the "Chat Help" section listing `topics`.
pub fn render_help<W: Write>(out: &mut W, palette: Palette, topics: &[String]) -> io::Result<()> {
    render_divider(out, palette, "Chat Help")?;
    let mut out = palette.styled(out, Style::Help)?;
    writeln!(out, "You can ask about:")?;
    for topic in topics {
        writeln!(out, " - {}", topic)?;
    }
    writeln!(out, "Type 'exit' to leave the chat.")?;
    writeln!(out, "{}", "-".repeat(HELP_RULE_WIDTH))?;
    writeln!(out)?;
    out.finish()
}

/// Prints `message` as a red error line.
pub fn display_error<W: Write>(out: &mut W, palette: Palette, message: &str) -> io::Result<()> {
    palette.writeln(out, Style::Error, message)
}
