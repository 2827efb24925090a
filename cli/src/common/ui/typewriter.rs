//! # Typewriter Output
//!
//! File: cli/src/common/ui/typewriter.rs
//!
//! Prints text one character at a time with a fixed pause between characters,
//! giving answers a "being typed" feel. The pause blocks the calling thread;
//! a zero delay prints immediately and never sleeps.
//!
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Default pause between characters for bot output, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 30;

/// Writes `text` character by character, flushing after each one, with no
/// trailing line break.
pub fn type_out<W: Write>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    Ok(())
}

/// Types `text` and then ends the line.
pub fn type_line<W: Write>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    type_out(out, text, delay)?;
    writeln!(out)?;
    out.flush()
}
