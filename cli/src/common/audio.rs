//! # CyberGuardian Audio Playback (`common::audio`)
//!
//! File: cli/src/common/audio.rs
//!
//! ## Overview
//!
//! Plays the introductory voice clip before the session starts. Playback is
//! synchronous: `play_intro` returns only after the clip has finished or
//! playback has failed.
//!
//! ## Architecture
//!
//! - **`AudioPlayer`**: The seam the session plays through. The real
//!   implementation is `SystemPlayer`; tests substitute a recording double.
//! - **`SystemPlayer`**: Runs an external player (`aplay`, `paplay`, `afplay`,
//!   PowerShell's `SoundPlayer`, ...) and waits for it to exit. Candidates are
//!   tried in order; a player that is not installed is skipped, and the first
//!   one that exits successfully wins.
//! - **`play_intro`**: Checks that the clip exists, then hands it to the player.
//!
//! Every failure comes back as a `GuardianError` in the audio family
//! (`MissingAudioFile`, `AudioPlayback`, `NoAudioPlayer`). None of them are
//! fatal; the caller shows the message and moves on.
//!
use crate::core::error::GuardianError;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Placeholder replaced by the clip path inside a player's arguments.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// The placeholder inside a single-quoted string. Quotes in the path are
/// doubled, which is how PowerShell escapes them.
const QUOTED_PLACEHOLDER: &str = "'{path}'";

/// Something that can play an audio file to completion.
pub trait AudioPlayer {
    /// Plays `clip`, blocking until playback ends.
    fn play(&self, clip: &Path) -> Result<(), GuardianError>;
}

/// One external player invocation, e.g. `aplay -q {path}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    program: String,
    args: Vec<String>,
}

impl PlayerCommand {
    /// Parses a whitespace-separated command line. Returns `None` for a blank one.
    ///
    /// There is no shell quoting, so the program path itself cannot contain
    /// spaces. Put such a player on `PATH` or behind a wrapper script.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Arguments for playing `clip`: `{path}` is substituted where it appears,
    /// otherwise the path is appended as the last argument. Inside `'{path}'`
    /// any `'` in the path is written as `''`.
    pub fn args_for(&self, clip: &Path) -> Vec<OsString> {
        let clip_str = clip.to_string_lossy();
        let mut substituted = false;
        let mut args: Vec<OsString> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(PATH_PLACEHOLDER) {
                    substituted = true;
                    if arg == PATH_PLACEHOLDER {
                        // Keep the exact OS path when the argument is only the placeholder.
                        return clip.as_os_str().to_os_string();
                    }
                    let quoted = format!("'{}'", clip_str.replace('\'', "''"));
                    OsString::from(
                        arg.replace(QUOTED_PLACEHOLDER, &quoted)
                            .replace(PATH_PLACEHOLDER, &clip_str),
                    )
                } else {
                    OsString::from(arg)
                }
            })
            .collect();
        if !substituted {
            args.push(clip.as_os_str().to_os_string());
        }
        args
    }
}

/// Plays clips by running external audio players.
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    candidates: Vec<PlayerCommand>,
}

impl SystemPlayer {
    /// Uses only `command_line` when given, otherwise the platform defaults.
    pub fn new(command_line: Option<&str>) -> Self {
        match command_line.and_then(PlayerCommand::parse) {
            Some(command) => Self {
                candidates: vec![command],
            },
            None => Self {
                candidates: default_candidates(),
            },
        }
    }
}

impl AudioPlayer for SystemPlayer {
    fn play(&self, clip: &Path) -> Result<(), GuardianError> {
        let mut failures = Vec::new();

        for candidate in &self.candidates {
            debug!("Trying audio player '{}'", candidate.program);
            let result = Command::new(&candidate.program)
                .args(candidate.args_for(clip))
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output();

            match result {
                Ok(output) if output.status.success() => {
                    info!("Played {} with {}", clip.display(), candidate.program);
                    return Ok(());
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    warn!(
                        "Audio player '{}' failed with {}",
                        candidate.program, output.status
                    );
                    failures.push(format!(
                        "{} exited with {}: {}",
                        candidate.program,
                        output.status,
                        stderr.trim()
                    ));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Audio player '{}' is not installed", candidate.program);
                }
                Err(e) => {
                    warn!("Could not start audio player '{}': {}", candidate.program, e);
                    failures.push(format!("{}: {}", candidate.program, e));
                }
            }
        }

        if failures.is_empty() {
            let tried = self
                .candidates
                .iter()
                .map(|c| c.program.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Err(GuardianError::NoAudioPlayer { tried })
        } else {
            Err(GuardianError::AudioPlayback(failures.join("; ")))
        }
    }
}

/// Plays the introductory clip at `clip` with `player`.
///
/// Returns `GuardianError::MissingAudioFile` without touching the player when
/// `clip` is not an existing file.
pub fn play_intro(player: &dyn AudioPlayer, clip: &Path) -> Result<(), GuardianError> {
    if !clip.is_file() {
        return Err(GuardianError::MissingAudioFile {
            path: clip.to_path_buf(),
        });
    }
    player.play(clip)
}

#[cfg(target_os = "macos")]
fn default_command_lines() -> &'static [&'static str] {
    &["afplay"]
}

#[cfg(target_os = "windows")]
fn default_command_lines() -> &'static [&'static str] {
    &["powershell -NoProfile -NonInteractive -Command (New-Object Media.SoundPlayer '{path}').PlaySync()"]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_command_lines() -> &'static [&'static str] {
    &[
        "aplay -q",
        "paplay",
        "ffplay -nodisp -autoexit -loglevel quiet",
    ]
}

fn default_candidates() -> Vec<PlayerCommand> {
    default_command_lines()
        .iter()
        .filter_map(|line| PlayerCommand::parse(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[derive(Default)]
    struct RecordingPlayer {
        played: RefCell<Vec<PathBuf>>,
    }

    impl AudioPlayer for RecordingPlayer {
        fn play(&self, clip: &Path) -> Result<(), GuardianError> {
            self.played.borrow_mut().push(clip.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_parse_splits_program_and_args() {
        let cmd = PlayerCommand::parse("  aplay   -q ").unwrap();
        assert_eq!(cmd.program, "aplay");
        assert_eq!(cmd.args, vec!["-q".to_string()]);
        assert!(PlayerCommand::parse("   ").is_none());
    }

    #[test]
    fn test_args_append_path_without_placeholder() {
        let cmd = PlayerCommand::parse("aplay -q").unwrap();
        let args = cmd.args_for(Path::new("/tmp/intro.wav"));
        assert_eq!(args, vec![OsString::from("-q"), OsString::from("/tmp/intro.wav")]);
    }

    #[test]
    fn test_args_substitute_placeholder() {
        let cmd = PlayerCommand::parse("player --file={path} --quiet").unwrap();
        let args = cmd.args_for(Path::new("/tmp/intro.wav"));
        assert_eq!(
            args,
            vec![
                OsString::from("--file=/tmp/intro.wav"),
                OsString::from("--quiet")
            ]
        );
    }

    #[test]
    fn test_single_quoted_placeholder_doubles_quotes() {
        let cmd = PlayerCommand::parse("powershell -Command (New-Object Media.SoundPlayer '{path}').PlaySync()").unwrap();
        let args = cmd.args_for(Path::new("C:\\Users\\o'brien\\intro.wav"));
        assert_eq!(
            args.last().unwrap(),
            &OsString::from("'C:\\Users\\o''brien\\intro.wav').PlaySync()")
        );
    }

    #[test]
    fn test_configured_player_replaces_defaults() {
        let player = SystemPlayer::new(Some("mpv --no-video"));
        assert_eq!(player.candidates.len(), 1);
        assert_eq!(player.candidates[0].program, "mpv");

        let defaults = SystemPlayer::new(None);
        assert!(!defaults.candidates.is_empty());
    }

    #[test]
    fn test_missing_clip_never_reaches_player() {
        let player = RecordingPlayer::default();
        let err = play_intro(&player, Path::new("/definitely/not/here.wav")).unwrap_err();
        assert!(matches!(err, GuardianError::MissingAudioFile { .. }));
        assert!(player.played.borrow().is_empty());
    }

    #[test]
    fn test_existing_clip_is_played() {
        let clip = NamedTempFile::new().unwrap();
        let player = RecordingPlayer::default();
        play_intro(&player, clip.path()).unwrap();
        assert_eq!(player.played.borrow().as_slice(), &[clip.path().to_path_buf()]);
    }

    #[test]
    fn test_uninstalled_player_reports_no_player() {
        let clip = NamedTempFile::new().unwrap();
        let player = SystemPlayer::new(Some("cyberguardian-no-such-player-xyz"));
        let err = player.play(clip.path()).unwrap_err();
        assert!(matches!(err, GuardianError::NoAudioPlayer { ref tried } if tried.contains("no-such-player")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_player_reports_playback_error() {
        let clip = NamedTempFile::new().unwrap();
        let player = SystemPlayer::new(Some("false"));
        let err = player.play(clip.path()).unwrap_err();
        assert!(matches!(err, GuardianError::AudioPlayback(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_player() {
        let clip = NamedTempFile::new().unwrap();
        let player = SystemPlayer::new(Some("true"));
        assert!(player.play(clip.path()).is_ok());
    }
}
