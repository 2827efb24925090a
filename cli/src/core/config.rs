//! # CyberGuardian Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, and validates the settings a chat session is
//! constructed with: the bot's name and tagline, the introductory audio clip,
//! typing speed, display switches, the help topics, and extra or replacement
//! answers for the response table. Nothing environment-specific is hardcoded in
//! the session itself; it all arrives through `Config`.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line options (`ConfigOverrides`)
//! 2. Project-specific `.cyberguardian.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Passing `--config <PATH>` replaces steps 2 and 3 with exactly that file.
//!
//! Each file is read into a `FileConfig` whose fields are all optional, and
//! only the fields a file sets are laid over the layers below it. A relative
//! `audio.clip` is resolved against the directory of the file that set it, and
//! `~` is expanded.
//!
//! ## Examples
//!
//! ```toml
//! bot_name = "CyberGuardian"
//!
//! [audio]
//! clip = "~/sounds/greeting.wav"
//! player = "paplay"
//!
//! [typing]
//! delay_ms = 20
//!
//! [responses]
//! "two factor" = "Turn on two-factor authentication wherever it is offered."
//! ```
//!
use crate::common::ui::typewriter;
use crate::core::error::{GuardianError, Result};
use crate::session::responses::{normalize, ResponseTable};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".cyberguardian.toml";
const USER_CONFIG_FILENAME: &str = "config.toml";

/// Upper bound for either typing delay, in milliseconds.
pub const MAX_TYPING_DELAY_MS: u64 = 1000;

/// Effective configuration for one chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name the bot introduces itself with and prefixes answers with.
    pub bot_name: String,
    /// Line printed under the banner art.
    pub tagline: String,
    pub audio: AudioConfig,
    pub typing: TypingConfig,
    pub display: DisplayConfig,
    /// Topics listed in the "Chat Help" section.
    pub help_topics: Vec<String>,
    /// Answers laid over the built-in response table, keyed by normalized question.
    pub responses: HashMap<String, String>,
}

/// Introductory clip settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Path of the clip. `None` means no clip is configured.
    pub clip: Option<PathBuf>,
    /// Player command line. `None` tries the platform's usual players.
    pub player: Option<String>,
}

/// Per-character delays for typed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingConfig {
    pub delay_ms: u64,
    pub welcome_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub color: bool,
    pub clear_screen: bool,
    /// Wait for one more line after the goodbye message.
    pub pause_on_exit: bool,
}

/// Settings given on the command line. They win over every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub audio_clip: Option<PathBuf>,
    pub no_audio: bool,
    pub typing_delay_ms: Option<u64>,
    pub no_color: bool,
    pub no_pause: bool,
}

/// On-disk shape of a configuration file. Every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    bot_name: Option<String>,
    tagline: Option<String>,
    #[serde(default)]
    audio: FileAudio,
    #[serde(default)]
    typing: FileTyping,
    #[serde(default)]
    display: FileDisplay,
    #[serde(default)]
    help: FileHelp,
    #[serde(default)]
    responses: HashMap<String, String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileAudio {
    enabled: Option<bool>,
    clip: Option<String>,
    player: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileTyping {
    delay_ms: Option<u64>,
    welcome_delay_ms: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileDisplay {
    color: Option<bool>,
    clear_screen: Option<bool>,
    pause_on_exit: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileHelp {
    topics: Option<Vec<String>>,
}

fn default_help_topics() -> Vec<String> {
    [
        "Password safety",
        "Phishing",
        "Safe browsing",
        "How I am",
        "What is my purpose",
        "What can I ask you about",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_name: "CyberGuardian".to_string(),
            tagline: "[:: Your AI Guide to Cybersecurity ::]".to_string(),
            audio: AudioConfig {
                enabled: true,
                clip: None,
                player: None,
            },
            typing: TypingConfig {
                delay_ms: typewriter::DEFAULT_DELAY_MS,
                welcome_delay_ms: 15,
            },
            display: DisplayConfig {
                color: true,
                clear_screen: true,
                pause_on_exit: true,
            },
            help_topics: default_help_topics(),
            responses: HashMap::new(),
        }
    }
}

impl Config {
    /// Delay between characters of bot answers and the closing message.
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing.delay_ms)
    }

    /// Delay between characters of the welcome box.
    pub fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.typing.welcome_delay_ms)
    }

    /// The built-in response table with this configuration's answers applied.
    pub fn response_table(&self) -> Result<ResponseTable> {
        ResponseTable::with_overrides(&self.responses)
            .context("Invalid [responses] table")
    }

    /// Lays `layer` over this configuration. `base_dir` anchors a relative clip path.
    fn apply_file(&mut self, layer: FileConfig, base_dir: Option<&Path>) -> Result<()> {
        if let Some(bot_name) = layer.bot_name {
            self.bot_name = bot_name;
        }
        if let Some(tagline) = layer.tagline {
            self.tagline = tagline;
        }

        if let Some(enabled) = layer.audio.enabled {
            self.audio.enabled = enabled;
        }
        if let Some(clip) = layer.audio.clip {
            let mut path = PathBuf::from(shellexpand::tilde(&clip).into_owned());
            if path.is_relative() {
                if let Some(dir) = base_dir {
                    path = dir.join(path);
                }
            }
            self.audio.clip = Some(path);
        }
        if let Some(player) = layer.audio.player {
            self.audio.player = Some(player);
        }

        if let Some(delay) = layer.typing.delay_ms {
            self.typing.delay_ms = delay;
        }
        if let Some(delay) = layer.typing.welcome_delay_ms {
            self.typing.welcome_delay_ms = delay;
        }

        if let Some(color) = layer.display.color {
            self.display.color = color;
        }
        if let Some(clear) = layer.display.clear_screen {
            self.display.clear_screen = clear;
        }
        if let Some(pause) = layer.display.pause_on_exit {
            self.display.pause_on_exit = pause;
        }

        if let Some(topics) = layer.help.topics {
            self.help_topics = topics;
        }

        // A single file may not repeat a question; across files, later layers win.
        ResponseTable::new(layer.responses.iter().map(|(q, a)| (q.as_str(), a.clone())))
            .context("Invalid [responses] table")?;
        for (question, answer) in layer.responses {
            self.responses.insert(normalize(&question), answer);
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(clip) = &overrides.audio_clip {
            self.audio.clip = Some(PathBuf::from(
                shellexpand::tilde(&clip.to_string_lossy()).into_owned(),
            ));
        }
        if overrides.no_audio {
            self.audio.enabled = false;
        }
        if let Some(delay) = overrides.typing_delay_ms {
            self.typing.delay_ms = delay;
            self.typing.welcome_delay_ms = self.typing.welcome_delay_ms.min(delay);
        }
        if overrides.no_color {
            self.display.color = false;
        }
        if overrides.no_pause {
            self.display.pause_on_exit = false;
        }
    }
}

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read and it must exist. Otherwise the
/// user and project files are layered when present.
pub fn load_config(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = Config::default();

    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(GuardianError::Config(format!(
                    "Configuration file '{}' does not exist.",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            apply_config_file(&mut config, path)?;
        }
        None => {
            if let Some(path) = user_config_path() {
                if path.is_file() {
                    info!("Loading user configuration from: {}", path.display());
                    apply_config_file(&mut config, &path)?;
                } else {
                    debug!("User configuration file not found at {}", path.display());
                }
            } else {
                warn!("Could not determine user config directory.");
            }

            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            if let Some(path) = find_project_config_path(&current_dir) {
                info!("Loading project configuration from: {}", path.display());
                apply_config_file(&mut config, &path)?;
            } else {
                debug!("No project configuration file ({}) found.", PROJECT_CONFIG_FILENAME);
            }
        }
    }

    config.apply_overrides(overrides);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "CyberGuardian", "cyberguardian")
        .map(|dirs| dirs.config_dir().join(USER_CONFIG_FILENAME))
}

/// Walks up from `start` looking for a project file, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn apply_config_file(config: &mut Config, path: &Path) -> Result<()> {
    let layer = read_config_file(path)?;
    config
        .apply_file(layer, path.parent())
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn validate_config(config: &Config) -> Result<()> {
    if config.bot_name.trim().is_empty() {
        return Err(anyhow!(GuardianError::Config(
            "bot_name cannot be empty.".to_string()
        )));
    }
    for (name, value) in [
        ("typing.delay_ms", config.typing.delay_ms),
        ("typing.welcome_delay_ms", config.typing.welcome_delay_ms),
    ] {
        if value > MAX_TYPING_DELAY_MS {
            return Err(anyhow!(GuardianError::Config(format!(
                "{} is {} ms; the maximum is {} ms.",
                name, value, MAX_TYPING_DELAY_MS
            ))));
        }
    }
    if let Some(clip) = &config.audio.clip {
        if clip.is_dir() {
            return Err(anyhow!(GuardianError::Config(format!(
                "Configured audio clip '{}' is a directory.",
                clip.display()
            ))));
        }
        if !clip.exists() {
            // Reported to the user at playback time, not a configuration error.
            warn!("Configured audio clip '{}' does not exist.", clip.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot_name, "CyberGuardian");
        assert_eq!(config.typing_delay(), Duration::from_millis(30));
        assert_eq!(config.welcome_delay(), Duration::from_millis(15));
        assert!(config.audio.enabled);
        assert!(config.audio.clip.is_none());
        assert_eq!(config.help_topics.len(), 6);
        assert!(config.response_table().unwrap().lookup("phishing").is_some());
    }

    #[test]
    fn test_deserialize_and_apply_toml() {
        let toml_content = r#"
            bot_name = "NetWarden"

            [audio]
            clip = "sounds/hello.wav"
            player = "paplay"

            [typing]
            delay_ms = 5

            [display]
            color = false

            [help]
            topics = ["Phishing"]

            [responses]
            "Two Factor" = "Turn it on."
        "#;
        let layer: FileConfig = toml::from_str(toml_content).expect("Failed to parse TOML");

        let mut config = Config::default();
        config
            .apply_file(layer, Some(Path::new("/etc/cyberguardian")))
            .unwrap();

        assert_eq!(config.bot_name, "NetWarden");
        assert_eq!(
            config.audio.clip,
            Some(PathBuf::from("/etc/cyberguardian/sounds/hello.wav"))
        );
        assert_eq!(config.audio.player.as_deref(), Some("paplay"));
        assert_eq!(config.typing.delay_ms, 5);
        assert_eq!(config.typing.welcome_delay_ms, 15); // untouched
        assert!(!config.display.color);
        assert!(config.display.clear_screen); // untouched
        assert_eq!(config.help_topics, vec!["Phishing".to_string()]);
        assert_eq!(config.responses.get("two factor").map(String::as_str), Some("Turn it on."));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str("colour = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_responses_in_one_file_are_rejected() {
        let layer: FileConfig = toml::from_str(
            r#"
            [responses]
            "Phishing" = "a"
            "phishing" = "b"
            "#,
        )
        .unwrap();
        let result = Config::default().apply_file(layer, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_later_layer_overrides_response_case_insensitively() {
        let mut config = Config::default();
        let user: FileConfig = toml::from_str("[responses]\n\"Malware\" = \"user answer\"").unwrap();
        let project: FileConfig =
            toml::from_str("[responses]\n\"MALWARE\" = \"project answer\"").unwrap();
        config.apply_file(user, None).unwrap();
        config.apply_file(project, None).unwrap();

        let table = config.response_table().unwrap();
        assert_eq!(table.lookup("malware"), Some("project answer"));
    }

    #[test]
    fn test_clip_tilde_expansion() {
        let mut config = Config::default();
        let layer: FileConfig = toml::from_str("[audio]\nclip = \"~/intro.wav\"").unwrap();
        config.apply_file(layer, Some(Path::new("/ignored"))).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(config.audio.clip, Some(home_dir.join("intro.wav")));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(&ConfigOverrides {
            audio_clip: Some(PathBuf::from("/tmp/clip.wav")),
            no_audio: true,
            typing_delay_ms: Some(0),
            no_color: true,
            no_pause: true,
        });
        assert_eq!(config.audio.clip, Some(PathBuf::from("/tmp/clip.wav")));
        assert!(!config.audio.enabled);
        assert_eq!(config.typing.delay_ms, 0);
        assert_eq!(config.typing.welcome_delay_ms, 0);
        assert!(!config.display.color);
        assert!(!config.display.pause_on_exit);
    }

    #[test]
    fn test_validate_rejects_blank_bot_name() {
        let config = Config {
            bot_name: "  ".to_string(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("bot_name cannot be empty"));
    }

    #[test]
    fn test_validate_rejects_slow_typing() {
        let mut config = Config::default();
        config.typing.delay_ms = MAX_TYPING_DELAY_MS + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_clip_directory_vs_missing_file() {
        let temp_dir = tempdir().unwrap();

        let mut config = Config::default();
        config.audio.clip = Some(temp_dir.path().to_path_buf());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("is a directory"));

        config.audio.clip = Some(temp_dir.path().join("missing.wav"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("guardian.toml");
        fs::write(&path, "tagline = \"Stay sharp\"\n[typing]\ndelay_ms = 1\n").unwrap();

        let config = load_config(Some(&path), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.tagline, "Stay sharp");
        assert_eq!(config.typing.delay_ms, 1);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("absent.toml");
        let err = load_config(Some(&path), &ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_explicit_invalid_toml_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "bot_name = ").unwrap();
        let err = load_config(Some(&path), &ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_project_config_search_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        // Above the repository root, so it must not be found.
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }
}
