use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Result};
use log::warn;
use crate::errors::OverrideError;

/// Application configuration module
/// This module holds the run configuration threaded through the merge pipeline
/// and the `key=value` override files that customize styling and script info.

/// Style override file looked up in the working directory
pub const STYLE_OVERRIDE_FILE: &str = "default_style.txt";

/// Script info override file looked up in the working directory
pub const SCRIPT_INFO_OVERRIDE_FILE: &str = "script_info.txt";

/// Layout used when combining the two tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    // @mode: First track bottom-left, second bottom-right
    #[default]
    SideBySide,
    // @mode: Both tracks bottom-center, interleaved by time
    Consecutive,
}

impl MergeMode {
    // @returns: CLI identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SideBySide => "side",
            Self::Consecutive => "consecutive",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Which override files the user opted into for this run.
///
/// Decided once per run and passed explicitly; single-file runs start from
/// `Customization::none()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Customization {
    pub use_custom_style: bool,
    pub use_custom_script_info: bool,
}

impl Customization {
    /// Built-in defaults only
    pub fn none() -> Self {
        Self::default()
    }

    /// Both override files enabled
    pub fn all() -> Self {
        Customization {
            use_custom_style: true,
            use_custom_script_info: true,
        }
    }
}

/// Represents the run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Layout of the merged output
    pub mode: MergeMode,

    /// Label shown for the first track in side-by-side mode
    pub lang1: String,

    /// Label shown for the second track in side-by-side mode
    pub lang2: String,

    /// Base font size for the generated styles
    pub font_size: u32,

    /// Override files opted into
    pub customization: Customization,

    /// Skip pairs that fail instead of aborting the batch
    pub continue_on_error: bool,

    /// Directory searched for override files
    pub override_dir: PathBuf,

    /// Log level
    pub log_level: LogLevel,
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(anyhow!("Font size must be greater than zero"));
        }

        Ok(())
    }

    // @returns: Path of the style override file
    pub fn style_override_path(&self) -> PathBuf {
        self.override_dir.join(STYLE_OVERRIDE_FILE)
    }

    // @returns: Path of the script info override file
    pub fn script_info_override_path(&self) -> PathBuf {
        self.override_dir.join(SCRIPT_INFO_OVERRIDE_FILE)
    }

    /// Load the override files the customization flags enable.
    ///
    /// A file that is disabled, missing or malformed yields `None` and the
    /// corresponding builder falls back to defaults.
    pub fn load_overrides(&self) -> Overrides {
        let load = |enabled: bool, path: PathBuf| -> Option<CustomConfig> {
            if !enabled {
                return None;
            }
            match CustomConfig::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("Error reading {}: {}. Using defaults.", path.display(), e);
                    None
                }
            }
        };

        Overrides {
            style: load(self.customization.use_custom_style, self.style_override_path()),
            script_info: load(self.customization.use_custom_script_info, self.script_info_override_path()),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            mode: MergeMode::default(),
            lang1: "English".to_string(),
            lang2: "Japanese".to_string(),
            font_size: 24,
            customization: Customization::none(),
            continue_on_error: false,
            override_dir: PathBuf::from("."),
            log_level: LogLevel::default(),
        }
    }
}

/// Loaded override sets, each present only when enabled and readable
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub style: Option<CustomConfig>,
    pub script_info: Option<CustomConfig>,
}

/// Ordered `key=value` pairs read from an override file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomConfig {
    entries: Vec<(String, String)>,
}

impl CustomConfig {
    /// Read and parse an override file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OverrideError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| OverrideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse `key=value` lines; blank lines and `#` comments are ignored.
    ///
    /// Keys and values are trimmed. A later duplicate key replaces the earlier
    /// value in place.
    pub fn parse(content: &str) -> Result<Self, OverrideError> {
        let mut config = CustomConfig::default();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| OverrideError::MalformedLine {
                line_number: idx + 1,
                line: line.to_string(),
            })?;

            config.insert(key.trim(), value.trim());
        }

        Ok(config)
    }

    /// Build from literal pairs
    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut config = CustomConfig::default();
        for (key, value) in pairs {
            config.insert(key, value);
        }
        config
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
