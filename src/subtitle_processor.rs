use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: Subtitle loading and event model

// @const: SRT timecode line, tolerant of '.' separators and short fractions
static SRT_TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})\s*-->\s*(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})").unwrap()
});

// @const: Single timestamp in either SRT or ASS notation
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+):(\d{1,2}):(\d{1,2})[,.:](\d{1,3})\s*$").unwrap()
});

// @const: ASS section header
static SECTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(.+)\]$").unwrap()
});

/// Hard line break marker used in event text
pub const LINE_BREAK: &str = "\\N";

/// Field order assumed when an `[Events]` section has no `Format:` line
const DEFAULT_EVENT_FORMAT: [&str; 10] = [
    "layer", "start", "end", "style", "name", "marginl", "marginr", "marginv", "effect", "text",
];

/// Supported subtitle file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip (`.srt`)
    Srt,
    /// Advanced SubStation Alpha (`.ass`)
    Ass,
}

impl SubtitleFormat {
    /// Lowercase extensions accepted as input
    pub const EXTENSIONS: [&'static str; 2] = ["srt", "ass"];

    /// Pick the parser for a path by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, SubtitleError> {
        let extension = path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "srt" => Ok(Self::Srt),
            "ass" => Ok(Self::Ass),
            _ => Err(SubtitleError::UnsupportedFormat {
                extension,
                path: path.to_path_buf(),
            }),
        }
    }

    /// True when the path carries one of the supported extensions
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Whether an event is shown or kept as an inert comment line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    #[default]
    Dialogue,
    Comment,
}

impl EventKind {
    /// Line prefix used in the `[Events]` section
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dialogue => "Dialogue",
            Self::Comment => "Comment",
        }
    }
}

// @struct: Single timed subtitle event
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEvent {
    // @field: Start time in ms
    pub start_ms: i64,

    // @field: End time in ms
    pub end_ms: i64,

    // @field: Text, lines joined with `\N`
    pub text: String,

    // @field: Referenced style name
    pub style: String,

    pub layer: u32,
    pub name: String,
    pub margin_l: i32,
    pub margin_r: i32,
    pub margin_v: i32,
    pub effect: String,
    pub kind: EventKind,
}

impl SubtitleEvent {
    /// Creates a dialogue event using the `Default` style
    pub fn new(start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        SubtitleEvent {
            start_ms,
            end_ms,
            text: text.into(),
            style: "Default".to_string(),
            layer: 0,
            name: String::new(),
            margin_l: 0,
            margin_r: 0,
            margin_v: 0,
            effect: String::new(),
            kind: EventKind::Dialogue,
        }
    }

    /// Same event with its style reassigned
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Parse an `H:MM:SS,mmm` (SRT) or `H:MM:SS.cc` (ASS) timestamp to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Option<i64> {
        let caps = TIMESTAMP_REGEX.captures(timestamp)?;
        Self::captures_to_ms(&caps, 1)
    }

    /// Format milliseconds as an ASS timestamp (`H:MM:SS.cc`).
    ///
    /// Centiseconds are truncated and negative values clamp to zero.
    pub fn format_ass_timestamp(ms: i64) -> String {
        let ms = ms.max(0);
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let centis = (ms % 1_000) / 10;

        format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
    }

    /// Convert start time to formatted ASS timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_ass_timestamp(self.start_ms)
    }

    /// Convert end time to formatted ASS timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_ass_timestamp(self.end_ms)
    }

    // Fraction digits are scaled by width: "5" is 500ms, "05" is 50ms, "005" is 5ms.
    // None when a field does not fit in i64 milliseconds.
    fn captures_to_ms(caps: &regex::Captures, start_idx: usize) -> Option<i64> {
        let part = |idx: usize| -> Option<i64> {
            caps.get(idx).map_or(Some(0), |m| m.as_str().parse().ok())
        };
        let fraction = caps.get(start_idx + 3).map_or("0", |m| m.as_str());
        let scale = match fraction.len() {
            1 => 100,
            2 => 10,
            _ => 1,
        };
        let millis = fraction.parse::<i64>().ok()? * scale;

        part(start_idx)?.checked_mul(3_600_000)?
            .checked_add(part(start_idx + 1)? * 60_000)?
            .checked_add(part(start_idx + 2)? * 1000)?
            .checked_add(millis)
    }
}

/// Renders the event as an ASS `[Events]` line
impl fmt::Display for SubtitleEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {},{},{},{},{},{},{},{},{},{}",
            self.kind.as_str(),
            self.layer,
            self.format_start_time(),
            self.format_end_time(),
            self.style,
            self.name,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.effect,
            self.text,
        )
    }
}

/// Events loaded from one subtitle file
#[derive(Debug)]
pub struct SubtitleTrack {
    /// Source filename
    pub source_file: PathBuf,

    /// Parser that produced the events
    pub format: SubtitleFormat,

    /// Name of the detected text encoding
    pub encoding: String,

    /// Events in file order
    pub events: Vec<SubtitleEvent>,
}

impl SubtitleTrack {
    /// Load a subtitle file: detect its encoding, pick a parser by extension, parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let format = SubtitleFormat::from_path(path)?;
        let (content, encoding) = FileManager::read_to_string_detected(path)?;

        let events = match format {
            SubtitleFormat::Srt => Self::parse_srt_string(&content),
            SubtitleFormat::Ass => Self::parse_ass_string(&content),
        };

        debug!("Loaded {} events from {} ({})", events.len(), path.display(), encoding.name());

        Ok(SubtitleTrack {
            source_file: path.to_path_buf(),
            format,
            encoding: encoding.name().to_string(),
            events,
        })
    }

    /// Parse SRT format string into events.
    ///
    /// Blocks are separated by blank lines. Blocks without a timecode line are
    /// skipped with a warning; the leading index line is optional.
    pub fn parse_srt_string(content: &str) -> Vec<SubtitleEvent> {
        let content = content.trim_start_matches('\u{feff}');
        let mut events = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        let mut block_start_line = 1;

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    Self::push_srt_block(&block, block_start_line, &mut events);
                    block.clear();
                }
                continue;
            }
            if block.is_empty() {
                block_start_line = idx + 1;
            }
            block.push(line);
        }

        if !block.is_empty() {
            Self::push_srt_block(&block, block_start_line, &mut events);
        }

        if events.is_empty() {
            warn!("No valid subtitle entries found in SRT content");
        }

        events
    }

    fn push_srt_block(block: &[&str], line_number: usize, events: &mut Vec<SubtitleEvent>) {
        let Some(timecode_idx) = block.iter().position(|line| SRT_TIMECODE_REGEX.is_match(line)) else {
            warn!("Skipping SRT block at line {} without a timecode: {}", line_number, block[0].trim());
            return;
        };

        let Some(caps) = SRT_TIMECODE_REGEX.captures(block[timecode_idx]) else {
            return;
        };
        let start_ms = SubtitleEvent::captures_to_ms(&caps, 1);
        let end_ms = SubtitleEvent::captures_to_ms(&caps, 5);
        let (Some(start_ms), Some(end_ms)) = (start_ms, end_ms) else {
            warn!("Skipping SRT block at line {} with an out-of-range timecode: {}", line_number, block[timecode_idx].trim());
            return;
        };

        let text = block[timecode_idx + 1..]
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join(LINE_BREAK);

        events.push(SubtitleEvent::new(start_ms, end_ms, text));
    }

    /// Parse ASS format string into events.
    ///
    /// Only the `[Events]` section is read; styles and script info of the input
    /// are replaced during merging.
    pub fn parse_ass_string(content: &str) -> Vec<SubtitleEvent> {
        let content = content.trim_start_matches('\u{feff}');
        let mut events = Vec::new();
        let mut in_events = false;
        let mut format: Vec<String> = DEFAULT_EVENT_FORMAT.iter().map(|f| f.to_string()).collect();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if let Some(caps) = SECTION_REGEX.captures(line) {
                in_events = caps[1].eq_ignore_ascii_case("events");
                continue;
            }

            if !in_events {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            let kind = match key.trim() {
                "Format" => {
                    format = value.split(',').map(|f| f.trim().to_lowercase()).collect();
                    continue;
                }
                "Dialogue" => EventKind::Dialogue,
                "Comment" => EventKind::Comment,
                _ => continue,
            };

            match Self::parse_ass_event(value.trim_start(), &format, kind) {
                Some(event) => events.push(event),
                None => warn!("Skipping malformed ASS event at line {}: {}", idx + 1, line),
            }
        }

        events
    }

    fn parse_ass_event(value: &str, format: &[String], kind: EventKind) -> Option<SubtitleEvent> {
        // Text is the last field and may itself contain commas
        let fields: Vec<&str> = value.splitn(format.len(), ',').collect();
        if fields.len() != format.len() {
            return None;
        }

        let mut event = SubtitleEvent::new(0, 0, String::new());
        event.kind = kind;

        for (name, field) in format.iter().zip(fields) {
            match name.as_str() {
                "layer" => event.layer = field.trim().parse().unwrap_or(0),
                "start" => event.start_ms = SubtitleEvent::parse_timestamp(field)?,
                "end" => event.end_ms = SubtitleEvent::parse_timestamp(field)?,
                "style" => event.style = field.trim().to_string(),
                "name" | "actor" => event.name = field.trim().to_string(),
                "marginl" => event.margin_l = field.trim().parse().unwrap_or(0),
                "marginr" => event.margin_r = field.trim().parse().unwrap_or(0),
                "marginv" => event.margin_v = field.trim().parse().unwrap_or(0),
                "effect" => event.effect = field.trim().to_string(),
                "text" => event.text = field.to_string(),
                _ => {}
            }
        }

        Some(event)
    }
}
