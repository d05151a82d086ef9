/*!
 * In-memory ASS document and its serializer.
 */

use std::fmt::Write as FmtWrite;
use std::path::Path;
use crate::app_config::CustomConfig;
use crate::ass_style::AssStyle;
use crate::errors::MergeError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleEvent;

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";
const EVENT_FORMAT: &str = "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Script info written when no override file is used
pub const DEFAULT_SCRIPT_INFO: [(&str, &str); 6] = [
    ("PlayResX", "640"),
    ("PlayResY", "360"),
    ("PlayDepth", "0"),
    ("ScriptType", "v4.00+"),
    ("Collisions", "Normal"),
    ("ScaledBorderAndShadow", "yes"),
];

/// Build the `[Script Info]` entries.
///
/// Override pairs are used in file order in place of the defaults. A
/// `ScriptType` is prepended when the overrides leave it out. An override set
/// with no entries counts as absent.
pub fn build_metadata(overrides: Option<&CustomConfig>) -> Vec<(String, String)> {
    match overrides {
        Some(overrides) if !overrides.is_empty() => {
            let mut info: Vec<(String, String)> = overrides.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            if !info.iter().any(|(k, _)| k == "ScriptType") {
                info.insert(0, ("ScriptType".to_string(), "v4.00+".to_string()));
            }
            info
        }
        _ => DEFAULT_SCRIPT_INFO.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// A complete ASS script: metadata, named styles and time-ordered events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssDocument {
    /// `[Script Info]` entries in output order
    pub metadata: Vec<(String, String)>,

    /// Named styles in output order; names are unique
    styles: Vec<(String, AssStyle)>,

    /// Events in output order
    pub events: Vec<SubtitleEvent>,
}

impl AssDocument {
    pub fn new(metadata: Vec<(String, String)>) -> Self {
        AssDocument {
            metadata,
            styles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Register a style, replacing any style with the same name
    pub fn add_style(&mut self, name: impl Into<String>, style: AssStyle) {
        let name = name.into();
        match self.styles.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = style,
            None => self.styles.push((name, style)),
        }
    }

    pub fn style(&self, name: &str) -> Option<&AssStyle> {
        self.styles.iter()
            .find(|(n, _)| n == name)
            .map(|(_, style)| style)
    }

    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|(n, _)| n.as_str())
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Style names referenced by events but not defined, in first-use order
    pub fn undefined_styles(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for event in &self.events {
            if self.style(&event.style).is_none() && !missing.contains(&event.style.as_str()) {
                missing.push(&event.style);
            }
        }
        missing
    }

    /// Serialize to ASS text
    pub fn to_ass_string(&self) -> String {
        let mut out = String::with_capacity(self.events.len() * 80 + 1024);

        // Writing into a String cannot fail
        let _ = self.write_ass(&mut out);
        out
    }

    fn write_ass(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "[Script Info]")?;
        writeln!(out, "; Script generated by submerger")?;
        for (key, value) in &self.metadata {
            writeln!(out, "{}: {}", key, value)?;
        }
        writeln!(out)?;

        writeln!(out, "[V4+ Styles]")?;
        writeln!(out, "{}", STYLE_FORMAT)?;
        for (name, style) in &self.styles {
            writeln!(out, "{}", style.to_ass_line(name))?;
        }
        writeln!(out)?;

        writeln!(out, "[Events]")?;
        writeln!(out, "{}", EVENT_FORMAT)?;
        for event in &self.events {
            writeln!(out, "{}", event)?;
        }

        Ok(())
    }

    /// Write the document to `path`, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MergeError> {
        let path = path.as_ref();
        FileManager::write_to_file(path, &self.to_ass_string()).map_err(|source| MergeError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
