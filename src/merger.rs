/*!
 * Merge engine: combines two event sequences into one styled ASS document.
 *
 * Side-by-side places the first track bottom-left and the second bottom-right,
 * with a one-second language label for each. Consecutive stacks both tracks
 * bottom-center. In both layouts events are stable-sorted by start time, so
 * events sharing a start keep their input order (labels, then first track,
 * then second track).
 */

use std::path::Path;
use log::info;
use crate::app_config::{Config, MergeMode, Overrides};
use crate::ass_document::{build_metadata, AssDocument};
use crate::ass_style::{alignment, AssStyle, StyleOverrides};
use crate::errors::MergeError;
use crate::subtitle_processor::SubtitleEvent;

pub const DEFAULT_STYLE: &str = "Default";
pub const LEFT_STYLE: &str = "Left";
pub const RIGHT_STYLE: &str = "Right";
pub const BOTTOM_STYLE: &str = "Bottom";

/// How long the language labels stay on screen
pub const LABEL_DURATION_MS: i64 = 1000;

/// Builds merged documents with one set of styling inputs
#[derive(Debug, Clone)]
pub struct SubtitleMerger {
    font_size: u32,
    overrides: Overrides,
}

impl SubtitleMerger {
    pub fn new(font_size: u32, overrides: Overrides) -> Self {
        SubtitleMerger { font_size, overrides }
    }

    /// Merger with built-in styling only
    pub fn with_defaults(font_size: u32) -> Self {
        Self::new(font_size, Overrides::default())
    }

    // @creates: Document with script info and the base style registered
    fn base_document(&self) -> (AssDocument, AssStyle) {
        let mut document = AssDocument::new(build_metadata(self.overrides.script_info.as_ref()));
        let base = AssStyle::build(self.overrides.style.as_ref(), self.font_size);
        document.add_style(DEFAULT_STYLE, base.clone());
        (document, base)
    }

    /// Merge with the first track on the left and the second on the right
    pub fn merge_side_by_side(
        &self,
        events_a: Vec<SubtitleEvent>,
        events_b: Vec<SubtitleEvent>,
        lang1: &str,
        lang2: &str,
    ) -> AssDocument {
        let (mut document, base) = self.base_document();

        document.add_style(LEFT_STYLE, base.derive(StyleOverrides {
            alignment: Some(alignment::BOTTOM_LEFT),
            margin_l: Some(20),
            margin_r: Some(0),
        }));
        document.add_style(RIGHT_STYLE, base.derive(StyleOverrides {
            alignment: Some(alignment::BOTTOM_RIGHT),
            margin_l: Some(0),
            margin_r: Some(20),
        }));

        let mut events = Vec::with_capacity(events_a.len() + events_b.len() + 2);
        events.push(SubtitleEvent::new(0, LABEL_DURATION_MS, lang1).with_style(LEFT_STYLE));
        events.push(SubtitleEvent::new(0, LABEL_DURATION_MS, lang2).with_style(RIGHT_STYLE));
        events.extend(events_a.into_iter().map(|event| event.with_style(LEFT_STYLE)));
        events.extend(events_b.into_iter().map(|event| event.with_style(RIGHT_STYLE)));

        events.sort_by_key(|event| event.start_ms);
        document.events = events;
        document
    }

    /// Merge both tracks bottom-center, interleaved by start time
    pub fn merge_consecutive(&self, events_a: Vec<SubtitleEvent>, events_b: Vec<SubtitleEvent>) -> AssDocument {
        let (mut document, base) = self.base_document();

        document.add_style(BOTTOM_STYLE, base.derive(StyleOverrides {
            alignment: Some(alignment::BOTTOM_CENTER),
            ..StyleOverrides::default()
        }));

        let mut events: Vec<SubtitleEvent> = events_a.into_iter()
            .chain(events_b)
            .map(|event| event.with_style(BOTTOM_STYLE))
            .collect();

        events.sort_by_key(|event| event.start_ms);
        document.events = events;
        document
    }

    /// Merge in the layout selected by `config.mode`
    pub fn merge(&self, config: &Config, events_a: Vec<SubtitleEvent>, events_b: Vec<SubtitleEvent>) -> AssDocument {
        match config.mode {
            MergeMode::SideBySide => self.merge_side_by_side(events_a, events_b, &config.lang1, &config.lang2),
            MergeMode::Consecutive => self.merge_consecutive(events_a, events_b),
        }
    }

    /// Merge and write the result to `output_path`
    pub fn merge_to_file<P: AsRef<Path>>(
        &self,
        config: &Config,
        events_a: Vec<SubtitleEvent>,
        events_b: Vec<SubtitleEvent>,
        output_path: P,
    ) -> Result<AssDocument, MergeError> {
        let output_path = output_path.as_ref();
        let document = self.merge(config, events_a, events_b);
        document.save(output_path)?;
        info!("Saved: {}", output_path.display());
        Ok(document)
    }
}
