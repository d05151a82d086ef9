/*!
 * # submerger - bilingual subtitle merger
 *
 * A Rust library for merging two subtitle tracks into a single styled ASS file,
 * typically one track per language for language learning.
 *
 * ## Features
 *
 * - Load SubRip (`.srt`) and ASS (`.ass`) files with automatic encoding detection
 * - Side-by-side layout (left/right with language labels) or consecutive layout
 * - Style and script info customization through `key=value` override files
 * - Batch mode pairing files between two folders by name
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Run configuration and override files
 * - `subtitle_processor`: Subtitle event model and SRT/ASS parsing
 * - `ass_style`: Style descriptors and derived positional styles
 * - `ass_document`: Output document, script info and ASS serialization
 * - `merger`: Side-by-side and consecutive merge strategies
 * - `pairing`: Folder-to-folder file pairing for batch mode
 * - `prompt`: Operator prompts behind the `Prompter` trait
 * - `file_utils`: File system operations and encoding detection
 * - `app_controller`: Single-file and batch drivers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod ass_style;
pub mod ass_document;
pub mod merger;
pub mod pairing;
pub mod prompt;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, CustomConfig, Customization, MergeMode};
pub use subtitle_processor::{SubtitleEvent, SubtitleTrack};
pub use ass_document::AssDocument;
pub use merger::SubtitleMerger;
pub use errors::{AppError, MergeError, OverrideError, PairingError, SubtitleError};
