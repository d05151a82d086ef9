use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use log::debug;
use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file and decode it with a statistically detected encoding.
    ///
    /// A byte-order mark takes precedence over the detector. Returns the decoded
    /// text (without BOM) and the encoding used.
    pub fn read_to_string_detected<P: AsRef<Path>>(path: P) -> Result<(String, &'static Encoding), SubtitleError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SubtitleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes.is_empty() {
            return Err(SubtitleError::EmptyFile(path.to_path_buf()));
        }

        let (encoding, bom_len) = Self::detect_encoding(&bytes);
        debug!("Detected encoding {} for {}", encoding.name(), path.display());

        encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(|text| (text.into_owned(), encoding))
            .ok_or_else(|| SubtitleError::Encoding {
                path: path.to_path_buf(),
                encoding: encoding.name().to_string(),
            })
    }

    // @returns: Encoding and the length of the BOM to skip
    fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, usize) {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            return (encoding, bom_len);
        }

        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        (detector.guess(None, true), 0)
    }

    /// List supported subtitle files directly inside a directory, in natural order
    /// ("ep2" before "ep10").
    pub fn list_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && SubtitleFormat::is_supported(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort_by(|a, b| natord::compare(&Self::file_name(a), &Self::file_name(b)));

        Ok(result)
    }

    /// File name as a lossy string, empty when the path has none
    pub fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// File name without its final extension
    pub fn file_stem(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    // @generates: Output path for one merged pair in batch mode
    // @params: first_input, output_dir, base_name, sequence (1-based)
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        first_input: P1,
        output_dir: P2,
        base_name: Option<&str>,
        sequence: usize,
    ) -> PathBuf {
        let output_filename = match base_name {
            Some(base) => format!("{} - {:02}.ass", base, sequence),
            None => format!("{}.ass", Self::file_stem(first_input.as_ref())),
        };

        output_dir.as_ref().join(output_filename)
    }

    /// Resolve the output file for a single-file merge.
    ///
    /// An existing directory receives `{stem of first input}.ass`; a path
    /// without extension gets `.ass` appended; anything else is used as is.
    pub fn resolve_single_output<P1: AsRef<Path>, P2: AsRef<Path>>(first_input: P1, output: P2) -> PathBuf {
        let output = output.as_ref();

        if Self::dir_exists(output) {
            return output.join(format!("{}.ass", Self::file_stem(first_input.as_ref())));
        }

        if output.extension().is_none() {
            return output.with_extension("ass");
        }

        output.to_path_buf()
    }

    /// Write a string to a file, creating parent directories first
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
    }
}
