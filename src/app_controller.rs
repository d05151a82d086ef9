use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::{Config, Customization};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::merger::SubtitleMerger;
use crate::pairing::{pair_files, FilePair};
use crate::prompt::Prompter;
use crate::subtitle_processor::SubtitleTrack;

// @module: Application controller for subtitle merging

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Output files written, in processing order
    pub written: Vec<PathBuf>,

    /// Pairs skipped because of an error (only with continue-on-error)
    pub failed: Vec<(FilePair, String)>,
}

/// Main application controller for subtitle merging
pub struct Controller {
    // @field: Run configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()
            .context("Configuration validation failed")?;

        Ok(Self { config })
    }

    /// Lines describing the override files present in the override directory,
    /// empty when there are none
    pub fn override_file_notice(&self) -> Vec<String> {
        let style = self.config.style_override_path();
        let script_info = self.config.script_info_override_path();
        if !style.is_file() && !script_info.is_file() {
            return Vec::new();
        }

        let mut lines = vec![format!("Customization files detected in {}", self.config.override_dir.display())];
        if style.is_file() {
            lines.push(format!("- {} (for subtitle styling)", style.display()));
        }
        if script_info.is_file() {
            lines.push(format!("- {} (for script metadata)", script_info.display()));
        }
        lines
    }

    /// Log which override files are present so the operator knows they can edit them
    pub fn announce_override_files(&self) {
        for line in self.override_file_notice() {
            info!("{}", line);
        }
    }

    /// Dispatch on the input kinds: two files merge directly, two directories run a batch.
    pub fn run(&self, input1: &Path, input2: &Path, output: &Path, prompter: &mut dyn Prompter) -> Result<BatchSummary> {
        if input1.is_dir() && input2.is_dir() {
            return self.run_folder(input1, input2, output, prompter);
        }

        if input1.is_file() && input2.is_file() {
            let written = self.run_files(input1, input2, output)?;
            return Ok(BatchSummary {
                written: vec![written],
                failed: Vec::new(),
            });
        }

        Err(AppError::Argument("Both inputs must be either files or folders".to_string()).into())
    }

    /// Merge two subtitle files into one output file.
    ///
    /// Never prompts; override files are used only when the configuration opts in.
    pub fn run_files(&self, input1: &Path, input2: &Path, output: &Path) -> Result<PathBuf> {
        let customization = self.available_customization(self.config.customization);
        let merger = SubtitleMerger::new(self.config.font_size, self.config_with(customization).load_overrides());
        let output_path = FileManager::resolve_single_output(input1, output);

        self.merge_pair(&merger, input1, input2, &output_path)?;
        Ok(output_path)
    }

    /// Pair files of two folders and merge every pair into `output_dir`
    pub fn run_folder(&self, dir1: &Path, dir2: &Path, output_dir: &Path, prompter: &mut dyn Prompter) -> Result<BatchSummary> {
        let customization = self.prompt_for_customization(prompter)?;
        let merger = SubtitleMerger::new(self.config.font_size, self.config_with(customization).load_overrides());

        let pairs = pair_files(dir1, dir2, prompter)?;
        if pairs.is_empty() {
            warn!("No subtitle pairs to merge");
            return Ok(BatchSummary::default());
        }

        let base_name = prompter.input("Enter base name for all files (leave blank to use original names)")?;
        let base_name = Some(base_name.trim()).filter(|name| !name.is_empty());

        let progress = ProgressBar::new(pairs.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut summary = BatchSummary::default();

        for (i, pair) in pairs.into_iter().enumerate() {
            let output_path = FileManager::generate_output_path(&pair.first, output_dir, base_name, i + 1);
            progress.set_message(FileManager::file_name(&output_path));

            match self.merge_pair(&merger, &pair.first, &pair.second, &output_path) {
                Ok(()) => summary.written.push(output_path),
                Err(e) if self.config.continue_on_error => {
                    error!("Failed to merge {} + {}: {:#}", pair.first.display(), pair.second.display(), e);
                    summary.failed.push((pair, format!("{:#}", e)));
                }
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();

        if summary.failed.is_empty() {
            info!("Merged {} file pair(s) into {}", summary.written.len(), output_dir.display());
        } else {
            warn!("Merged {} file pair(s), {} failed", summary.written.len(), summary.failed.len());
        }

        Ok(summary)
    }

    /// Ask once per present override file whether to use it for the whole batch.
    ///
    /// Files already enabled by configuration are not asked about.
    pub fn prompt_for_customization(&self, prompter: &mut dyn Prompter) -> Result<Customization> {
        let mut customization = self.available_customization(self.config.customization);

        if self.config.style_override_path().is_file() && !customization.use_custom_style {
            prompter.show(&format!("\nCustom style file ({}) found!", crate::app_config::STYLE_OVERRIDE_FILE));
            customization.use_custom_style = prompter.confirm("Use custom style settings for all files?", true)?;
        }

        if self.config.script_info_override_path().is_file() && !customization.use_custom_script_info {
            prompter.show(&format!("\nCustom script info file ({}) found!", crate::app_config::SCRIPT_INFO_OVERRIDE_FILE));
            customization.use_custom_script_info = prompter.confirm("Use custom script info for all files?", true)?;
        }

        debug!("Customization for this run: {:?}", customization);
        Ok(customization)
    }

    // @returns: Requested customization limited to files that exist
    fn available_customization(&self, requested: Customization) -> Customization {
        Customization {
            use_custom_style: requested.use_custom_style && self.config.style_override_path().is_file(),
            use_custom_script_info: requested.use_custom_script_info && self.config.script_info_override_path().is_file(),
        }
    }

    fn config_with(&self, customization: Customization) -> Config {
        Config {
            customization,
            ..self.config.clone()
        }
    }

    fn merge_pair(&self, merger: &SubtitleMerger, input1: &Path, input2: &Path, output_path: &Path) -> Result<()> {
        let track1 = SubtitleTrack::load(input1)
            .with_context(|| format!("Failed to load {}", input1.display()))?;
        let track2 = SubtitleTrack::load(input2)
            .with_context(|| format!("Failed to load {}", input2.display()))?;

        debug!("Merging {} ({} events) with {} ({} events) in {} mode",
               input1.display(), track1.events.len(), input2.display(), track2.events.len(), self.config.mode);

        merger.merge_to_file(&self.config, track1.events, track2.events, output_path)?;
        Ok(())
    }
}
