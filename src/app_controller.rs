use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::srt_processor;
use crate::text_processor;

// @module: Application controller for subtitle conversion

/// Conversion direction between the two dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// SRT input, annotated text output
    SrtToText,
    /// Annotated text input, SRT output
    TextToSrt,
}

impl Direction {
    /// Infer the direction from a file extension: `.srt` converts to
    /// annotated text, anything else converts to SRT.
    pub fn infer<P: AsRef<Path>>(path: P) -> Self {
        let is_srt = path
            .as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"));

        if is_srt { Direction::SrtToText } else { Direction::TextToSrt }
    }

    /// Extension of the converted output file
    pub fn output_extension(&self) -> &'static str {
        match self {
            Direction::SrtToText => "txt",
            Direction::TextToSrt => "srt",
        }
    }
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Convert a single string between the two dialects.
    ///
    /// A zero-entry parse is the caller-facing invalid-file condition and
    /// surfaces as an error here; the underlying parsers themselves never
    /// fail.
    pub fn convert_string(&self, content: &str, direction: Direction) -> Result<String> {
        match direction {
            Direction::SrtToText => {
                let (entries, report) = srt_processor::parse_srt_with_report(content);
                if report.has_skips() {
                    warn!(
                        "Skipped {} of {} SRT block(s) as malformed",
                        report.skipped_blocks, report.total_blocks
                    );
                }
                if entries.is_empty() {
                    return Err(SubtitleError::NoEntries.into());
                }
                Ok(srt_processor::convert_to_text(&entries))
            }
            Direction::TextToSrt => {
                let (entries, report) = text_processor::parse_text_with_report(content);
                if report.has_skips() {
                    warn!(
                        "Skipped {} of {} annotated block(s) without usable text",
                        report.skipped_blocks, report.total_blocks
                    );
                }
                if entries.is_empty() {
                    return Err(SubtitleError::NoEntries.into());
                }

                let entries = if self.config.synthesize_timecodes {
                    text_processor::generate_time_codes(
                        &entries,
                        &self.config.start_time,
                        self.config.duration_per_entry_ms,
                    )
                } else {
                    entries
                };

                let srt = text_processor::convert_to_srt(&entries);
                if srt.is_empty() {
                    // Every entry lacked timing and synthesis was disabled
                    return Err(SubtitleError::NoEntries.into());
                }
                Ok(srt)
            }
        }
    }

    /// Convert a single file, returning the output path.
    ///
    /// The output lands next to the input unless an output directory is
    /// given; an existing output is skipped unless `force_overwrite` is set.
    pub fn run(
        &self,
        input_file: &Path,
        output_dir: Option<&Path>,
        direction: Option<Direction>,
        force_overwrite: bool,
    ) -> Result<PathBuf> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let direction = direction.unwrap_or_else(|| Direction::infer(input_file));
        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input_file.parent().unwrap_or(Path::new(".")).to_path_buf());

        FileManager::ensure_dir(&output_dir)?;

        let output_path =
            FileManager::generate_output_path(input_file, &output_dir, direction.output_extension());
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping file, output already exists (use -f to force overwrite): {:?}",
                output_path
            );
            return Ok(output_path);
        }

        let content = FileManager::read_to_string(input_file)?;
        let converted = self.convert_string(&content, direction)?;
        FileManager::write_to_file(&output_path, &converted)?;

        info!("Converted {:?} -> {:?}", input_file, output_path);
        Ok(output_path)
    }

    /// Convert every subtitle or annotated text file under a directory,
    /// returning how many files were converted successfully.
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_files(input_dir, &["srt", "txt"])?;
        if files.is_empty() {
            warn!("No .srt or .txt files found in {:?}", input_dir);
            return Ok(0);
        }

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("#>-"),
        );

        let mut converted = 0;
        for file in &files {
            progress.set_message(
                file.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            match self.run(file, None, None, force_overwrite) {
                Ok(_) => converted += 1,
                Err(e) => error!("Error converting {:?}: {}", file, e),
            }
            progress.inc(1);
        }

        progress.finish_with_message(format!("{}/{} files converted", converted, files.len()));
        info!("Finished processing {} file(s)", files.len());
        Ok(converted)
    }
}
