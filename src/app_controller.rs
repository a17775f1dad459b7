use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::dictionary::{Dictionary, Direction};
use crate::file_utils::FileManager;
use crate::providers::{self, Provider};
use crate::resolver::{Resolver, RetryPolicy, RunOptions, RunOutput};

// @module: Application controller for property file translation

/// Outcome of translating one input into one output file
#[derive(Debug)]
pub struct TranslationSummary {
    /// Where the input came from (file path, or `None` for text input)
    pub input: Option<PathBuf>,
    /// File the output was written to
    pub output_path: PathBuf,
    /// The resolved lines and counters
    pub output: RunOutput,
}

/// Outcome of translating a directory
#[derive(Debug, Default)]
pub struct FolderSummary {
    pub translated: Vec<TranslationSummary>,
    /// Inputs that aborted, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

/// Main application controller for property translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Fallback translation service
    provider: Arc<dyn Provider>,
    // @field: Draw a progress bar on stderr
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the provider named in the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let provider = providers::create_provider(&config.translation)
            .context("Failed to create translation provider")?;
        Ok(Self::with_provider(config, Arc::from(provider)))
    }

    // @method: Create a controller around an existing provider
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Self {
        Self {
            config,
            provider,
            show_progress: false,
        }
    }

    /// Enable or disable the progress bar
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dictionary direction for the configured language pair
    pub fn direction(&self) -> Option<Direction> {
        Direction::detect(
            &self.config.source_language,
            &self.config.target_language,
            &self.config.dictionary.from_language,
            &self.config.dictionary.to_language,
        )
    }

    /// Load the dictionary for one run
    pub fn load_dictionary(&self) -> Result<Dictionary> {
        let settings = &self.config.dictionary;
        Dictionary::load_or_empty(&settings.path, settings.strict)
            .context("Dictionary could not be loaded")
    }

    /// Run options derived from the configuration
    pub fn run_options(&self) -> RunOptions {
        let common = &self.config.translation.common;
        RunOptions::new(&self.config.source_language, &self.config.target_language)
            .with_direction(self.direction())
            .with_retry(RetryPolicy::new(common.retry_count, common.retry_backoff()))
            .with_untranslated_marker(common.untranslated_marker.clone())
    }

    fn build_resolver(&self) -> Result<Resolver> {
        let dictionary = self.load_dictionary()?;
        let options = self.run_options();

        match options.direction {
            Some(direction) => info!(
                "Using {} dictionary entries ({:?} direction)",
                dictionary.len(),
                direction
            ),
            None if !dictionary.is_empty() => warn!(
                "Dictionary covers {} -> {}, not used for {} -> {}",
                self.config.dictionary.from_language,
                self.config.dictionary.to_language,
                options.source_language,
                options.target_language
            ),
            None => {}
        }

        Ok(Resolver::new(dictionary, Arc::clone(&self.provider), options))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar
    }

    /// Translate already-split lines without writing anything
    pub async fn translate_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<RunOutput> {
        let resolver = self.build_resolver()?;
        let progress_bar = self.progress_bar(lines.len());
        let start_time = Instant::now();

        info!(
            "Translating {} lines from {} to {} with {}",
            lines.len(),
            self.config.source_language,
            self.config.target_language,
            self.provider.name()
        );

        let result = resolver
            .run_with_progress(lines, |_| progress_bar.inc(1))
            .await;
        progress_bar.finish_and_clear();

        let output = result?;
        info!(
            "{} in {}",
            output.report.summary(),
            Self::format_duration(start_time.elapsed())
        );
        for degraded in &output.report.degraded {
            warn!(
                "Untranslated line {} ({}): {}",
                degraded.line_number, degraded.key, degraded.last_error
            );
        }

        Ok(output)
    }

    /// Translate a raw text blob
    pub async fn translate_text(&self, text: &str) -> Result<RunOutput> {
        if text.trim().is_empty() {
            return Err(anyhow!("Input text is empty"));
        }
        self.translate_lines(&FileManager::split_lines(text)).await
    }

    /// Translate one file
    pub async fn translate_file<P: AsRef<Path>>(&self, input_file: P) -> Result<RunOutput> {
        let input_file = input_file.as_ref();
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let lines = FileManager::read_lines(input_file)?;
        self.translate_lines(&lines)
            .await
            .with_context(|| format!("Translation of {:?} failed", input_file))
    }

    /// Write a finished run to a fresh file in the configured output directory
    pub fn save_output(&self, output: &RunOutput, stem: Option<&str>) -> Result<PathBuf> {
        let output_dir = Path::new(&self.config.output.directory);
        FileManager::ensure_dir(output_dir)?;

        let output_path = FileManager::generate_output_path(
            output_dir,
            stem,
            &self.config.source_language,
            &self.config.target_language,
        );
        FileManager::write_new_file(&output_path, output.output_lines())?;

        Ok(output_path)
    }

    /// Translate a text blob and save the result
    pub async fn run_text(&self, text: &str) -> Result<TranslationSummary> {
        let output = self.translate_text(text).await?;
        let output_path = self.save_output(&output, None)?;
        info!("Translation saved to {:?}", output_path);

        Ok(TranslationSummary {
            input: None,
            output_path,
            output,
        })
    }

    /// Translate one file and save the result
    pub async fn run(&self, input_file: PathBuf) -> Result<TranslationSummary> {
        let output = self.translate_file(&input_file).await?;
        let output_path = self.save_output(&output, None)?;
        info!("Translation saved to {:?}", output_path);

        Ok(TranslationSummary {
            input: Some(input_file),
            output_path,
            output,
        })
    }

    /// Translate every matching file in a directory. A file that aborts is
    /// reported and skipped.
    pub async fn run_folder(&self, input_dir: PathBuf) -> Result<FolderSummary> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let output_dir = Path::new(&self.config.output.directory);
        let output_dir = output_dir.canonicalize().unwrap_or_else(|_| output_dir.to_path_buf());

        let files: Vec<PathBuf> = FileManager::find_files(&input_dir, &self.config.output.extensions)?
            .into_iter()
            .filter(|path| {
                path.canonicalize()
                    .map(|p| !p.starts_with(&output_dir))
                    .unwrap_or(true)
            })
            .collect();

        if files.is_empty() {
            warn!("No files with extensions {:?} in {:?}", self.config.output.extensions, input_dir);
        }

        let mut summary = FolderSummary::default();
        for path in files {
            info!("Processing {:?}", path);

            let stem = path.file_stem().map(|s| s.to_string_lossy().to_string());
            let result = match self.translate_file(&path).await {
                Ok(output) => self
                    .save_output(&output, stem.as_deref())
                    .map(|output_path| (output, output_path)),
                Err(e) => Err(e),
            };

            match result {
                Ok((output, output_path)) => {
                    info!("Translation saved to {:?}", output_path);
                    summary.translated.push(TranslationSummary {
                        input: Some(path),
                        output_path,
                        output,
                    });
                }
                Err(e) => {
                    error!("Skipping {:?}: {:#}", path, e);
                    summary.failed.push((path, format!("{:#}", e)));
                }
            }
        }

        info!(
            "Finished processing {} files ({} failed)",
            summary.translated.len() + summary.failed.len(),
            summary.failed.len()
        );

        Ok(summary)
    }

    // @formats: Duration as human-readable text
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let millis = duration.subsec_millis();

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else if seconds > 0 {
            format!("{}.{:03}s", seconds, millis)
        } else {
            format!("{}ms", millis)
        }
    }
}
