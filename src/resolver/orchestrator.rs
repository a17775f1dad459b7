/*!
 * Sequential run over the lines of one input.
 *
 * A run moves `Ready -> Processing(n) -> ... -> Done`, or stops in `Failed`
 * at the first malformed line or duplicate key. Blank lines go straight to
 * the output; entries pass the duplicate guard, then the dictionary, then
 * the fallback translator.
 */

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, error, trace, warn};

use crate::dictionary::{Dictionary, DictionaryHit, Direction};
use crate::errors::ResolveError;
use crate::providers::Provider;

use super::fallback::{FallbackOutcome, FallbackTranslator, RetryPolicy};
use super::line::{classify_line, Entry, LineRecord};

/// Explicit run parameters
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Language of the input values
    pub source_language: String,
    /// Language to translate into
    pub target_language: String,
    /// Dictionary direction, `None` when the dictionary does not apply
    pub direction: Option<Direction>,
    /// Retry policy for the fallback translator
    pub retry: RetryPolicy,
    /// Suffix for values that could not be translated
    pub untranslated_marker: Option<String>,
}

impl RunOptions {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            direction: None,
            retry: RetryPolicy::default(),
            untranslated_marker: None,
        }
    }

    pub fn with_direction(mut self, direction: Option<Direction>) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_untranslated_marker(mut self, marker: Option<String>) -> Self {
        self.untranslated_marker = marker;
        self
    }
}

/// Where a run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Ready,
    /// Working on the given 1-based line
    Processing(usize),
    Failed(ResolveError),
    Done,
}

/// How one line got its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Blank,
    DictionaryExact,
    DictionaryCaseInsensitive,
    Translated,
    /// Translation failed and the original value was kept
    Degraded,
}

/// One output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub line_number: usize,
    /// Output text including its trailing newline
    pub text: String,
    pub resolution: Resolution,
}

/// An entry whose value had to be passed through untranslated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedLine {
    pub line_number: usize,
    pub key: String,
    pub value: String,
    pub last_error: String,
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub blank_lines: usize,
    pub entries: usize,
    pub exact_hits: usize,
    pub case_insensitive_hits: usize,
    pub translated: usize,
    pub degraded: Vec<DegradedLine>,
}

impl RunReport {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Blank => self.blank_lines += 1,
            Resolution::DictionaryExact => self.exact_hits += 1,
            Resolution::DictionaryCaseInsensitive => self.case_insensitive_hits += 1,
            Resolution::Translated => self.translated += 1,
            // pushed to `degraded` by the caller
            Resolution::Degraded => {}
        }
        if resolution != Resolution::Blank {
            self.entries += 1;
        }
    }

    /// Total lines seen
    pub fn total_lines(&self) -> usize {
        self.blank_lines + self.entries
    }

    /// Entries answered by the dictionary
    pub fn dictionary_hits(&self) -> usize {
        self.exact_hits + self.case_insensitive_hits
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "{} lines: {} entries, {} blank; {} dictionary hits ({} case-insensitive), {} translated, {} untranslated",
            self.total_lines(),
            self.entries,
            self.blank_lines,
            self.dictionary_hits(),
            self.case_insensitive_hits,
            self.translated,
            self.degraded.len()
        )
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Final state of the run, always `Done`
    pub state: RunState,
    pub lines: Vec<ResolvedLine>,
    pub report: RunReport,
}

impl RunOutput {
    /// The output lines, each with its newline
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// The whole output as one string
    pub fn text(&self) -> String {
        self.output_lines().collect()
    }
}

/// Resolves property lines against a dictionary and a provider
#[derive(Debug)]
pub struct Resolver {
    dictionary: Dictionary,
    provider: Arc<dyn Provider>,
    options: RunOptions,
}

impl Resolver {
    pub fn new(dictionary: Dictionary, provider: Arc<dyn Provider>, options: RunOptions) -> Self {
        Self {
            dictionary,
            provider,
            options,
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Begin a run with an empty seen-key set
    pub fn start(&self) -> Run<'_> {
        Run {
            resolver: self,
            state: RunState::Ready,
            seen_keys: HashSet::new(),
            lines: Vec::new(),
            report: RunReport::default(),
        }
    }

    /// Resolve every line in order
    pub async fn run<S: AsRef<str>>(&self, lines: &[S]) -> Result<RunOutput, ResolveError> {
        self.run_with_progress(lines, |_| {}).await
    }

    /// Resolve every line in order, calling `on_line` with the 1-based number
    /// of each finished line
    pub async fn run_with_progress<S, F>(
        &self,
        lines: &[S],
        mut on_line: F,
    ) -> Result<RunOutput, ResolveError>
    where
        S: AsRef<str>,
        F: FnMut(usize),
    {
        let mut run = self.start();
        for raw in lines {
            let line_number = run.feed(raw.as_ref()).await?.line_number;
            on_line(line_number);
        }
        run.finish()
    }
}

/// One pass over an input; owns the seen-key set
#[derive(Debug)]
pub struct Run<'r> {
    resolver: &'r Resolver,
    state: RunState,
    seen_keys: HashSet<String>,
    lines: Vec<ResolvedLine>,
    report: RunReport,
}

impl Run<'_> {
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Process the next raw line. After a failure every call returns the
    /// same error.
    pub async fn feed(&mut self, raw: &str) -> Result<&ResolvedLine, ResolveError> {
        if let RunState::Failed(e) = &self.state {
            return Err(e.clone());
        }

        let line_number = self.lines.len() + 1;
        self.state = RunState::Processing(line_number);
        trace!("Processing line {}", line_number);

        match self.resolve_line(raw, line_number).await {
            Ok(line) => {
                self.lines.push(line);
                Ok(&self.lines[self.lines.len() - 1])
            }
            Err(e) => {
                error!("{}", e);
                self.state = RunState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Close the run. The output carries the final `Done` state.
    pub fn finish(self) -> Result<RunOutput, ResolveError> {
        if let RunState::Failed(e) = self.state {
            return Err(e);
        }

        Ok(RunOutput {
            state: RunState::Done,
            lines: self.lines,
            report: self.report,
        })
    }

    async fn resolve_line(&mut self, raw: &str, line_number: usize) -> Result<ResolvedLine, ResolveError> {
        let entry = match classify_line(raw, line_number)? {
            LineRecord::Blank => {
                self.report.record(Resolution::Blank);
                return Ok(ResolvedLine {
                    line_number,
                    text: "\n".to_string(),
                    resolution: Resolution::Blank,
                });
            }
            LineRecord::Entry(entry) => entry,
        };

        if !self.seen_keys.insert(entry.key.clone()) {
            return Err(ResolveError::DuplicateKey {
                key: entry.key,
                line_number,
            });
        }

        let (value, resolution) = self.resolve_entry(&entry).await;
        self.report.record(resolution);

        Ok(ResolvedLine {
            line_number,
            text: format!("{}={}\n", entry.key, value),
            resolution,
        })
    }

    async fn resolve_entry(&mut self, entry: &Entry) -> (String, Resolution) {
        let resolver = self.resolver;
        let options = &resolver.options;

        if let Some(direction) = options.direction {
            match direction.resolve(&resolver.dictionary, entry) {
                Some(DictionaryHit::Exact(translation)) => {
                    debug!("Line {}: dictionary hit for '{}'", entry.line_number, direction.lookup_text(entry));
                    return (translation.to_string(), Resolution::DictionaryExact);
                }
                Some(DictionaryHit::CaseInsensitive { matched_key, translation }) => {
                    debug!(
                        "Line {}: case-insensitive dictionary hit '{}' for '{}'",
                        entry.line_number,
                        matched_key,
                        direction.lookup_text(entry)
                    );
                    return (translation.to_string(), Resolution::DictionaryCaseInsensitive);
                }
                None => {}
            }
        }

        let translator = FallbackTranslator::new(resolver.provider.as_ref(), options.retry.clone());
        match translator
            .translate(&entry.value, &options.source_language, &options.target_language)
            .await
        {
            FallbackOutcome::Translated { text, .. } => (text, Resolution::Translated),
            FallbackOutcome::Degraded { original, attempts, last_error } => {
                warn!(
                    "Line {}: keeping '{}' untranslated after {} attempt(s): {}",
                    entry.line_number, original, attempts, last_error
                );
                self.report.degraded.push(DegradedLine {
                    line_number: entry.line_number,
                    key: entry.key.clone(),
                    value: original.clone(),
                    last_error,
                });
                let value = match &options.untranslated_marker {
                    Some(marker) => format!("{}{}", original, marker),
                    None => original,
                };
                (value, Resolution::Degraded)
            }
        }
    }
}
