/*!
 * Line translation resolver.
 *
 * This module contains the per-line translation policy:
 * - `resolver::line`: structural classification of raw lines
 * - `resolver::fallback`: machine translation with retry and graceful degrade
 * - `resolver::orchestrator`: the sequential run with duplicate detection and
 *   dictionary resolution
 */

pub mod fallback;
pub mod line;
pub mod orchestrator;

pub use fallback::{FallbackOutcome, FallbackTranslator, RetryPolicy};
pub use line::{classify_line, Entry, LineRecord};
pub use orchestrator::{
    DegradedLine, Resolution, ResolvedLine, Resolver, Run, RunOptions, RunOutput, RunReport,
    RunState,
};
