/*!
 * # proptrans - dictionary-first property file translator
 *
 * A Rust library for translating the values of `key=value` property files
 * between languages.
 *
 * ## Features
 *
 * - Strict line validation: malformed lines and duplicate keys abort a run
 * - User dictionary lookups (exact, then case-insensitive) before any
 *   machine translation
 * - Machine translation providers:
 *   - Google Translate web endpoint
 *   - Ollama (local LLM)
 * - Bounded retries with a fixed backoff; values that still fail are kept
 *   untranslated instead of failing the run
 * - Timestamped output files, single file, directory or text input
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `resolver`: The per-line translation policy:
 *   - `resolver::line`: Line classification
 *   - `resolver::fallback`: Provider calls with retry and degrade
 *   - `resolver::orchestrator`: Sequential run with duplicate detection
 * - `dictionary`: Dictionary loading and lookup, translation direction
 * - `providers`: Machine translation clients
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dictionary;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod resolver;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use dictionary::{Dictionary, DictionaryHit, Direction};
pub use errors::{DictionaryError, ProviderError, ResolveError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part1};
pub use resolver::{Resolver, RetryPolicy, RunOptions, RunOutput, RunReport, RunState};
