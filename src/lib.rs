/*!
 * # ruslate - Russian-to-English source tree rewriter
 *
 * A Rust library for in-place machine translation of Cyrillic text embedded
 * in shell scripts and README files.
 *
 * ## Features
 *
 * - Walk a directory tree and find shell-like scripts and READMEs
 * - Classify each line into translatable spans and opaque structure
 * - Translate only Cyrillic-bearing spans, preserving quoting, comment
 *   markers, markdown prefixes, shebangs and code fences byte-for-byte
 * - Code-like suppression for variables, paths, and IP addresses
 * - Legacy-encoding support (UTF-8, Windows-1251, Latin-1) with
 *   round-tripping on write
 * - Sequential, rate-limited calls to the translation backend
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `scanner`: Candidate file discovery
 * - `encoding`: Candidate-encoding probing and line handling
 * - `rewriter`: Span classification and line rewriting
 * - `translation_service`: Retry, backoff, and rate limiting around providers
 * - `providers`: Translation backend clients:
 *   - `providers::google`: Google web endpoint client
 *   - `providers::mock`: Mock collaborator for tests
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoding;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod rewriter;
pub mod scanner;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary, run_with_translator};
pub use encoding::{SourceFile, SourceLine, TextEncoding};
pub use errors::{AppError, DecodeError, ProviderError, TranslationError};
pub use rewriter::{LineRewriter, SkipRules, contains_cyrillic};
pub use scanner::{FileKind, Scanner};
pub use translation_service::{Translate, TranslationService};
