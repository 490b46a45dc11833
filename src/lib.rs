/*!
 * # srtext - SRT / annotated text interconversion
 *
 * A Rust library for converting between SubRip (SRT) subtitle files and a
 * human-readable annotated text form.
 *
 * ## Features
 *
 * - Parse SRT content into structured subtitle entries
 * - Render entries as labeled, human-readable annotated text
 * - Parse annotated text (English or Chinese labels) back into entries
 * - Render entries as valid SRT with sequential numbering
 * - Synthesize plausible timecodes for entries that carry none
 * - Best-effort parsing: malformed blocks are skipped, never fatal
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Millisecond / `HH:MM:SS,mmm` timestamp codec and patterns
 * - `srt_processor`: SRT parsing and annotated-text rendering
 * - `text_processor`: Annotated-text parsing, SRT rendering and timecode
 *   synthesis
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
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
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod srt_processor;
pub mod text_processor;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, Direction};
pub use errors::{AppError, SubtitleError};
pub use srt_processor::{parse_srt, convert_to_text, ParseReport, SubtitleEntry};
pub use text_processor::{convert_to_srt, generate_time_codes, parse_text, TextEntry};
