/*!
 * # svb2json - SBV subtitle conversion and token-aware chunking
 *
 * A Rust library behind two small command-line tools.
 *
 * ## Features
 *
 * - Parse YouTube SBV subtitles into ordered entries
 * - Merge entries into fixed time windows
 * - Render entries as JSON or as `[start–end] text` lines with
 *   configurable timestamp patterns
 * - Split JSON or text documents into chunks that fit a language-model
 *   token budget:
 *   - JSON arrays by element, objects by key, every chunk valid JSON
 *   - Text by paragraph, then line, then sentence, losslessly
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SBV parsing, merging and rendering
 * - `timestamp_format`: Timestamp patterns for text output
 * - `chunking`: Token-aware chunking:
 *   - `chunking::tokens`: Model to encoding table and token counting
 *   - `chunking::json`: JSON chunker
 *   - `chunking::text`: Text chunker
 * - `file_utils`: File system operations
 * - `logging`: Colored stderr logger
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
pub mod chunking;
pub mod errors;
pub mod file_utils;
pub mod logging;
pub mod subtitle_processor;
pub mod timestamp_format;

// Re-export main types for easier usage
pub use app_config::Config;
pub use chunking::{split_content, ChunkBudget, ContentKind, Model, TokenCounter};
pub use errors::{ChunkError, SubtitleError};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use timestamp_format::TimestampFormat;
