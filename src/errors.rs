/*!
 * Error types for the svb2json tools.
 *
 * This module contains custom error types for the subtitle and chunking
 * pipelines, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp line (or a line where one was expected) could not be parsed
    #[error("Parse error at line {line}: {reason}: {content:?}")]
    Parse {
        /// 1-based line number in the source document
        line: usize,
        /// The offending line, verbatim
        content: String,
        /// What was wrong with it
        reason: String,
    },

    /// A timestamp pattern contained a token we do not know how to render
    #[error("Unrecognized timestamp format token: {token:?}")]
    Format {
        /// The unrecognized pattern component
        token: String,
    },

    /// Merge window requested on the command line was not positive
    #[error("Merge duration must be positive, got {0}")]
    InvalidMergeWindow(i64),
}

/// Errors that can occur while splitting a document into token-bounded chunks
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Top-level JSON value is neither an array nor an object
    #[error("Unsupported JSON structure: top-level value is a {kind}, expected an array or object")]
    UnsupportedStructure {
        /// JSON kind of the top-level value
        kind: &'static str,
    },

    /// The tokenizer for an encoding could not be loaded
    #[error("Failed to load {encoding} tokenizer: {message}")]
    Tokenizer {
        /// Encoding name, e.g. cl100k_base
        encoding: &'static str,
        /// Underlying loader error
        message: String,
    },

    /// A token budget of zero cannot hold anything
    #[error("Token budget must be positive, got {0}")]
    InvalidBudget(usize),

    /// Content announced as JSON could not be parsed or serialized
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
