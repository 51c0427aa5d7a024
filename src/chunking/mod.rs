/*!
 * Token-aware document chunking.
 *
 * - `tokens`: model to encoding table and token counters
 * - `json`: structure-preserving JSON chunker
 * - `text`: paragraph/line/sentence text chunker
 */

pub mod json;
pub mod text;
pub mod tokens;

use log::{debug, warn};
use serde_json::Value;

use crate::errors::ChunkError;

pub use json::{chunk_json, render_chunk};
pub use text::chunk_text;
pub use tokens::{count_tokens, Encoding, Model, TiktokenCounter, TokenCounter, MODEL_ENCODINGS};

/// Token budget for a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBudget {
    /// Upper bound on tokens per chunk (oversized single units excepted)
    pub max_tokens: usize,

    /// Model whose encoding measures the chunks
    pub model: Model,
}

impl ChunkBudget {
    pub fn new(max_tokens: usize, model: Model) -> Result<Self, ChunkError> {
        if max_tokens == 0 {
            return Err(ChunkError::InvalidBudget(max_tokens));
        }
        Ok(ChunkBudget { max_tokens, model })
    }

    /// Token counter for this budget's model
    pub fn counter(&self) -> Result<TiktokenCounter, ChunkError> {
        TiktokenCounter::for_model(self.model)
    }
}

/// How a document should be split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Text,
}

/// Split `content` into rendered chunks.
///
/// JSON content that fails to parse is chunked as text instead.
pub fn split_content(content: &str, kind: ContentKind, budget: &ChunkBudget) -> Result<Vec<String>, ChunkError> {
    let counter = budget.counter()?;
    debug!(
        "Chunking with max {} tokens ({} / {})",
        budget.max_tokens,
        budget.model,
        counter.encoding()
    );

    if kind == ContentKind::Json {
        match serde_json::from_str::<Value>(content) {
            Ok(value) => {
                return chunk_json(&value, budget.max_tokens, &counter)?
                    .iter()
                    .map(render_chunk)
                    .collect();
            }
            Err(e) => warn!("Content is not valid JSON ({}), chunking as text", e),
        }
    }

    Ok(chunk_text(content, budget.max_tokens, &counter)?
        .into_iter()
        .map(str::to_string)
        .collect())
}
