/*!
 * Plain-text chunking.
 *
 * Units are paragraphs (runs of non-blank lines plus the blank lines that
 * follow them). A paragraph over budget is broken into lines, and a line over
 * budget into sentences. Units are contiguous slices of the input, so the
 * chunks concatenate back to the original text byte for byte.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::TokenCounter;
use crate::errors::ChunkError;

// @const: Sentence end: terminal punctuation followed by whitespace
static SENTENCE_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split text into chunks of at most `max_tokens` tokens.
///
/// Empty text yields no chunks.
pub fn chunk_text<'a, C: TokenCounter + ?Sized>(
    text: &'a str,
    max_tokens: usize,
    counter: &C,
) -> Result<Vec<&'a str>, ChunkError> {
    if max_tokens == 0 {
        return Err(ChunkError::InvalidBudget(max_tokens));
    }

    let units = atomic_units(text, max_tokens, counter);

    let mut chunks = Vec::new();
    // Current chunk is text[start..end]
    let mut start = 0;
    let mut end = 0;

    for unit in units {
        let unit_end = end + unit.len();

        if end > start {
            if counter.count(&text[start..unit_end]) <= max_tokens {
                end = unit_end;
                continue;
            }
            chunks.push(&text[start..end]);
            start = end;
        }

        end = unit_end;
        if counter.count(&text[start..end]) > max_tokens {
            warn!(
                "Chunk {} holds a single unit larger than the {} token budget",
                chunks.len() + 1,
                max_tokens
            );
            chunks.push(&text[start..end]);
            start = end;
        }
    }

    if end > start {
        chunks.push(&text[start..end]);
    }

    debug!("Split {} bytes of text into {} chunk(s)", text.len(), chunks.len());
    Ok(chunks)
}

/// Finest units needed to respect the budget, in document order
fn atomic_units<'a, C: TokenCounter + ?Sized>(text: &'a str, max_tokens: usize, counter: &C) -> Vec<&'a str> {
    let mut units = Vec::new();

    for paragraph in split_paragraphs(text) {
        if counter.count(paragraph) <= max_tokens {
            units.push(paragraph);
            continue;
        }
        for line in paragraph.split_inclusive('\n') {
            if counter.count(line) <= max_tokens {
                units.push(line);
            } else {
                units.extend(split_sentences(line));
            }
        }
    }

    units
}

/// Paragraphs with their trailing blank lines; leading blank lines stay with the first one
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut unit_start = 0;
    let mut offset = 0;
    let mut seen_content = false;
    let mut prev_blank = false;

    for line in text.split_inclusive('\n') {
        let blank = line.trim().is_empty();
        if !blank && prev_blank && seen_content {
            paragraphs.push(&text[unit_start..offset]);
            unit_start = offset;
        }
        seen_content |= !blank;
        prev_blank = blank;
        offset += line.len();
    }

    if unit_start < text.len() {
        paragraphs.push(&text[unit_start..]);
    }
    paragraphs
}

/// Sentences of a line, each keeping its punctuation and following whitespace
pub fn split_sentences(line: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END_REGEX.find_iter(line) {
        sentences.push(&line[start..m.end()]);
        start = m.end();
    }

    if start < line.len() {
        sentences.push(&line[start..]);
    }
    sentences
}
