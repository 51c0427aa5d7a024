/*!
 * JSON chunking.
 *
 * Splits a top-level array by elements or a top-level object by key/value
 * pairs, packing units greedily while the pretty-printed chunk stays within
 * the token budget. A unit that is over budget on its own is emitted alone,
 * never truncated.
 */

use log::{debug, warn};
use serde_json::{Map, Value};

use super::tokens::TokenCounter;
use crate::errors::ChunkError;

/// Serialize a chunk exactly as it is measured and written
pub fn render_chunk(value: &Value) -> Result<String, ChunkError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Name of the JSON kind of a value, for error reporting
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Split a JSON array or object into chunks of at most `max_tokens` tokens.
///
/// Every chunk has the same top-level kind as the input and chunk order
/// follows input order. Empty containers yield no chunks.
pub fn chunk_json<C: TokenCounter + ?Sized>(
    value: &Value,
    max_tokens: usize,
    counter: &C,
) -> Result<Vec<Value>, ChunkError> {
    if max_tokens == 0 {
        return Err(ChunkError::InvalidBudget(max_tokens));
    }

    let chunks = match value {
        Value::Array(items) => pack_units(items.to_vec(), max_tokens, counter, |units: &[Value]| {
            Value::Array(units.to_vec())
        })?,
        Value::Object(map) => {
            let pairs: Vec<(String, Value)> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            pack_units(pairs, max_tokens, counter, |units: &[(String, Value)]| {
                Value::Object(units.iter().cloned().collect::<Map<String, Value>>())
            })?
        }
        other => {
            return Err(ChunkError::UnsupportedStructure {
                kind: json_kind(other),
            });
        }
    };

    debug!("Split JSON {} into {} chunk(s)", json_kind(value), chunks.len());
    Ok(chunks)
}

// @algorithm: Greedy order-preserving packing, measured on the serialized chunk
fn pack_units<U, C, F>(units: Vec<U>, max_tokens: usize, counter: &C, build: F) -> Result<Vec<Value>, ChunkError>
where
    C: TokenCounter + ?Sized,
    F: Fn(&[U]) -> Value,
{
    let measure = |units: &[U]| -> Result<usize, ChunkError> { Ok(counter.count(&render_chunk(&build(units))?)) };

    let mut chunks = Vec::new();
    let mut current: Vec<U> = Vec::new();

    for unit in units {
        current.push(unit);
        if measure(&current)? <= max_tokens {
            continue;
        }

        if current.len() > 1 {
            // Close what fit and carry the overflowing unit into a fresh chunk
            let overflow = current.pop();
            chunks.push(build(&current));
            current.clear();
            current.extend(overflow);

            if measure(&current)? <= max_tokens {
                continue;
            }
        }

        warn!(
            "Chunk {} holds a single unit larger than the {} token budget",
            chunks.len() + 1,
            max_tokens
        );
        chunks.push(build(&current));
        current.clear();
    }

    if !current.is_empty() {
        chunks.push(build(&current));
    }

    Ok(chunks)
}
