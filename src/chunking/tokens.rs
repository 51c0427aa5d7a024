/*!
 * Token counting for language-model budgets.
 *
 * Each supported [`Model`] resolves to exactly one BPE [`Encoding`] through
 * the fixed [`MODEL_ENCODINGS`] table. Tokenizers are loaded lazily, once per
 * encoding, and shared for the lifetime of the process.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tiktoken_rs::CoreBPE;

use crate::errors::ChunkError;

/// Language model whose tokenizer defines the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Model {
    #[serde(rename = "GPT-3")]
    Gpt3,
    #[serde(rename = "GPT-3.5")]
    Gpt35,
    #[serde(rename = "GPT-4")]
    Gpt4,
    #[serde(rename = "GPT-4O")]
    Gpt4o,
    #[default]
    #[serde(rename = "GPT5")]
    Gpt5,
    #[serde(rename = "CODEX")]
    Codex,
}

/// Tokenization scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Cl100kBase,
    O200kBase,
    P50kBase,
}

/// Model to encoding lookup, indexed by `Model as usize`.
///
/// Adding a model means adding a variant and a row here.
pub const MODEL_ENCODINGS: [(Model, Encoding); 6] = [
    (Model::Gpt3, Encoding::P50kBase),
    (Model::Gpt35, Encoding::Cl100kBase),
    (Model::Gpt4, Encoding::Cl100kBase),
    (Model::Gpt4o, Encoding::O200kBase),
    (Model::Gpt5, Encoding::O200kBase),
    (Model::Codex, Encoding::P50kBase),
];

impl Model {
    /// All supported models, in table order
    pub fn all() -> impl Iterator<Item = Model> {
        MODEL_ENCODINGS.iter().map(|(model, _)| *model)
    }

    /// The encoding this model tokenizes with
    pub fn encoding(self) -> Encoding {
        MODEL_ENCODINGS[self as usize].1
    }

    // @returns: Canonical model name as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gpt3 => "GPT-3",
            Self::Gpt35 => "GPT-3.5",
            Self::Gpt4 => "GPT-4",
            Self::Gpt4o => "GPT-4O",
            Self::Gpt5 => "GPT5",
            Self::Codex => "CODEX",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Model names are matched case-insensitively
impl FromStr for Model {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Model::all()
            .find(|model| model.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Invalid model: {}", s))
    }
}

static CL100K_BASE: OnceCell<CoreBPE> = OnceCell::new();
static O200K_BASE: OnceCell<CoreBPE> = OnceCell::new();
static P50K_BASE: OnceCell<CoreBPE> = OnceCell::new();

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cl100kBase => "cl100k_base",
            Self::O200kBase => "o200k_base",
            Self::P50kBase => "p50k_base",
        }
    }

    // @returns: Shared tokenizer, loaded on first use
    fn bpe(self) -> Result<&'static CoreBPE, ChunkError> {
        let cell = match self {
            Self::Cl100kBase => &CL100K_BASE,
            Self::O200kBase => &O200K_BASE,
            Self::P50kBase => &P50K_BASE,
        };

        cell.get_or_try_init(|| {
            let loaded = match self {
                Self::Cl100kBase => tiktoken_rs::cl100k_base(),
                Self::O200kBase => tiktoken_rs::o200k_base(),
                Self::P50kBase => tiktoken_rs::p50k_base(),
            };
            loaded.map_err(|e| ChunkError::Tokenizer {
                encoding: self.name(),
                message: e.to_string(),
            })
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Anything that can measure text in tokens.
///
/// Implementations must be deterministic and return 0 for the empty string.
pub trait TokenCounter {
    fn count(&self, text: &str) -> usize;
}

/// Token counter backed by a tiktoken BPE encoding
#[derive(Clone, Copy)]
pub struct TiktokenCounter {
    encoding: Encoding,
    bpe: &'static CoreBPE,
}

impl TiktokenCounter {
    pub fn for_model(model: Model) -> Result<Self, ChunkError> {
        Self::for_encoding(model.encoding())
    }

    pub fn for_encoding(encoding: Encoding) -> Result<Self, ChunkError> {
        Ok(TiktokenCounter {
            encoding,
            bpe: encoding.bpe()?,
        })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_ordinary(text).len()
    }
}

impl fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Count tokens of `text` as seen by `model`
pub fn count_tokens(text: &str, model: Model) -> Result<usize, ChunkError> {
    Ok(TiktokenCounter::for_model(model)?.count(text))
}
