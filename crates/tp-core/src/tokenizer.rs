//! Pluggable token counting.
//!
//! The format selector only ever consumes a count, so the seam is a single
//! `count_tokens` call. The real tokenizer (`tiktoken-rs`) sits behind the
//! `tiktoken` cargo feature; `HeuristicTokenizer` is an always-available
//! estimator callers may pass explicitly. It is never used as a silent
//! fallback when a model-accurate count was requested.

use std::sync::Arc;

use crate::error::{Result, TokpackError};

pub trait Tokenizer: Send + Sync {
    /// Number of model tokens in `text`.
    fn count_tokens(&self, text: &str) -> usize;
    fn name(&self) -> &str;
}

/// Resolve a tokenizer for a model identifier.
///
/// Fails with `DependencyUnavailable` when the `tiktoken` feature is off or
/// the model has no known encoding.
#[cfg(feature = "tiktoken")]
pub fn for_model(model: &str) -> Result<Arc<dyn Tokenizer>> {
    Ok(Arc::new(TiktokenTokenizer::for_model(model)?))
}

#[cfg(not(feature = "tiktoken"))]
pub fn for_model(model: &str) -> Result<Arc<dyn Tokenizer>> {
    let _ = model;
    Err(TokpackError::DependencyUnavailable {
        capability: "tokenizer (enable the `tiktoken` feature)".into(),
    })
}

/// BPE tokenizer backed by `tiktoken-rs`.
#[cfg(feature = "tiktoken")]
pub struct TiktokenTokenizer {
    bpe: tiktoken_rs::CoreBPE,
}

#[cfg(feature = "tiktoken")]
impl TiktokenTokenizer {
    pub fn for_model(model: &str) -> Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|_| {
            TokpackError::DependencyUnavailable {
                capability: format!("tokenizer for model {model}"),
            }
        })?;
        Ok(Self { bpe })
    }
}

#[cfg(feature = "tiktoken")]
impl Tokenizer for TiktokenTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
    fn name(&self) -> &str {
        "tiktoken"
    }
}

/// Segment-based token estimator (no model data required).
///
/// Whitespace runs count 0, digit runs and short words count 1, longer words
/// count ceil(len / 4). Accurate enough for relative comparisons in tests
/// and offline tooling.
pub struct HeuristicTokenizer;

/// Average characters per token for long alphanumeric segments.
const CHARS_PER_TOKEN: f64 = 4.0;

/// Word length at or below which a segment counts as one token.
const SHORT_WORD_LEN: usize = 6;

static SEGMENT_PATTERN: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"(\s+|[^\s\w]+|\w+)").unwrap());

impl Tokenizer for HeuristicTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        SEGMENT_PATTERN
            .find_iter(text)
            .map(|m| estimate_segment(m.as_str()))
            .sum()
    }
    fn name(&self) -> &str {
        "heuristic"
    }
}

fn estimate_segment(segment: &str) -> usize {
    if segment.chars().all(char::is_whitespace) {
        return 0;
    }
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        return 1;
    }
    if segment.len() <= SHORT_WORD_LEN {
        return 1;
    }
    (segment.len() as f64 / CHARS_PER_TOKEN).ceil() as usize
}
