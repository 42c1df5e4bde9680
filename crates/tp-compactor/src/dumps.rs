//! Format selection — serialize a value and keep the cheapest encoding.
//!
//! `Format::Shortest` encodes under json, json5, and yaml, counts model
//! tokens for each candidate, and returns the minimum. Ties resolve to the
//! earliest format in that fixed order.

use serde::Serialize;
use serde_json::Value;

use tp_core::config::Format;
use tp_core::error::{Result, TokpackError};
use tp_core::tokenizer::{self, Tokenizer};
use tp_core::TokpackConfig;

/// Serialize `value` under `format`.
///
/// A tokenizer is only consulted for `Format::Shortest`; passing `None`
/// there fails with `DependencyUnavailable` rather than silently falling
/// back to a concrete format.
pub fn dumps(value: &Value, format: Format, tokenizer: Option<&dyn Tokenizer>) -> Result<String> {
    match format {
        Format::Json => encode_json(value),
        Format::Json5 => json5::to_string(value).map_err(|e| TokpackError::Encoding {
            format: "json5",
            path: ".".into(),
            message: e.to_string(),
        }),
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| TokpackError::Encoding {
            format: "yaml",
            path: ".".into(),
            message: e.to_string(),
        }),
        Format::Shortest => {
            let tokenizer = tokenizer.ok_or_else(|| TokpackError::DependencyUnavailable {
                capability: "tokenizer".into(),
            })?;
            shortest(value, tokenizer)
        }
    }
}

/// Serialize a typed data model: flatten to a plain value first (field order
/// follows declaration order), then encode.
pub fn dumps_model<T: Serialize>(
    model: &T,
    format: Format,
    tokenizer: Option<&dyn Tokenizer>,
) -> Result<String> {
    let value = serde_json::to_value(model)?;
    dumps(&value, format, tokenizer)
}

/// Serialize using a configuration's default format and model. A tokenizer
/// is resolved from the default model only when the default format needs one.
pub fn dumps_with(value: &Value, config: &TokpackConfig) -> Result<String> {
    match config.default_format {
        Format::Shortest => {
            let tokenizer = tokenizer::for_model(&config.default_model)?;
            dumps(value, Format::Shortest, Some(tokenizer.as_ref()))
        }
        format => dumps(value, format, None),
    }
}

fn shortest(value: &Value, tokenizer: &dyn Tokenizer) -> Result<String> {
    let [first, rest @ ..] = Format::concrete();
    let mut best = dumps(value, first, None)?;
    let mut fewest = tokenizer.count_tokens(&best);
    for format in rest {
        let candidate = dumps(value, format, None)?;
        let count = tokenizer.count_tokens(&candidate);
        // Strict comparison keeps the earliest format on a tie.
        if count < fewest {
            best = candidate;
            fewest = count;
        }
    }
    Ok(best)
}

fn encode_json(value: &Value) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::new(&mut out);
    serde_path_to_error::serialize(value, &mut serializer).map_err(|e| {
        let path = e.path().to_string();
        TokpackError::Encoding {
            format: "json",
            path,
            message: e.into_inner().to_string(),
        }
    })?;
    String::from_utf8(out).map_err(|e| TokpackError::Other(anyhow::anyhow!(e)))
}
