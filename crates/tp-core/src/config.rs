use serde::{Deserialize, Serialize};

/// Output encoding for the format selector.
///
/// `Shortest` is a pseudo-format: it encodes under every concrete format and
/// keeps the candidate with the fewest model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Json5,
    Yaml,
    Shortest,
}

impl Format {
    /// The concrete encodings, in tie-break order for `Shortest`.
    pub fn concrete() -> [Format; 3] {
        [Format::Json, Format::Json5, Format::Yaml]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Json5 => "json5",
            Format::Yaml => "yaml",
            Format::Shortest => "shortest",
        }
    }
}

/// Defaults applied at the call boundary. Plain value, never mutated in
/// place; each call threads its own effective configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokpackConfig {
    pub default_format: Format,
    pub default_model: String,
}

impl Default for TokpackConfig {
    fn default() -> Self {
        Self {
            default_format: Format::Json5,
            default_model: "gpt-4".into(),
        }
    }
}
