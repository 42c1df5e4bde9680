//! TokPack compactor — reduces the token footprint of structured data and
//! schemas used as LLM prompt input.
//!
//! Components:
//! 1. Schema compaction — JSON Schema → minimal TypeScript-like type text
//! 2. Format selection — serialize under json/json5/yaml, keep the fewest tokens
//! 3. Prompt parameterization — repeated identifier values → `$id<N>` placeholders

pub mod dumps;
pub mod params;
pub mod schema;

pub use dumps::{dumps, dumps_model, dumps_with};
pub use params::{deparameterize, parameterize, ParamValue, ParameterMapping};
pub use schema::{compact, SchemaOptions};

#[cfg(feature = "schemars")]
pub use schema::compact_model;
