//! TokPack core — shared infrastructure for the prompt footprint reducers.
//!
//! Holds the error taxonomy, the caller-threaded configuration record, and
//! the pluggable tokenizer used by the format selector.

pub mod config;
pub mod error;
pub mod tokenizer;

pub use config::{Format, TokpackConfig};
pub use error::{Result, TokpackError};
pub use tokenizer::Tokenizer;
