use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokpackError {
    #[error("Unresolvable $ref target: {target}")]
    MalformedReference { target: String },
    #[error("{format} encoding failed at {path}: {message}")]
    Encoding {
        format: &'static str,
        path: String,
        message: String,
    },
    #[error("Missing dependency: {capability}")]
    DependencyUnavailable { capability: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TokpackError>;
