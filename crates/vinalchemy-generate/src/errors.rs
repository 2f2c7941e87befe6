use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<vinalchemy_core::Error> for GenerationError {
    fn from(value: vinalchemy_core::Error) -> Self {
        match value {
            vinalchemy_core::Error::InvalidTaxonomy(message) => {
                GenerationError::InvalidTaxonomy(message)
            }
        }
    }
}
