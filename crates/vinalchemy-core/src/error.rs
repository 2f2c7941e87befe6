use thiserror::Error;

/// Core error type shared across Vinalchemy crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The taxonomy tables violate internal invariants.
    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

/// Convenience alias for results returned by Vinalchemy crates.
pub type Result<T> = std::result::Result<T, Error>;
