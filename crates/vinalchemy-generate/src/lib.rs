//! Seeded generation engine for the Vinalchemy wine orders fixture.
//!
//! The engine draws every value from one explicitly seeded stream, samples
//! cross-correlated wine attributes from the core taxonomy, dirties the
//! display fields, injects exact duplicates and shuffles the result
//! deterministically.

pub mod checks;
pub mod dirty;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod rng;
pub mod sampler;

pub use engine::{GenerationEngine, GenerationResult, duplicate_count};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, Violation};
