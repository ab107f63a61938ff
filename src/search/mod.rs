//! Query parsing and catalog search
//!
//! Free text goes through `extract` to become a structured query, `engine`
//! resolves it against the catalog index, and `similarity` supplies the
//! fuzzy-acceptance primitive for near-miss model names.

pub mod engine;
pub mod extract;
pub mod similarity;

pub use engine::SearchEngine;
pub use extract::{ParsedQuery, QueryExtractor};
pub use similarity::similarity;
