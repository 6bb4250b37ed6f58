//! skillmatch-text
//!
//! Text canonicalization and term extraction shared by catalog indexing and
//! query projection. See `examples/` for a quick way to inspect the terms a
//! piece of text produces.
pub mod normalize;
pub mod stopwords;
pub mod tokenize;

pub use normalize::{normalize, Normalizer, DOMAIN_PHRASES};
pub use tokenize::TermAnalyzer;
