//! skillmatch-vector
//!
//! Term-weighted vector space over a catalog snapshot: the TF-IDF fit, the
//! per-record sparse vectors and cosine scoring of incoming queries.
pub mod index;
pub mod sparse;
pub mod tags;
pub mod tfidf;

pub use index::{composite_text, VectorIndex};
pub use sparse::SparseVector;
pub use tags::{tags_for, TagRule};
pub use tfidf::TfidfVectorizer;
