use crate::catalog::Catalog;
use crate::error::Result;
use crate::types::{Filter, ScoredRecord};

/// Base similarity between a query and every catalog position, in catalog order.
pub trait QueryScorer: Send + Sync {
    fn positions(&self) -> usize;
    fn score(&self, query: &str) -> Vec<f32>;
}

/// The query surface the presentation layer depends on.
pub trait Recommender: Send + Sync {
    fn catalog(&self) -> &Catalog;
    fn recommend(&self, query: &str, top_k: usize, filter: &Filter) -> Result<Vec<ScoredRecord>>;
}
