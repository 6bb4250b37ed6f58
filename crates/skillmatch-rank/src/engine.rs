use tracing::debug;

use skillmatch_core::catalog::Catalog;
use skillmatch_core::error::{Error, Result};
use skillmatch_core::traits::{QueryScorer, Recommender};
use skillmatch_core::types::{Filter, ScoredRecord};
use skillmatch_vector::VectorIndex;

use crate::boost::{BoostBreakdown, Booster};
use crate::ranker::rank;
use crate::tables::BoostTables;

/// Catalog, base scorer and boost tables wired together for querying.
///
/// Built once; every query goes through `&self`, so an engine can be shared
/// between threads as-is.
pub struct RecommendationEngine<S: QueryScorer = VectorIndex> {
    catalog: Catalog,
    scorer: S,
    booster: Booster,
}

impl RecommendationEngine<VectorIndex> {
    /// Fit the TF-IDF index over `catalog`. Fails if the index cannot be built.
    pub fn new(catalog: Catalog, tables: BoostTables) -> Result<Self> {
        let index = VectorIndex::build(&catalog, &tables.tags)?;
        Self::from_parts(catalog, index, tables)
    }

    pub fn with_builtin_tables(catalog: Catalog) -> Result<Self> { Self::new(catalog, BoostTables::builtin()?) }

    pub fn index(&self) -> &VectorIndex { &self.scorer }
}

impl<S: QueryScorer> RecommendationEngine<S> {
    pub fn from_parts(catalog: Catalog, scorer: S, tables: BoostTables) -> Result<Self> {
        if scorer.positions() != catalog.len() {
            return Err(Error::Initialization(format!(
                "scorer covers {} records but the catalog has {}",
                scorer.positions(),
                catalog.len()
            )));
        }
        let booster = Booster::new(tables, &catalog);
        Ok(Self { catalog, scorer, booster })
    }

    fn check_query(query: &str, top_k: usize) -> Result<()> {
        if query.trim().is_empty() {
            return Err(Error::InvalidQuery("query text is required".to_string()));
        }
        if top_k == 0 {
            return Err(Error::InvalidQuery("top_k must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Base similarity plus boosts, in catalog order.
    pub fn adjusted_scores(&self, query: &str) -> Result<Vec<f32>> {
        Self::check_query(query, 1)?;
        let raw = self.scorer.score(query);
        Ok(self.booster.adjust(query, &raw))
    }

    pub fn explain(&self, query: &str, position: usize) -> Option<BoostBreakdown> { self.booster.breakdown(query, position) }

    pub fn recommend(&self, query: &str, top_k: usize, filter: &Filter) -> Result<Vec<ScoredRecord>> {
        Self::check_query(query, top_k)?;
        let adjusted = self.adjusted_scores(query)?;
        let results = rank(&adjusted, &self.catalog, top_k, filter);
        debug!(candidates = adjusted.len(), returned = results.len(), top_k, filtered = !filter.is_empty(), "ranked recommendations");
        Ok(results)
    }
}

impl<S: QueryScorer> Recommender for RecommendationEngine<S> {
    fn catalog(&self) -> &Catalog { &self.catalog }

    fn recommend(&self, query: &str, top_k: usize, filter: &Filter) -> Result<Vec<ScoredRecord>> {
        RecommendationEngine::recommend(self, query, top_k, filter)
    }
}
