use tracing::{debug, info};

use skillmatch_core::catalog::Catalog;
use skillmatch_core::error::Result;
use skillmatch_core::traits::QueryScorer;
use skillmatch_core::types::AssessmentRecord;
use skillmatch_text::{Normalizer, TermAnalyzer};

use crate::sparse::SparseVector;
use crate::tags::{tags_for, TagRule};
use crate::tfidf::TfidfVectorizer;

/// TF-IDF vectors for every catalog position, built once per catalog snapshot.
///
/// The vocabulary and IDF table are frozen at build time; queries are
/// projected with the same weights and never refit.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    normalizer: Normalizer,
    analyzer: TermAnalyzer,
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
}

/// `name name description skills skills type`, so name and skills weigh double.
pub fn composite_text(record: &AssessmentRecord) -> String {
    let skills = record.skills_text();
    format!(
        "{name} {name} {} {skills} {skills} {}",
        record.description,
        record.test_type,
        name = record.name,
        skills = skills,
    )
}

impl VectorIndex {
    pub fn build(catalog: &Catalog, tag_rules: &[TagRule]) -> Result<Self> {
        Self::build_with(catalog, tag_rules, Normalizer::new(), TermAnalyzer::english()?)
    }

    pub fn build_with(
        catalog: &Catalog,
        tag_rules: &[TagRule],
        normalizer: Normalizer,
        analyzer: TermAnalyzer,
    ) -> Result<Self> {
        let documents: Vec<Vec<String>> = catalog
            .iter()
            .map(|record| {
                let mut text = normalizer.normalize(&composite_text(record));
                for tag in tags_for(tag_rules, &record.name) {
                    text.push(' ');
                    text.push_str(tag);
                }
                analyzer.terms(&text)
            })
            .collect();
        let vectorizer = TfidfVectorizer::fit(&documents)?;
        let vectors = documents.iter().map(|terms| vectorizer.transform(terms)).collect();
        info!(records = catalog.len(), vocabulary = vectorizer.vocabulary_size(), "built assessment vector index");
        Ok(Self { normalizer, analyzer, vectorizer, vectors })
    }

    pub fn len(&self) -> usize { self.vectors.len() }

    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn vocabulary_size(&self) -> usize { self.vectorizer.vocabulary_size() }

    pub fn vector(&self, position: usize) -> Option<&SparseVector> { self.vectors.get(position) }

    /// Normalize, tokenize and weight a query with the frozen vocabulary.
    pub fn project(&self, query: &str) -> SparseVector {
        let terms = self.analyzer.terms(&self.normalizer.normalize(query));
        self.vectorizer.transform(&terms)
    }

    /// Cosine similarity against every record, in catalog order.
    pub fn similarities(&self, query: &str) -> Vec<f32> {
        let q = self.project(query);
        debug!(query_terms = q.nnz(), "projected query");
        self.vectors.iter().map(|v| q.cosine(v).max(0.0)).collect()
    }
}

impl QueryScorer for VectorIndex {
    fn positions(&self) -> usize { self.len() }
    fn score(&self, query: &str) -> Vec<f32> { self.similarities(query) }
}
