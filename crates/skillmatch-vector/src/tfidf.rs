use std::collections::{BTreeSet, HashMap, HashSet};

use skillmatch_core::error::{Error, Result};

use crate::sparse::SparseVector;

/// TF-IDF weights learned from one corpus.
///
/// Term frequencies are raw counts, IDF is smoothed as
/// `ln((1 + n) / (1 + df)) + 1` and every produced row is L2-normalized.
/// Term indices follow lexical order of the vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF from pre-tokenized documents.
    pub fn fit<D: AsRef<[String]>>(documents: &[D]) -> Result<Self> {
        if documents.is_empty() {
            return Err(Error::Initialization("cannot fit vectorizer on an empty corpus".to_string()));
        }
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in documents {
            let unique: HashSet<&str> = doc.as_ref().iter().map(String::as_str).collect();
            for term in unique { *doc_freq.entry(term).or_insert(0) += 1; }
        }
        if doc_freq.is_empty() {
            return Err(Error::Initialization(
                "empty vocabulary; catalog text contains only stop words".to_string(),
            ));
        }

        let terms: BTreeSet<&str> = doc_freq.keys().copied().collect();
        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, term) in terms.into_iter().enumerate() {
            let df = doc_freq[term] as f32;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.to_string(), idx);
        }
        Ok(Self { vocabulary, idf })
    }

    pub fn vocabulary_size(&self) -> usize { self.idf.len() }

    pub fn term_index(&self, term: &str) -> Option<usize> { self.vocabulary.get(term).copied() }

    pub fn idf(&self, term: &str) -> Option<f32> { self.term_index(term).map(|i| self.idf[i]) }

    /// Project terms onto the frozen vocabulary. Unknown terms are ignored.
    pub fn transform(&self, terms: &[String]) -> SparseVector {
        let entries = terms
            .iter()
            .filter_map(|t| self.vocabulary.get(t.as_str()).map(|&i| (i, self.idf[i])))
            .collect();
        let mut v = SparseVector::from_entries(entries);
        v.l2_normalize();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&str]) -> Vec<Vec<String>> {
        raw.iter().map(|d| d.split_whitespace().map(str::to_string).collect()).collect()
    }

    #[test]
    fn smoothed_idf_values() {
        let v = TfidfVectorizer::fit(&docs(&["java sql", "java python"])).unwrap();
        assert_eq!(v.vocabulary_size(), 3);
        assert!((v.idf("java").unwrap() - 1.0).abs() < 1e-6);
        let rare = (3.0f32 / 2.0).ln() + 1.0;
        assert!((v.idf("sql").unwrap() - rare).abs() < 1e-6);
    }

    #[test]
    fn vocabulary_is_lexically_ordered() {
        let v = TfidfVectorizer::fit(&docs(&["zeta alpha", "mid"])).unwrap();
        assert_eq!(v.term_index("alpha"), Some(0));
        assert_eq!(v.term_index("mid"), Some(1));
        assert_eq!(v.term_index("zeta"), Some(2));
    }

    #[test]
    fn unknown_terms_contribute_nothing() {
        let v = TfidfVectorizer::fit(&docs(&["excel reporting"])).unwrap();
        assert!(v.transform(&["kotlin".to_string()]).is_zero());
    }

    #[test]
    fn empty_corpus_and_empty_vocabulary_fail() {
        let none: Vec<Vec<String>> = Vec::new();
        assert!(matches!(TfidfVectorizer::fit(&none), Err(Error::Initialization(_))));
        assert!(matches!(TfidfVectorizer::fit(&docs(&["", ""])), Err(Error::Initialization(_))));
    }
}
