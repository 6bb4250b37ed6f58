use std::collections::BTreeSet;

use skillmatch_core::catalog::Catalog;

use crate::tables::BoostTables;

/// Per-signal adjustments for one record against one query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoostBreakdown {
    pub lexical: f32,
    pub category: f32,
    pub role: f32,
    pub penalty: f32,
}

impl BoostBreakdown {
    pub fn total(&self) -> f32 { self.lexical + self.category + self.role - self.penalty }
}

/// Everything derived from the query once, before visiting records.
#[derive(Debug, Clone)]
struct QuerySignals {
    tokens: BTreeSet<String>,
    /// `(category index, query keyword matches)` for categories hit by the query.
    categories: Vec<(usize, usize)>,
    roles: Vec<usize>,
    penalized: bool,
}

struct Haystack {
    text: String,
    name: String,
}

/// Applies the additive boost and penalty signals to raw similarities.
///
/// Record haystacks are lower-cased once at construction; the booster is
/// read-only afterwards and can be shared across query threads.
pub struct Booster {
    tables: BoostTables,
    haystacks: Vec<Haystack>,
}

impl Booster {
    pub fn new(tables: BoostTables, catalog: &Catalog) -> Self {
        let haystacks = catalog
            .iter()
            .map(|r| Haystack { text: r.search_text(), name: r.name.to_lowercase() })
            .collect();
        Self { tables, haystacks }
    }

    pub fn tables(&self) -> &BoostTables { &self.tables }

    fn signals(&self, query: &str) -> QuerySignals {
        let lower = query.to_lowercase();
        let min_chars = self.tables.weights.lexical_min_chars;
        let tokens = lower
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| t.chars().count() >= min_chars)
            .map(str::to_string)
            .collect();
        let categories = self
            .tables
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.keywords.iter().filter(|k| lower.contains(k.as_str())).count()))
            .filter(|&(_, hits)| hits > 0)
            .collect();
        let roles = self
            .tables
            .roles
            .iter()
            .enumerate()
            .filter(|(_, r)| lower.contains(r.phrase.as_str()))
            .map(|(i, _)| i)
            .collect();
        let penalized = self.tables.penalty.query_terms.iter().any(|t| lower.contains(t.as_str()));
        QuerySignals { tokens, categories, roles, penalized }
    }

    fn breakdown_for(&self, signals: &QuerySignals, haystack: &Haystack) -> BoostBreakdown {
        let w = &self.tables.weights;
        let text = haystack.text.as_str();
        let mut b = BoostBreakdown::default();

        let lexical_hits = signals.tokens.iter().filter(|t| text.contains(t.as_str())).count();
        b.lexical = lexical_hits as f32 * w.lexical_match;

        for &(ci, query_hits) in &signals.categories {
            let category = &self.tables.categories[ci];
            let ratio = query_hits as f32 / category.keywords.len() as f32;
            for k in &category.keywords {
                if text.contains(k.as_str()) { b.category += w.category_keyword * ratio; }
            }
            if text.contains(category.name.as_str()) { b.category += w.category_name; }
        }

        for &ri in &signals.roles {
            if self.tables.roles[ri].requires_any.iter().any(|s| text.contains(s.as_str())) {
                b.role += w.role_match;
            }
        }

        if signals.penalized && self.tables.penalty.name_terms.iter().any(|t| haystack.name.contains(t.as_str())) {
            b.penalty = w.domain_penalty;
        }
        b
    }

    /// Signal breakdown for one catalog position; `None` when out of range.
    pub fn breakdown(&self, query: &str, position: usize) -> Option<BoostBreakdown> {
        let haystack = self.haystacks.get(position)?;
        Some(self.breakdown_for(&self.signals(query), haystack))
    }

    /// `raw[i] + boosts(i)` for every position. `raw` must be in catalog order.
    pub fn adjust(&self, query: &str, raw: &[f32]) -> Vec<f32> {
        let signals = self.signals(query);
        raw.iter()
            .zip(&self.haystacks)
            .map(|(&score, h)| score + self.breakdown_for(&signals, h).total())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillmatch_core::types::AssessmentRecord;

    fn booster(records: Vec<AssessmentRecord>) -> Booster {
        Booster::new(BoostTables::builtin().unwrap(), &Catalog::new(records).unwrap())
    }

    fn named(name: &str, description: &str) -> AssessmentRecord {
        AssessmentRecord { name: name.into(), description: description.into(), ..Default::default() }
    }

    #[test]
    fn lexical_counts_distinct_long_tokens() {
        let b = booster(vec![named("Excel Skills", "spreadsheet reporting")]);
        // "excel" twice counts once; "for" is too short
        let bd = b.breakdown("excel excel for spreadsheet", 0).unwrap();
        assert!((bd.lexical - 0.04).abs() < 1e-6);
    }

    #[test]
    fn category_boost_scales_with_query_ratio() {
        let b = booster(vec![named("Cloud Ops", "aws")]);
        // cloud category: query hits "aws" only (1 of 6); record has "cloud" and "aws"
        let bd = b.breakdown("aws engineer", 0).unwrap();
        let expected = 2.0 * 0.05 * (1.0 / 6.0) + 0.3;
        assert!((bd.category - expected).abs() < 1e-6, "{}", bd.category);
    }

    #[test]
    fn role_boost_requires_phrase_and_record_term() {
        let b = booster(vec![named("Core Java (Entry Level)", ""), named("Verbal Reasoning", "")]);
        assert_eq!(b.breakdown("hiring java developers", 0).unwrap().role, 0.5);
        assert_eq!(b.breakdown("hiring java developers", 1).unwrap().role, 0.0);
        assert_eq!(b.breakdown("hiring java engineers", 0).unwrap().role, 0.0);
    }

    #[test]
    fn domain_penalty_only_on_programming_names() {
        let b = booster(vec![named("Coding Assessment for Python", ""), named("Customer Service Assessment", "")]);
        assert_eq!(b.breakdown("bank clerk", 0).unwrap().penalty, 2.0);
        assert_eq!(b.breakdown("bank clerk", 1).unwrap().penalty, 0.0);
        assert_eq!(b.breakdown("python engineer", 0).unwrap().penalty, 0.0);
    }

    #[test]
    fn adjust_adds_to_raw_scores() {
        let b = booster(vec![named("A", ""), named("B", "")]);
        assert_eq!(b.adjust("zz", &[0.25, 0.5]), vec![0.25, 0.5]);
        assert!(b.breakdown("zz", 2).is_none());
    }
}
