//! Reviewable ranking heuristics.
//!
//! The built-in tables ship as `boost_tables.toml` next to this crate's
//! manifest and are compiled in. A replacement file is merged on top: keys
//! it sets override the built-in ones and arrays are replaced, not extended.
use std::path::Path;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use skillmatch_core::error::{Error, Result};
use skillmatch_vector::TagRule;

pub const BUILTIN_TABLES: &str = include_str!("../boost_tables.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Added per query token found in the record text.
    pub lexical_match: f32,
    /// Query tokens shorter than this are not considered.
    pub lexical_min_chars: usize,
    /// Per matching keyword, scaled by the category's query match ratio.
    pub category_keyword: f32,
    /// Flat boost when the category name itself occurs in the record text.
    pub category_name: f32,
    pub role_match: f32,
    /// Subtracted on a clerical query against a programming assessment.
    pub domain_penalty: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRule {
    pub phrase: String,
    pub requires_any: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainPenalty {
    pub query_terms: Vec<String>,
    pub name_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostTables {
    pub weights: Weights,
    pub categories: Vec<Category>,
    pub roles: Vec<RoleRule>,
    pub penalty: DomainPenalty,
    #[serde(default)]
    pub tags: Vec<TagRule>,
}

impl BoostTables {
    pub fn builtin() -> Result<Self> { Self::from_figment(Figment::from(Toml::string(BUILTIN_TABLES))) }

    /// Built-in tables with `path` merged on top.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InvalidConfig(format!("boost tables file not found: {}", path.display())));
        }
        Self::from_figment(Figment::from(Toml::string(BUILTIN_TABLES)).merge(Toml::file(path)))
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let tables: Self = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(format!("invalid boost tables: {}", e)))?;
        tables.validated()
    }

    /// Lower-cases every term and rejects unusable entries.
    fn validated(mut self) -> Result<Self> {
        let w = &self.weights;
        for (name, value) in [
            ("lexical_match", w.lexical_match),
            ("category_keyword", w.category_keyword),
            ("category_name", w.category_name),
            ("role_match", w.role_match),
            ("domain_penalty", w.domain_penalty),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("weight '{}' must be finite", name)));
            }
        }
        for c in &mut self.categories {
            if c.keywords.is_empty() {
                return Err(Error::InvalidConfig(format!("category '{}' has no keywords", c.name)));
            }
            c.name = c.name.to_lowercase();
            lower_all(&mut c.keywords);
        }
        for r in &mut self.roles {
            if r.phrase.trim().is_empty() {
                return Err(Error::InvalidConfig("role phrase must not be empty".to_string()));
            }
            r.phrase = r.phrase.to_lowercase();
            lower_all(&mut r.requires_any);
        }
        lower_all(&mut self.penalty.query_terms);
        lower_all(&mut self.penalty.name_terms);
        for t in &mut self.tags {
            lower_all(&mut t.all_of);
            lower_all(&mut t.any_of);
        }
        Ok(self)
    }
}

fn lower_all(terms: &mut Vec<String>) {
    for t in terms.iter_mut() { *t = t.to_lowercase(); }
    terms.retain(|t| !t.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_parse() {
        let t = BoostTables::builtin().expect("builtin");
        assert_eq!(t.weights.lexical_match, 0.02);
        assert_eq!(t.weights.category_keyword, 0.05);
        assert_eq!(t.weights.category_name, 0.3);
        assert_eq!(t.weights.role_match, 0.5);
        assert_eq!(t.weights.domain_penalty, 2.0);
        let names: Vec<_> = t.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["programming", "frameworks", "data", "cloud", "ai_ml", "sales", "management", "finance", "hr", "design", "administrative"]
        );
        assert!(t.roles.iter().any(|r| r.phrase == "bank clerk"));
        assert_eq!(t.tags.len(), 5);
    }

    #[test]
    fn builtin_tags_cover_record_names() {
        use skillmatch_vector::tags::tags_for;
        let rules = BoostTables::builtin().expect("builtin").tags;
        assert_eq!(tags_for(&rules, "Core Java (Entry Level)"), vec!["java_developer"]);
        assert_eq!(tags_for(&rules, "Data Analysis with Python"), vec!["python_developer", "data_scientist"]);
        assert!(tags_for(&rules, "Data Entry").is_empty());
        assert_eq!(tags_for(&rules, "Team Management"), vec!["leadership_role"]);
        assert_eq!(tags_for(&rules, "Sales Leadership"), vec!["sales_role", "leadership_role"]);
    }
}
