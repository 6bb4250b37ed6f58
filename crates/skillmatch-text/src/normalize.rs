//! Canonical form for catalog and query text.
//!
//! Lower-cases, replaces punctuation with spaces, collapses whitespace and
//! then joins known multi-word phrases into single underscored tokens so the
//! vectorizer treats them atomically.

/// Multi-word phrases joined into one token, in application order.
pub const DOMAIN_PHRASES: &[&str] = &[
    "data science",
    "data scientist",
    "data analysis",
    "data analyst",
    "data entry",
    "machine learning",
    "deep learning",
    "artificial intelligence",
    "project management",
    "team management",
    "customer service",
    "business development",
    "human resources",
    "front end",
    "back end",
    "full stack",
    "software engineer",
    "software development",
    "java developer",
    "python developer",
    "sales role",
    "leadership role",
    "problem solving",
    "decision making",
    "critical thinking",
    "attention to detail",
];

#[derive(Debug, Clone)]
pub struct Normalizer {
    phrases: Vec<(String, String)>,
}

impl Default for Normalizer {
    fn default() -> Self { Self::with_phrases(DOMAIN_PHRASES.iter().copied()) }
}

impl Normalizer {
    pub fn new() -> Self { Self::default() }

    /// Phrases are themselves normalized first, so "Front-End" and "front end" are equivalent.
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| collapse(p.as_ref()))
            .filter(|p| p.contains(' '))
            .map(|p| { let joined = p.replace(' ', "_"); (p, joined) })
            .collect();
        Self { phrases }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut out = collapse(text);
        for (phrase, joined) in &self.phrases {
            if out.contains(phrase.as_str()) { out = out.replace(phrase.as_str(), joined); }
        }
        out
    }
}

/// Normalize with the default phrase list.
pub fn normalize(text: &str) -> String { Normalizer::default().normalize(text) }

fn collapse(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
