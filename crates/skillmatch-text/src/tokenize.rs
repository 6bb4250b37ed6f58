use tantivy::tokenizer::{LowerCaser, RegexTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use skillmatch_core::error::{Error, Result};

use crate::stopwords::ENGLISH_STOP_WORDS;

/// Runs of two or more word characters. `_` counts as a word character so
/// joined phrases survive as one term.
pub const TOKEN_PATTERN: &str = r"\w\w+";

/// Term extraction shared by index build and query projection.
#[derive(Clone)]
pub struct TermAnalyzer {
    analyzer: TextAnalyzer,
}

impl TermAnalyzer {
    pub fn english() -> Result<Self> { Self::with_stop_words(ENGLISH_STOP_WORDS) }

    pub fn with_stop_words(stop_words: &[&str]) -> Result<Self> {
        let tokenizer = RegexTokenizer::new(TOKEN_PATTERN)
            .map_err(|e| Error::Initialization(format!("invalid token pattern: {}", e)))?;
        let analyzer = TextAnalyzer::builder(tokenizer)
            .filter(LowerCaser)
            .filter(StopWordFilter::remove(stop_words.iter().map(|s| s.to_string())))
            .build();
        Ok(Self { analyzer })
    }

    pub fn terms(&self, text: &str) -> Vec<String> {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut terms = Vec::new();
        while stream.advance() { terms.push(stream.token().text.clone()); }
        terms
    }
}

impl std::fmt::Debug for TermAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermAnalyzer").field("pattern", &TOKEN_PATTERN).finish()
    }
}
