use serde::{Deserialize, Serialize};

/// Appends a synthetic index term to records whose name matches.
///
/// The rule matches when the lower-cased name contains every `all_of`
/// substring and, if `any_of` is non-empty, at least one `any_of` substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    pub tag: String,
    #[serde(default)]
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<String>,
}

impl TagRule {
    pub fn new(tag: &str, all_of: &[&str], any_of: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            all_of: all_of.iter().map(|s| s.to_string()).collect(),
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn matches(&self, name_lower: &str) -> bool {
        if self.all_of.is_empty() && self.any_of.is_empty() { return false; }
        self.all_of.iter().all(|s| name_lower.contains(s.as_str()))
            && (self.any_of.is_empty() || self.any_of.iter().any(|s| name_lower.contains(s.as_str())))
    }
}

/// Tags for a record name, in rule order.
pub fn tags_for<'a>(rules: &'a [TagRule], name: &str) -> Vec<&'a str> {
    let name_lower = name.to_lowercase();
    rules.iter().filter(|r| r.matches(&name_lower)).map(|r| r.tag.as_str()).collect()
}
