//! Domain types shared by the text, vector and ranking crates.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type RecordId = String;

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Assessment length, either plain minutes or a free-text label such as "25 minutes".
///
/// Integral numbers land in `Whole` so they serialize back as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Duration {
    Whole(u64),
    Minutes(f64),
    Text(String),
}

impl Default for Duration {
    fn default() -> Self { Duration::Text(String::new()) }
}

impl Duration {
    /// Whole minutes; free text contributes its leading number, anything else is 0.
    pub fn minutes(&self) -> u32 {
        match self {
            Duration::Whole(m) => u32::try_from(*m).unwrap_or(u32::MAX),
            Duration::Minutes(m) if m.is_finite() && *m > 0.0 => m.round() as u32,
            Duration::Minutes(_) => 0,
            Duration::Text(text) => {
                let digits: String = text
                    .trim_start()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse().unwrap_or(0)
            }
        }
    }
}

/// Skills are stored either as a comma separated string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    List(Vec<String>),
    Text(String),
}

impl Default for Skills {
    fn default() -> Self { Skills::Text(String::new()) }
}

impl Skills {
    pub fn as_text(&self) -> String {
        match self {
            Skills::List(items) => items.join(", "),
            Skills::Text(text) => text.clone(),
        }
    }
}

/// A single catalog entry.
///
/// Every field is optional on the wire. Missing or `null` text fields become
/// empty strings and missing flags become `false`, so matching code never has
/// to deal with absent values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub test_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: Duration,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remote_available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub adaptive_testing: bool,
}

impl AssessmentRecord {
    pub fn skills_text(&self) -> String { self.skills.as_text() }

    pub fn duration_minutes(&self) -> u32 { self.duration.minutes() }

    /// Lower-cased `name description skills`, the haystack for substring boosts.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.skills_text()).to_lowercase()
    }
}

/// Optional per-query constraints. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    #[serde(rename = "type", alias = "test_type", skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptive_testing: Option<bool>,
}

impl Filter {
    pub fn new() -> Self { Self::default() }

    pub fn with_type(mut self, test_type: impl Into<String>) -> Self {
        self.test_type = Some(test_type.into());
        self
    }

    pub fn with_remote(mut self, remote_available: bool) -> Self {
        self.remote_available = Some(remote_available);
        self
    }

    pub fn with_adaptive(mut self, adaptive_testing: bool) -> Self {
        self.adaptive_testing = Some(adaptive_testing);
        self
    }

    /// An empty type string counts as no constraint.
    fn active_type(&self) -> Option<&str> {
        self.test_type.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_type().is_none() && self.remote_available.is_none() && self.adaptive_testing.is_none()
    }

    pub fn matches(&self, record: &AssessmentRecord) -> bool {
        if let Some(t) = self.active_type() {
            if record.test_type != t { return false; }
        }
        if let Some(remote) = self.remote_available {
            if record.remote_available != remote { return false; }
        }
        if let Some(adaptive) = self.adaptive_testing {
            if record.adaptive_testing != adaptive { return false; }
        }
        true
    }
}

/// A catalog record paired with its normalized score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: AssessmentRecord,
    pub score: f32,
}

#[derive(Serialize)]
struct ScoredRecordRepr<'a> {
    #[serde(flatten)]
    record: &'a AssessmentRecord,
    similarity_score: f32,
    similarity: f32,
}

/// Serialized with the score under both `similarity_score` and `similarity`.
impl Serialize for ScoredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ScoredRecordRepr { record: &self.record, similarity_score: self.score, similarity: self.score }
            .serialize(serializer)
    }
}
