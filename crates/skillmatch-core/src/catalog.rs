use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::AssessmentRecord;

/// Ordered, immutable snapshot of assessment records.
///
/// Positions are stable for the lifetime of the snapshot; indexes built over
/// a catalog refer to records by position.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<AssessmentRecord>,
}

impl Catalog {
    /// Rejects snapshots where two records share a non-empty identifier.
    pub fn new(records: Vec<AssessmentRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for r in &records {
            if r.id.is_empty() { continue; }
            if !seen.insert(r.id.as_str()) {
                return Err(Error::InvalidCatalog(format!("duplicate assessment id '{}'", r.id)));
            }
        }
        Ok(Self { records })
    }

    pub fn sample() -> Self { Self { records: sample_assessments() } }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, position: usize) -> Option<&AssessmentRecord> { self.records.get(position) }

    pub fn first(&self) -> Option<&AssessmentRecord> { self.records.first() }

    pub fn iter(&self) -> std::slice::Iter<'_, AssessmentRecord> { self.records.iter() }

    pub fn records(&self) -> &[AssessmentRecord] { &self.records }

    /// Distinct type labels, sorted. Records without a type are skipped.
    pub fn types(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.test_type.is_empty())
            .map(|r| r.test_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a AssessmentRecord;
    type IntoIter = std::slice::Iter<'a, AssessmentRecord>;
    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

/// Parse a JSON array of records.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let records: Vec<AssessmentRecord> = serde_json::from_str(json)?;
    Catalog::new(records)
}

/// Read a catalog file, surfacing any failure to the caller.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    info!(path = %path.display(), records = catalog.len(), "loaded assessment catalog");
    Ok(catalog)
}

/// Read a catalog file, falling back to the built-in sample set when the
/// file is missing or cannot be parsed.
pub fn load_catalog(path: &Path) -> Catalog {
    if !path.exists() {
        warn!(path = %path.display(), "assessment catalog not found, using sample data");
        return Catalog::sample();
    }
    match read_catalog(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load assessment catalog, using sample data");
            Catalog::sample()
        }
    }
}

fn sample(
    id: &str,
    name: &str,
    description: &str,
    test_type: &str,
    duration: &str,
    skills: &str,
    slug: &str,
    remote_available: bool,
    adaptive_testing: bool,
) -> AssessmentRecord {
    AssessmentRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        test_type: test_type.to_string(),
        duration: crate::types::Duration::Text(duration.to_string()),
        skills: crate::types::Skills::Text(skills.to_string()),
        link: format!("https://www.shl.com/assessments/{}/", slug),
        remote_available,
        adaptive_testing,
    }
}

/// Ten general-purpose assessments used when no catalog file is available.
pub fn sample_assessments() -> Vec<AssessmentRecord> {
    vec![
        sample("SHL-001", "Verbal Reasoning Assessment", "Measures the ability to understand and evaluate written information", "Cognitive", "25 minutes", "Critical thinking, language comprehension, analytical reasoning", "verbal-reasoning", true, false),
        sample("SHL-002", "Numerical Reasoning Assessment", "Evaluates the ability to interpret numerical data and make logical decisions", "Cognitive", "35 minutes", "Numerical ability, data interpretation, problem-solving", "numerical-reasoning", true, true),
        sample("SHL-003", "Inductive Reasoning Assessment", "Assesses logical thinking and pattern recognition ability", "Cognitive", "30 minutes", "Pattern recognition, logical thinking, problem-solving", "inductive-reasoning", true, false),
        sample("SHL-004", "Mechanical Reasoning Assessment", "Measures understanding of mechanical and physical principles", "Technical", "20 minutes", "Mechanical aptitude, spatial visualization, applied physics", "mechanical-reasoning", false, false),
        sample("SHL-005", "Coding Assessment for Python", "Evaluates programming skills and problem-solving in Python", "Technical", "60 minutes", "Python programming, algorithms, data structures", "coding-python", true, true),
        sample("SHL-006", "Leadership Competency Assessment", "Evaluates leadership potential and management capabilities", "Behavioral", "45 minutes", "Leadership, decision-making, team management", "leadership-competency", true, false),
        sample("SHL-007", "Customer Service Assessment", "Assesses aptitude for customer-facing roles and service orientation", "Behavioral", "30 minutes", "Communication, empathy, problem resolution", "customer-service", true, false),
        sample("SHL-008", "Excel Skills Assessment", "Measures proficiency in Microsoft Excel for data analysis and reporting", "Technical", "40 minutes", "Excel, data analysis, formula creation", "excel-skills", true, true),
        sample("SHL-009", "Personality Assessment", "Measures work-related personality traits and behavioral tendencies", "Behavioral", "25 minutes", "Self-awareness, workplace behavior, interpersonal style", "personality-profile", true, false),
        sample("SHL-010", "Situational Judgement Test", "Evaluates decision-making in realistic workplace scenarios", "Behavioral", "30 minutes", "Decision-making, workplace judgment, conflict resolution", "situational-judgement", true, true),
    ]
}
