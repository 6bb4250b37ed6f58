//! Offline recall/precision evaluation against labelled queries.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use skillmatch_core::error::Result;
use skillmatch_core::traits::Recommender;
use skillmatch_core::types::Filter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedAssessment {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub query: String,
    pub expected_assessments: Vec<ExpectedAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub query: String,
    pub recommendations: Vec<String>,
    pub expected: Vec<String>,
    pub true_positives: Vec<String>,
    pub false_positives: Vec<String>,
    pub false_negatives: Vec<String>,
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub results: Vec<CaseResult>,
    pub avg_recall: f64,
    pub avg_precision: f64,
    pub avg_f1: f64,
}

pub fn load_cases(path: &Path) -> Result<Vec<TestCase>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Catalog names and labels rarely agree exactly ("Core Java (Entry Level)"
/// vs "Core Java (Entry Level) (New)"), so either containing the other counts.
fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 { 2.0 * precision * recall / (precision + recall) } else { 0.0 }
}

pub fn evaluate_case<R: Recommender>(engine: &R, case: &TestCase, top_k: usize) -> Result<CaseResult> {
    let recommendations: Vec<String> = engine
        .recommend(&case.query, top_k, &Filter::default())?
        .into_iter()
        .map(|s| s.record.name)
        .collect();
    let expected: Vec<String> = case.expected_assessments.iter().map(|e| e.name.clone()).collect();

    let (true_positives, false_positives): (Vec<String>, Vec<String>) = recommendations
        .iter()
        .cloned()
        .partition(|r| expected.iter().any(|e| names_match(r, e)));
    let false_negatives: Vec<String> = expected
        .iter()
        .filter(|e| !recommendations.iter().any(|r| names_match(r, e)))
        .cloned()
        .collect();

    let recall = if expected.is_empty() { 0.0 } else { (expected.len() - false_negatives.len()) as f64 / expected.len() as f64 };
    let precision = if recommendations.is_empty() { 0.0 } else { true_positives.len() as f64 / recommendations.len() as f64 };
    Ok(CaseResult {
        query: case.query.clone(),
        recommendations,
        expected,
        true_positives,
        false_positives,
        false_negatives,
        recall,
        precision,
        f1: f1(precision, recall),
    })
}

/// Averages recall and precision; `avg_f1` is the F1 of those averages.
pub fn summarize(results: Vec<CaseResult>) -> Evaluation {
    let n = results.len() as f64;
    let (avg_recall, avg_precision) = if results.is_empty() {
        (0.0, 0.0)
    } else {
        (
            results.iter().map(|r| r.recall).sum::<f64>() / n,
            results.iter().map(|r| r.precision).sum::<f64>() / n,
        )
    };
    Evaluation { results, avg_recall, avg_precision, avg_f1: f1(avg_precision, avg_recall) }
}

pub fn evaluate<R: Recommender>(engine: &R, cases: &[TestCase], top_k: usize) -> Result<Evaluation> {
    let results = cases.iter().map(|c| evaluate_case(engine, c, top_k)).collect::<Result<Vec<_>>>()?;
    Ok(summarize(results))
}
