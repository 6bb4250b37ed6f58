//! Transport-free presentation contracts.
//!
//! Each handler maps a request and an optional engine (absent when startup
//! failed) to a status code plus JSON body, so any HTTP layer only has to
//! copy both onto the wire.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use skillmatch_core::error::Error;
use skillmatch_core::traits::Recommender;
use skillmatch_core::types::{Filter, ScoredRecord, Skills};

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    fn new(status: u16, body: Value) -> Self { Self { status, body } }

    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// General endpoint payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecommendRequest {
    pub job_description: Option<String>,
    pub filters: Filter,
}

/// Strict endpoint payload: `job_description` or, failing that, `query`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrictRequest {
    pub job_description: Option<String>,
    pub query: Option<String>,
}

impl StrictRequest {
    pub fn query_text(&self) -> &str {
        [self.job_description.as_deref(), self.query.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or("")
    }
}

/// One entry of the strict endpoint's `assessments` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrictAssessment {
    pub name: String,
    #[serde(rename = "type")]
    pub test_type: String,
    pub description: String,
    pub match_score: f32,
    pub skills: Skills,
    pub remote_available: bool,
    pub duration_minutes: u32,
}

impl From<&ScoredRecord> for StrictAssessment {
    fn from(s: &ScoredRecord) -> Self {
        let r = &s.record;
        Self {
            name: r.name.clone(),
            test_type: r.test_type.clone(),
            description: r.description.clone(),
            match_score: s.score,
            skills: r.skills.clone(),
            remote_available: r.remote_available,
            duration_minutes: r.duration_minutes(),
        }
    }
}

pub fn health() -> Reply { Reply::new(200, json!({ "status": "ok", "message": "API is operational" })) }

pub fn recommend<R: Recommender>(engine: Option<&R>, request: &RecommendRequest, top_k: usize) -> Reply {
    let Some(engine) = engine else {
        return Reply::new(500, json!({ "error": "Matching engine not initialized" }));
    };
    let description = request.job_description.as_deref().unwrap_or("");
    if description.trim().is_empty() {
        return Reply::new(400, json!({ "error": "Job description is required" }));
    }
    match engine.recommend(description, top_k, &request.filters) {
        Ok(recommendations) => {
            let count = recommendations.len();
            Reply::new(200, json!({ "recommendations": recommendations, "count": count }))
        }
        Err(Error::InvalidQuery(msg)) => Reply::new(400, json!({ "error": msg })),
        Err(e) => {
            error!(error = %e, "recommendation failed");
            Reply::new(500, json!({ "error": e.to_string() }))
        }
    }
}

fn strict_error(status: u16, error: &str, message: impl Into<String>) -> Reply {
    Reply::new(status, json!({ "error": error, "message": message.into() }))
}

pub fn strict<R: Recommender>(engine: Option<&R>, request: &StrictRequest, top_k: usize) -> Reply {
    let Some(engine) = engine else {
        return strict_error(503, "Service unavailable", "Matching engine not initialized");
    };
    let query = request.query_text();
    if query.is_empty() {
        return strict_error(400, "Bad request", "Job description or query is required");
    }
    match engine.recommend(query, top_k, &Filter::default()) {
        Ok(recommendations) if recommendations.is_empty() => {
            strict_error(404, "No results", "No matching assessments found for the given query")
        }
        Ok(recommendations) => {
            let assessments: Vec<StrictAssessment> = recommendations.iter().map(StrictAssessment::from).collect();
            let count = assessments.len();
            Reply::new(200, json!({ "success": true, "data": { "assessments": assessments, "count": count } }))
        }
        Err(Error::InvalidQuery(msg)) => strict_error(400, "Bad request", msg),
        Err(e @ Error::Initialization(_)) => strict_error(503, "Service unavailable", e.to_string()),
        Err(e) => {
            error!(error = %e, "strict recommendation failed");
            strict_error(500, "Internal server error", e.to_string())
        }
    }
}
