use serde_json::json;

use skillmatch_core::catalog::Catalog;
use skillmatch_core::error::Error;
use skillmatch_core::traits::Recommender;
use skillmatch_core::types::{Filter, ScoredRecord};
use skillmatch_rank::response::{self, RecommendRequest, StrictRequest};
use skillmatch_rank::RecommendationEngine;

fn engine() -> RecommendationEngine { RecommendationEngine::with_builtin_tables(Catalog::sample()).expect("engine") }

fn general(description: Option<&str>) -> RecommendRequest {
    RecommendRequest { job_description: description.map(str::to_string), filters: Filter::new() }
}

#[test]
fn health_is_always_ok() {
    let reply = response::health();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["status"], "ok");
}

#[test]
fn general_success_lists_recommendations() {
    let engine = engine();
    let reply = response::recommend(Some(&engine), &general(Some("python programming")), 3);
    assert_eq!(reply.status, 200);
    let recs = reply.body["recommendations"].as_array().unwrap();
    assert_eq!(reply.body["count"], json!(recs.len()));
    assert!(recs.len() <= 3);
    assert_eq!(recs[0]["name"], "Coding Assessment for Python");
    assert_eq!(recs[0]["similarity_score"], recs[0]["similarity"]);
    assert_eq!(recs[0]["type"], "Technical");
}

#[test]
fn general_missing_description_is_bad_request() {
    let engine = engine();
    assert_eq!(response::recommend(Some(&engine), &general(None), 10).status, 400);
    let reply = response::recommend(Some(&engine), &general(Some("  ")), 10);
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["error"], "Job description is required");
}

#[test]
fn general_without_engine_is_server_error() {
    let reply = response::recommend(None::<&RecommendationEngine>, &general(Some("java")), 10);
    assert_eq!(reply.status, 500);
    assert_eq!(reply.body["error"], "Matching engine not initialized");
}

#[test]
fn general_request_parses_filters() {
    let request: RecommendRequest = serde_json::from_value(json!({
        "job_description": "analyst",
        "filters": { "type": "Behavioral", "remote_available": true }
    }))
    .unwrap();
    let engine = engine();
    let reply = response::recommend(Some(&engine), &request, 10);
    assert_eq!(reply.status, 200);
    for rec in reply.body["recommendations"].as_array().unwrap() {
        assert_eq!(rec["type"], "Behavioral");
        assert_eq!(rec["remote_available"], true);
    }
}

#[test]
fn strict_success_shape() {
    let engine = engine();
    let request = StrictRequest { job_description: None, query: Some("excel data analysis".into()) };
    let reply = response::strict(Some(&engine), &request, 5);
    assert!(reply.is_success());
    assert_eq!(reply.body["success"], true);
    let first = &reply.body["data"]["assessments"][0];
    assert_eq!(first["name"], "Excel Skills Assessment");
    assert_eq!(first["duration_minutes"], 40);
    assert_eq!(first["match_score"], 1.0);
    assert!(first.get("link").is_none());
}

#[test]
fn strict_prefers_job_description_over_query() {
    let request = StrictRequest { job_description: Some("leadership".into()), query: Some("python".into()) };
    assert_eq!(request.query_text(), "leadership");
    let blank = StrictRequest { job_description: Some(" ".into()), query: Some("python".into()) };
    assert_eq!(blank.query_text(), "python");
}

#[test]
fn strict_error_statuses() {
    let engine = engine();
    let empty = StrictRequest::default();
    let reply = response::strict(Some(&engine), &empty, 10);
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["error"], "Bad request");

    let request = StrictRequest { job_description: Some("java".into()), query: None };
    let reply = response::strict(None::<&RecommendationEngine>, &request, 10);
    assert_eq!(reply.status, 503);
    assert_eq!(reply.body["message"], "Matching engine not initialized");
}

/// Canned outcome regardless of the query.
struct Canned {
    catalog: Catalog,
    outcome: fn() -> skillmatch_core::Result<Vec<ScoredRecord>>,
}

impl Recommender for Canned {
    fn catalog(&self) -> &Catalog { &self.catalog }

    fn recommend(&self, _query: &str, _top_k: usize, _filter: &Filter) -> skillmatch_core::Result<Vec<ScoredRecord>> {
        (self.outcome)()
    }
}

fn canned(outcome: fn() -> skillmatch_core::Result<Vec<ScoredRecord>>) -> Canned { Canned { catalog: Catalog::default(), outcome } }

#[test]
fn strict_maps_engine_outcomes() {
    let request = StrictRequest { job_description: Some("java".into()), query: None };

    let reply = response::strict(Some(&canned(|| Ok(Vec::new()))), &request, 10);
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body["error"], "No results");

    let reply = response::strict(Some(&canned(|| Err(Error::Initialization("index gone".into())))), &request, 10);
    assert_eq!(reply.status, 503);

    let reply = response::strict(Some(&canned(|| Err(Error::InvalidConfig("broken".into())))), &request, 10);
    assert_eq!(reply.status, 500);
    assert_eq!(reply.body["error"], "Internal server error");

    let engine = engine();
    assert_eq!(response::strict(Some(&engine), &request, 0).status, 400);
}

#[test]
fn general_maps_engine_failures() {
    let reply = response::recommend(Some(&canned(|| Err(Error::InvalidConfig("broken".into())))), &general(Some("java")), 10);
    assert_eq!(reply.status, 500);
    let reply = response::recommend(Some(&canned(|| Err(Error::InvalidQuery("nope".into())))), &general(Some("java")), 10);
    assert_eq!(reply.status, 400);
}
