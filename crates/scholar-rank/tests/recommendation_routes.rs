//! HTTP scenarios for the recommendation router backed by in-memory collaborators.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use scholar_rank::ranking::{
    recommendation_router, Applicant, InMemoryApplicantDirectory, InMemoryScholarshipCatalog,
    RankingPipeline, RecommendationService, ScholarshipOffer,
};

fn router() -> axum::Router {
    let directory = InMemoryApplicantDirectory::new();
    directory.insert(
        "dev@example.com",
        Applicant {
            address: "Delhi".to_string(),
            gender: "male".to_string(),
            qualification: "M.Tech".to_string(),
            institution: "IIT Delhi".to_string(),
            cgpa: 7.0,
        },
    );

    let offers = (1..=8)
        .map(|i| ScholarshipOffer {
            name: format!("Delhi Scholarship {i}"),
            eligibility: format!("M.Tech students from Delhi with CGPA >= {i}"),
            link: format!("https://example.org/{i}"),
            ..ScholarshipOffer::default()
        })
        .collect();

    let service = RecommendationService::new(
        Arc::new(directory),
        Arc::new(InMemoryScholarshipCatalog::new(offers)),
        Arc::new(RankingPipeline::default()),
    );
    recommendation_router(Arc::new(service), 5)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

#[tokio::test]
async fn get_route_returns_top_five_by_default() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/recommendations/dev@example.com")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["link"], "https://example.org/1");
    assert_eq!(entries[4]["link"], "https://example.org/5");
    assert_eq!(entries[0]["final_score"], entries[4]["final_score"]);
}

#[tokio::test]
async fn post_route_rejects_missing_email() {
    let response = router()
        .oneshot(
            Request::post("/api/v1/recommendations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "limit": 3 }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Email not provided" })
    );
}
