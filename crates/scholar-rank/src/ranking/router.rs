use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::presentation::{top_recommendations, DEFAULT_TOP_N};
use super::repository::{ApplicantDirectory, ScholarshipCatalog};
use super::service::RecommendationService;

/// Shared state for the recommendation endpoints.
pub struct RecommendationState<D, C> {
    pub service: Arc<RecommendationService<D, C>>,
    pub default_limit: usize,
}

impl<D, C> Clone for RecommendationState<D, C> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            default_limit: self.default_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Router builder exposing the ranked recommendations over HTTP.
pub fn recommendation_router<D, C>(
    service: Arc<RecommendationService<D, C>>,
    default_limit: usize,
) -> Router
where
    D: ApplicantDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    let default_limit = if default_limit == 0 {
        DEFAULT_TOP_N
    } else {
        default_limit
    };

    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<D, C>))
        .route(
            "/api/v1/recommendations/:email",
            get(recommend_by_path_handler::<D, C>),
        )
        .with_state(RecommendationState {
            service,
            default_limit,
        })
}

pub(crate) async fn recommend_handler<D, C>(
    State(state): State<RecommendationState<D, C>>,
    Json(request): Json<RecommendationRequest>,
) -> Response
where
    D: ApplicantDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    respond(&state, &request.email, request.limit)
}

pub(crate) async fn recommend_by_path_handler<D, C>(
    State(state): State<RecommendationState<D, C>>,
    Path(email): Path<String>,
) -> Response
where
    D: ApplicantDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    respond(&state, &email, None)
}

fn respond<D, C>(state: &RecommendationState<D, C>, email: &str, limit: Option<usize>) -> Response
where
    D: ApplicantDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    let email = email.trim();
    if email.is_empty() {
        let payload = json!({ "error": "Email not provided" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let limit = limit.unwrap_or(state.default_limit);
    let ranked = state.service.recommend(email);
    let views = top_recommendations(&ranked, limit);
    info!(
        email,
        ranked = ranked.len(),
        returned = views.len(),
        "served scholarship recommendations"
    );

    (StatusCode::OK, Json(views)).into_response()
}
