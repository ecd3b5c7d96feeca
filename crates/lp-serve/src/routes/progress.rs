use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::{AppState, build_dashboard};
use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use lp_core::types::{LearnerProgressPage, ProgressFilters};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/learner-progress", get(learner_progress))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/learner-progress",
    params(ProgressFilters),
    responses(
        (status = 200, body = LearnerProgressPage),
        (status = 500, description = "Storage failure")
    )
)]
pub(crate) async fn learner_progress(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    RawQuery(query): RawQuery,
) -> Response {
    let dashboard = match build_dashboard(&state) {
        Ok(dashboard) => dashboard,
        Err(err) => return map_error(&err, Some(correlation.0)).into_response(),
    };
    let filters = ProgressFilters::from_query(query.as_deref());
    match dashboard.progress().page(filters) {
        Ok(page) => Json(page).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}
