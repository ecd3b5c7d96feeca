use crate::layout::{HOME_PATH, breadcrumbs, nav_items};
use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{error_page, render_error_page};
use crate::{AppState, build_dashboard};
use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use lp_core::types::ProgressFilters;
use lp_core::view::{DashboardView, LEARNER_PROGRESS_PATH};
use minijinja::{Value, context};
use tracing::error;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HOME_PATH, get(home))
        .route(LEARNER_PROGRESS_PATH, get(learner_progress_page))
        .fallback(not_found)
        .with_state(state)
}

pub(crate) async fn home(State(state): State<AppState>) -> Response {
    render(
        &state,
        "home.html",
        context! {
            title => "Dashboard",
            nav => nav_items(HOME_PATH),
            breadcrumbs => breadcrumbs(HOME_PATH),
            progress_href => LEARNER_PROGRESS_PATH,
        },
    )
}

/// Server-rendered dashboard. The same payload the JSON API returns rides
/// along in `data-page` for clients that hydrate.
pub(crate) async fn learner_progress_page(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    RawQuery(query): RawQuery,
) -> Response {
    let dashboard = match build_dashboard(&state) {
        Ok(dashboard) => dashboard,
        Err(err) => return error_page(&state, &err, Some(correlation.0)),
    };
    let page = match dashboard
        .progress()
        .page(ProgressFilters::from_query(query.as_deref()))
    {
        Ok(page) => page,
        Err(err) => return error_page(&state, &err, Some(correlation.0)),
    };
    let props = match serde_json::to_string(&page) {
        Ok(props) => props,
        Err(err) => {
            error!(correlation_id = %correlation.0, error = %err, "failed to encode page props");
            return render_error_page(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error",
                LEARNER_PROGRESS_PATH,
            );
        }
    };

    render(
        &state,
        "learner_progress.html",
        context! {
            title => "Learner Progress",
            nav => nav_items(LEARNER_PROGRESS_PATH),
            breadcrumbs => breadcrumbs(LEARNER_PROGRESS_PATH),
            view => DashboardView::build(&page),
            props => props,
        },
    )
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    render_error_page(
        &state,
        StatusCode::NOT_FOUND,
        &format!("No page at {}", uri.path()),
        uri.path(),
    )
}

fn render(state: &AppState, name: &str, ctx: Value) -> Response {
    match state.templates.render(name, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(template = name, error = %err, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}
