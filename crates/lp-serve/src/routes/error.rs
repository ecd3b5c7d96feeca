use crate::AppState;
use crate::layout::{breadcrumbs, nav_items};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use lp_core::error::{CourseError, DashboardError, EnrolmentError, LearnerError};
use minijinja::context;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub correlation_id: Option<String>,
}

pub fn map_error(
    err: &DashboardError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code) = classify(err);
    log_failure(status, err, correlation_id.as_deref());
    (
        status,
        Json(ErrorEnvelope {
            code,
            message: public_message(status, err),
            correlation_id,
        }),
    )
}

/// HTML counterpart of [`map_error`] for page routes.
pub fn error_page(
    state: &AppState,
    err: &DashboardError,
    correlation_id: Option<String>,
) -> Response {
    let (status, _) = classify(err);
    log_failure(status, err, correlation_id.as_deref());
    render_error_page(state, status, &public_message(status, err), "")
}

pub fn render_error_page(
    state: &AppState,
    status: StatusCode,
    message: &str,
    current_path: &str,
) -> Response {
    let rendered = state.templates.render(
        "error.html",
        context! {
            title => status.canonical_reason().unwrap_or("Error"),
            nav => nav_items(current_path),
            breadcrumbs => breadcrumbs(current_path),
            status => status.as_u16(),
            message => message,
        },
    );
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(error = %err, "failed to render error page");
            (status, message.to_string()).into_response()
        }
    }
}

pub fn classify(err: &DashboardError) -> (StatusCode, &'static str) {
    match err {
        DashboardError::Course(course) => classify_course(course),
        DashboardError::Learner(learner) => classify_learner(learner),
        DashboardError::Enrolment(enrolment) => classify_enrolment(enrolment),
        DashboardError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

fn classify_course(err: &CourseError) -> (StatusCode, &'static str) {
    match err {
        CourseError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        CourseError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
        CourseError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
    }
}

fn classify_learner(err: &LearnerError) -> (StatusCode, &'static str) {
    match err {
        LearnerError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        LearnerError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
        LearnerError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
    }
}

fn classify_enrolment(err: &EnrolmentError) -> (StatusCode, &'static str) {
    match err {
        EnrolmentError::NotFound
        | EnrolmentError::LearnerNotFound
        | EnrolmentError::CourseNotFound => (StatusCode::NOT_FOUND, "not_found"),
        EnrolmentError::AlreadyEnrolled => (StatusCode::CONFLICT, "conflict"),
        EnrolmentError::InvalidProgress { .. } | EnrolmentError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input")
        }
        EnrolmentError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
    }
}

/// Server-side failures keep their details in the log only.
fn public_message(status: StatusCode, err: &DashboardError) -> String {
    if status.is_server_error() {
        "internal server error".to_string()
    } else {
        err.to_string()
    }
}

fn log_failure(status: StatusCode, err: &DashboardError, correlation_id: Option<&str>) {
    if status.is_server_error() {
        error!(status = status.as_u16(), correlation_id, error = %err, "request failed");
    } else {
        warn!(status = status.as_u16(), correlation_id, error = %err, "request rejected");
    }
}
