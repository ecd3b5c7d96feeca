use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use lp_core::types::{
    Course, CourseId, EnrolmentProgress, LearnerId, LearnerProgress, LearnerProgressPage,
    ProgressFilters,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Learner Progress API"),
    paths(crate::routes::progress::learner_progress),
    components(schemas(
        LearnerProgressPage,
        LearnerProgress,
        EnrolmentProgress,
        Course,
        ProgressFilters,
        CourseId,
        LearnerId
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}

pub fn router() -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> impl IntoResponse {
    Html(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Learner Progress API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: '/api/openapi.json', dom_id: '#swagger-ui' });
    </script>
  </body>
</html>
"#,
    )
}
