pub mod layout;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod static_files;
pub mod templates;

use axum::Router;
use lp_core::{Dashboard, DashboardError};
use lp_db::schema;
use lp_db::store::DbStore;
use std::sync::Arc;
use templates::Templates;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub db_path: String,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(db_path: impl Into<String>) -> Result<Self, minijinja::Error> {
        Ok(Self {
            db_path: db_path.into(),
            templates: Arc::new(Templates::load()?),
        })
    }
}

/// Opens a fresh connection and runs the (idempotent) migration.
pub fn open_dashboard(db_path: &str) -> Result<Dashboard<DbStore>, DashboardError> {
    let conn = schema::open_and_migrate(db_path).map_err(|err| DashboardError::Internal {
        message: err.to_string(),
    })?;
    Ok(Dashboard::new(DbStore::new(conn)))
}

pub fn build_dashboard(state: &AppState) -> Result<Dashboard<DbStore>, DashboardError> {
    open_dashboard(&state.db_path)
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        return;
    }
    info!("shutting down");
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request, StatusCode};
    use lp_core::types::{CourseId, CreateCourseInput, CreateLearnerInput, EnrolInput};
    use tempfile::TempDir;
    use tower::ServiceExt;

    pub struct TestApp {
        pub router: Router,
        pub course_1: CourseId,
        pub course_2: CourseId,
        _dir: TempDir,
    }

    pub struct TestResponse {
        pub status: StatusCode,
        pub headers: HeaderMap,
        pub body: String,
    }

    impl TestResponse {
        pub fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    /// "Course One" and "Course Two"; A has both (80, 40), B has none and
    /// C has course two (90).
    pub fn test_app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("progress.db").to_string_lossy().into_owned();
        let dashboard = open_dashboard(&db_path).unwrap();

        let course = |name: &str| {
            dashboard
                .courses()
                .create(CreateCourseInput {
                    name: name.to_string(),
                })
                .unwrap()
                .id
        };
        let course_1 = course("Course One");
        let course_2 = course("Course Two");

        let learner = |first: &str, last: &str| {
            dashboard
                .learners()
                .create(CreateLearnerInput {
                    firstname: first.to_string(),
                    lastname: last.to_string(),
                })
                .unwrap()
                .id
        };
        let a = learner("Alice", "Archer");
        learner("Bob", "Baker");
        let c = learner("Cara", "Cole");

        for (learner_id, course_id, progress) in
            [(a, course_1, 80.0), (a, course_2, 40.0), (c, course_2, 90.0)]
        {
            dashboard
                .enrolments()
                .enrol(EnrolInput {
                    learner_id,
                    course_id,
                    progress,
                })
                .unwrap();
        }

        let state = AppState::new(db_path).unwrap();
        TestApp {
            router: app(state),
            course_1,
            course_2,
            _dir: dir,
        }
    }

    pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(router: &Router, uri: &str) -> TestResponse {
        send(router, Request::get(uri).body(Body::empty()).unwrap()).await
    }
}
