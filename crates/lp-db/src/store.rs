use lp_core::error::DashboardError;
use lp_core::store::Store;
use rusqlite::Connection;

use crate::course_repo::CourseRepo;
use crate::enrolment_repo::EnrolmentRepo;
use crate::learner_repo::LearnerRepo;

pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn tx_error(err: &rusqlite::Error) -> DashboardError {
    DashboardError::Internal {
        message: err.to_string(),
    }
}

impl Store for DbStore {
    type Courses<'a>
        = CourseRepo<'a>
    where
        Self: 'a;
    type Learners<'a>
        = LearnerRepo<'a>
    where
        Self: 'a;
    type Enrolments<'a>
        = EnrolmentRepo<'a>
    where
        Self: 'a;

    fn courses(&self) -> Self::Courses<'_> {
        CourseRepo::new(&self.conn)
    }

    fn learners(&self) -> Self::Learners<'_> {
        LearnerRepo::new(&self.conn)
    }

    fn enrolments(&self) -> Self::Enrolments<'_> {
        EnrolmentRepo::new(&self.conn)
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&Self) -> Result<T, DashboardError>,
    {
        self.run_tx("BEGIN IMMEDIATE", f)
    }

    fn with_read_tx<F, T>(&self, f: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&Self) -> Result<T, DashboardError>,
    {
        if !self.conn.is_autocommit() {
            return f(self);
        }
        self.run_tx("BEGIN DEFERRED", f)
    }
}

impl DbStore {
    fn run_tx<F, T>(&self, begin: &str, f: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&Self) -> Result<T, DashboardError>,
    {
        self.conn.execute_batch(begin).map_err(|err| tx_error(&err))?;
        match f(self) {
            Ok(value) => {
                self.conn
                    .execute_batch("COMMIT")
                    .map_err(|err| tx_error(&err))?;
                Ok(value)
            }
            Err(err) => {
                self.conn
                    .execute_batch("ROLLBACK")
                    .map_err(|rollback_err| tx_error(&rollback_err))?;
                Err(err)
            }
        }
    }
}
