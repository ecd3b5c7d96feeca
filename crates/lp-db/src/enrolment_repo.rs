use crate::util::{from_rfc3339, to_rfc3339};
use chrono::{DateTime, Utc};
use lp_core::enrolments::EnrolmentRepository;
use lp_core::error::EnrolmentError;
use lp_core::types::{
    CourseId, EnrolInput, Enrolment, EnrolmentId, EnrolmentWithCourse, LearnerId,
};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};

pub struct EnrolmentRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> EnrolmentRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn exists(&self, sql: &str, id: i64) -> Result<bool, EnrolmentError> {
        self.conn
            .query_row(sql, [id], |_| Ok(()))
            .optional()
            .map(|found| found.is_some())
            .map_err(storage)
    }
}

fn storage(err: rusqlite::Error) -> EnrolmentError {
    EnrolmentError::Storage {
        message: err.to_string(),
    }
}

fn timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    from_rfc3339(&value)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn map_enrolment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Enrolment> {
    Ok(Enrolment {
        id: EnrolmentId::new(row.get(0)?),
        learner_id: LearnerId::new(row.get(1)?),
        course_id: CourseId::new(row.get(2)?),
        progress: row.get(3)?,
        created_at: timestamp(row, 4)?,
        updated_at: timestamp(row, 5)?,
    })
}

fn map_detail_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EnrolmentWithCourse> {
    Ok(EnrolmentWithCourse {
        id: EnrolmentId::new(row.get(0)?),
        learner_id: LearnerId::new(row.get(1)?),
        course_id: CourseId::new(row.get(2)?),
        course_name: row.get(3)?,
        progress: row.get(4)?,
        created_at: timestamp(row, 5)?,
    })
}

impl EnrolmentRepository for EnrolmentRepo<'_> {
    fn enrol(&self, input: EnrolInput) -> Result<Enrolment, EnrolmentError> {
        if !self.exists("SELECT 1 FROM learners WHERE id = ?1", input.learner_id.get())? {
            return Err(EnrolmentError::LearnerNotFound);
        }
        if !self.exists("SELECT 1 FROM courses WHERE id = ?1", input.course_id.get())? {
            return Err(EnrolmentError::CourseNotFound);
        }
        let existing = self
            .conn
            .query_row(
                "SELECT id FROM enrolments WHERE learner_id = ?1 AND course_id = ?2",
                params![input.learner_id.get(), input.course_id.get()],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(storage)?;
        if existing.is_some() {
            return Err(EnrolmentError::AlreadyEnrolled);
        }

        let now = chrono::Utc::now();
        let stamp = to_rfc3339(&now);
        self.conn
            .execute(
                "INSERT INTO enrolments (learner_id, course_id, progress, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
                params![
                    input.learner_id.get(),
                    input.course_id.get(),
                    input.progress,
                    stamp
                ],
            )
            .map_err(storage)?;
        let id = EnrolmentId::new(self.conn.last_insert_rowid());
        // Read back so the caller sees the stored (microsecond) timestamps.
        self.get(id)?.ok_or(EnrolmentError::NotFound)
    }

    fn get(&self, id: EnrolmentId) -> Result<Option<Enrolment>, EnrolmentError> {
        self.conn
            .query_row(
                "SELECT id, learner_id, course_id, progress, created_at, updated_at FROM enrolments WHERE id = ?1",
                [id.get()],
                map_enrolment_row,
            )
            .optional()
            .map_err(storage)
    }

    fn update_progress(
        &self,
        id: EnrolmentId,
        progress: f64,
    ) -> Result<Enrolment, EnrolmentError> {
        let now = to_rfc3339(&chrono::Utc::now());
        let changed = self
            .conn
            .execute(
                "UPDATE enrolments SET progress = ?1, updated_at = ?2 WHERE id = ?3",
                params![progress, now, id.get()],
            )
            .map_err(storage)?;
        if changed == 0 {
            return Err(EnrolmentError::NotFound);
        }
        self.get(id)?.ok_or(EnrolmentError::NotFound)
    }

    fn list_with_courses(
        &self,
        course_id: Option<CourseId>,
    ) -> Result<Vec<EnrolmentWithCourse>, EnrolmentError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT e.id, e.learner_id, e.course_id, c.name, e.progress, e.created_at \
                 FROM enrolments e \
                 JOIN courses c ON c.id = e.course_id \
                 WHERE (?1 IS NULL OR e.course_id = ?1) \
                 ORDER BY e.learner_id ASC, e.created_at ASC, e.id ASC",
            )
            .map_err(storage)?;
        let rows = stmt
            .query_map([course_id.map(CourseId::get)], map_detail_row)
            .map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }
}
