use crate::util::to_rfc3339;
use lp_core::courses::CourseRepository;
use lp_core::error::CourseError;
use lp_core::types::{Course, CourseId, CreateCourseInput};
use rusqlite::{Connection, OptionalExtension, params};

pub struct CourseRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> CourseRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn storage(err: rusqlite::Error) -> CourseError {
    CourseError::Storage {
        message: err.to_string(),
    }
}

fn map_course_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: CourseId::new(row.get(0)?),
        name: row.get(1)?,
    })
}

impl CourseRepository for CourseRepo<'_> {
    fn create(&self, input: CreateCourseInput) -> Result<Course, CourseError> {
        let now = to_rfc3339(&chrono::Utc::now());
        self.conn
            .execute(
                "INSERT INTO courses (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
                params![input.name, now],
            )
            .map_err(storage)?;
        Ok(Course {
            id: CourseId::new(self.conn.last_insert_rowid()),
            name: input.name,
        })
    }

    fn get(&self, id: CourseId) -> Result<Option<Course>, CourseError> {
        self.conn
            .query_row(
                "SELECT id, name FROM courses WHERE id = ?1",
                [id.get()],
                map_course_row,
            )
            .optional()
            .map_err(storage)
    }

    fn list(&self) -> Result<Vec<Course>, CourseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM courses ORDER BY name COLLATE NOCASE ASC, id ASC")
            .map_err(storage)?;
        let rows = stmt.query_map([], map_course_row).map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    fn rename(&self, id: CourseId, name: String) -> Result<Course, CourseError> {
        let now = to_rfc3339(&chrono::Utc::now());
        let changed = self
            .conn
            .execute(
                "UPDATE courses SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, now, id.get()],
            )
            .map_err(storage)?;
        if changed == 0 {
            return Err(CourseError::NotFound);
        }
        Ok(Course { id, name })
    }

    fn delete(&self, id: CourseId) -> Result<(), CourseError> {
        let changed = self
            .conn
            .execute("DELETE FROM courses WHERE id = ?1", [id.get()])
            .map_err(storage)?;
        if changed == 0 {
            return Err(CourseError::NotFound);
        }
        Ok(())
    }
}
