use crate::util::to_rfc3339;
use lp_core::error::LearnerError;
use lp_core::learners::LearnerRepository;
use lp_core::types::{CreateLearnerInput, Learner, LearnerId};
use rusqlite::{Connection, OptionalExtension, params};

pub struct LearnerRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> LearnerRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn storage(err: rusqlite::Error) -> LearnerError {
    LearnerError::Storage {
        message: err.to_string(),
    }
}

fn map_learner_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Learner> {
    Ok(Learner {
        id: LearnerId::new(row.get(0)?),
        firstname: row.get(1)?,
        lastname: row.get(2)?,
    })
}

impl LearnerRepository for LearnerRepo<'_> {
    fn create(&self, input: CreateLearnerInput) -> Result<Learner, LearnerError> {
        let now = to_rfc3339(&chrono::Utc::now());
        self.conn
            .execute(
                "INSERT INTO learners (firstname, lastname, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                params![input.firstname, input.lastname, now],
            )
            .map_err(storage)?;
        Ok(Learner {
            id: LearnerId::new(self.conn.last_insert_rowid()),
            firstname: input.firstname,
            lastname: input.lastname,
        })
    }

    fn get(&self, id: LearnerId) -> Result<Option<Learner>, LearnerError> {
        self.conn
            .query_row(
                "SELECT id, firstname, lastname FROM learners WHERE id = ?1",
                [id.get()],
                map_learner_row,
            )
            .optional()
            .map_err(storage)
    }

    fn list(&self) -> Result<Vec<Learner>, LearnerError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, firstname, lastname FROM learners ORDER BY id ASC")
            .map_err(storage)?;
        let rows = stmt.query_map([], map_learner_row).map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    fn delete(&self, id: LearnerId) -> Result<(), LearnerError> {
        let changed = self
            .conn
            .execute("DELETE FROM learners WHERE id = ?1", [id.get()])
            .map_err(storage)?;
        if changed == 0 {
            return Err(LearnerError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;

    #[test]
    fn create_then_list_in_id_order() {
        let conn = with_test_db().unwrap();
        let repo = LearnerRepo::new(&conn);
        let first = repo
            .create(CreateLearnerInput {
                firstname: "Zed".to_string(),
                lastname: "Shaw".to_string(),
            })
            .unwrap();
        let second = repo
            .create(CreateLearnerInput {
                firstname: "Ada".to_string(),
                lastname: "Lovelace".to_string(),
            })
            .unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed, vec![first, second]);
        assert_eq!(listed[1].full_name(), "Ada Lovelace");
    }

    #[test]
    fn delete_missing_learner_is_not_found() {
        let conn = with_test_db().unwrap();
        let repo = LearnerRepo::new(&conn);
        assert!(matches!(
            repo.delete(LearnerId::new(9)),
            Err(LearnerError::NotFound)
        ));
    }
}
