//! Student CRUD against the store.

use crate::error::AppError;
use crate::models::{NewStudent, Student, StudentFilter, StudentPatch};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct StudentService;

impl StudentService {
    /// List students with optional exact-match filters, ordered by id.
    pub async fn list(pool: &SqlitePool, filter: &StudentFilter) -> Result<Vec<Student>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id, name FROM students WHERE 1=1");
        if let Some(id) = filter.id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = &filter.name {
            qb.push(" AND name = ").push_bind(name.clone());
        }
        qb.push(" ORDER BY id");
        if filter.limit.is_some() || filter.offset.is_some() {
            qb.push(" LIMIT ").push_bind(filter.limit.map_or(-1, i64::from));
            qb.push(" OFFSET ").push_bind(i64::from(filter.offset.unwrap_or(0)));
        }
        tracing::debug!(?filter, "list students");
        let rows = qb.build_query_as().fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as("SELECT id, name FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(pool: &SqlitePool, new: &NewStudent) -> Result<Student, AppError> {
        tracing::debug!(name = %new.name, "create student");
        let row = sqlx::query_as("INSERT INTO students (name) VALUES (?) RETURNING id, name")
            .bind(&new.name)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Rename a student; absent name leaves the row unchanged. Returns
    /// None for an unknown id.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        change: &StudentPatch,
    ) -> Result<Option<Student>, AppError> {
        tracing::debug!(id, "update student");
        let row = match &change.name {
            Some(name) => {
                sqlx::query_as("UPDATE students SET name = ? WHERE id = ? RETURNING id, name")
                    .bind(name)
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT id, name FROM students WHERE id = ?")
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
        };
        Ok(row)
    }

    /// Delete a student and any association rows pointing at it. Courses
    /// are never touched. Returns false for an unknown id.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        tracing::debug!(id, "delete student");
        sqlx::query("DELETE FROM course_students WHERE student_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let done = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(done.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ensure_schema;

    #[tokio::test]
    async fn filter_by_name_matches_exactly() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        for name in ["ada", "grace", "ada"] {
            StudentService::create(&pool, &NewStudent { name: name.into() })
                .await
                .unwrap();
        }
        let filter = StudentFilter {
            name: Some("ada".into()),
            ..StudentFilter::default()
        };
        let students = StudentService::list(&pool, &filter).await.unwrap();
        assert_eq!(students.len(), 2);
        assert!(students.iter().all(|s| s.name == "ada"));
        assert!(students[0].id < students[1].id);
    }
}
