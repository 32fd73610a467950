//! Course CRUD against the store.

use crate::error::AppError;
use crate::models::{Course, CourseFilter, CoursePatch, CourseRow, NewCourse};
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use std::collections::{HashMap, HashSet};

pub struct CourseService;

impl CourseService {
    /// List courses with optional exact-match filters on id and name,
    /// ordered by id (insertion order). No filter returns every row.
    pub async fn list(pool: &SqlitePool, filter: &CourseFilter) -> Result<Vec<Course>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id, name FROM courses WHERE 1=1");
        if let Some(id) = filter.id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = &filter.name {
            qb.push(" AND name = ").push_bind(name.clone());
        }
        qb.push(" ORDER BY id");
        if filter.limit.is_some() || filter.offset.is_some() {
            // LIMIT -1 is SQLite for "no limit"; needed when only offset is given.
            qb.push(" LIMIT ").push_bind(filter.limit.map_or(-1, i64::from));
            qb.push(" OFFSET ").push_bind(i64::from(filter.offset.unwrap_or(0)));
        }
        tracing::debug!(?filter, "list courses");
        let rows: Vec<CourseRow> = qb.build_query_as().fetch_all(pool).await?;
        attach_students(pool, rows).await
    }

    /// Fetch one course by id with its student ids.
    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<Course>, AppError> {
        let row: Option<CourseRow> = sqlx::query_as("SELECT id, name FROM courses WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => {
                let mut courses = attach_students(pool, vec![row]).await?;
                Ok(courses.pop())
            }
            None => Ok(None),
        }
    }

    /// Insert a course and its associations in one transaction. Returns
    /// the created representation.
    pub async fn create(pool: &SqlitePool, new: &NewCourse) -> Result<Course, AppError> {
        let mut tx = pool.begin().await?;
        tracing::debug!(name = %new.name, "create course");
        let row: CourseRow = sqlx::query_as("INSERT INTO courses (name) VALUES (?) RETURNING id, name")
            .bind(&new.name)
            .fetch_one(&mut *tx)
            .await?;
        let students = replace_students(&mut tx, row.id, &new.students).await?;
        tx.commit().await?;
        Ok(Course {
            id: row.id,
            name: row.name,
            students,
        })
    }

    /// Partial update: name and/or associations; absent fields unchanged.
    /// Returns None for an unknown id.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        change: &CoursePatch,
    ) -> Result<Option<Course>, AppError> {
        let mut tx = pool.begin().await?;
        tracing::debug!(id, "update course");
        let row: Option<CourseRow> = match &change.name {
            Some(name) => {
                sqlx::query_as("UPDATE courses SET name = ? WHERE id = ? RETURNING id, name")
                    .bind(name)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT id, name FROM courses WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
        };
        let Some(row) = row else {
            return Ok(None);
        };
        let students = match &change.students {
            Some(ids) => replace_students(&mut tx, id, ids).await?,
            None => current_students(&mut tx, id).await?,
        };
        tx.commit().await?;
        Ok(Some(Course {
            id: row.id,
            name: row.name,
            students,
        }))
    }

    /// Delete a course and its association rows. Student rows are never
    /// touched. Returns false for an unknown id.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        tracing::debug!(id, "delete course");
        sqlx::query("DELETE FROM course_students WHERE course_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let done = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(done.rows_affected() > 0)
    }
}

/// Batch-load student ids for the given rows with a single IN query and
/// build the representations, keeping row order.
async fn attach_students(pool: &SqlitePool, rows: Vec<CourseRow>) -> Result<Vec<Course>, AppError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT course_id, student_id FROM course_students WHERE course_id IN (");
    let mut sep = qb.separated(", ");
    for row in &rows {
        sep.push_bind(row.id);
    }
    sep.push_unseparated(") ORDER BY student_id");
    let links: Vec<(i64, i64)> = qb.build_query_as().fetch_all(pool).await?;

    let mut by_course: HashMap<i64, Vec<i64>> = HashMap::new();
    for (course_id, student_id) in links {
        by_course.entry(course_id).or_default().push(student_id);
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            let students = by_course.remove(&row.id).unwrap_or_default();
            Course {
                id: row.id,
                name: row.name,
                students,
            }
        })
        .collect())
}

async fn current_students(
    tx: &mut Transaction<'_, Sqlite>,
    course_id: i64,
) -> Result<Vec<i64>, AppError> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT student_id FROM course_students WHERE course_id = ? ORDER BY student_id",
    )
    .bind(course_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Make the association rows for `course_id` equal to `ids`. Every id
/// must name an existing student. Returns the stored set, sorted.
async fn replace_students(
    tx: &mut Transaction<'_, Sqlite>,
    course_id: i64,
    ids: &[i64],
) -> Result<Vec<i64>, AppError> {
    let mut ids: Vec<i64> = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if !ids.is_empty() {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM students WHERE id IN (");
        let mut sep = qb.separated(", ");
        for id in &ids {
            sep.push_bind(*id);
        }
        sep.push_unseparated(")");
        let known: Vec<(i64,)> = qb.build_query_as().fetch_all(&mut **tx).await?;
        let known: HashSet<i64> = known.into_iter().map(|(id,)| id).collect();
        if let Some(missing) = ids.iter().find(|id| !known.contains(id)) {
            return Err(AppError::Validation(format!("unknown student id {}", missing)));
        }
    }

    sqlx::query("DELETE FROM course_students WHERE course_id = ?")
        .bind(course_id)
        .execute(&mut **tx)
        .await?;
    for id in &ids {
        sqlx::query("INSERT INTO course_students (course_id, student_id) VALUES (?, ?)")
            .bind(course_id)
            .bind(*id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(ids)
}
