//! Resource rows, representations, and request payloads.

use serde::{Deserialize, Deserializer, Serialize};

/// A courses-table row. The API representation is [`Course`], which adds
/// the associated student ids.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub name: String,
}

/// Course representation: `{id, name, students}` with student ids sorted
/// ascending.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub students: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
}

/// Body of `POST /courses`.
#[derive(Debug, Deserialize)]
pub struct NewCourse {
    pub name: String,
    #[serde(default, deserialize_with = "student_ids")]
    pub students: Vec<i64>,
}

/// Body of `PUT /courses/{id}`: name is required, associations are
/// replaced only when `students` is present.
#[derive(Debug, Deserialize)]
pub struct CourseUpdate {
    pub name: String,
    #[serde(default, deserialize_with = "opt_student_ids")]
    pub students: Option<Vec<i64>>,
}

/// Body of `PATCH /courses/{id}`: any subset of fields; absent fields are
/// left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct CoursePatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_student_ids")]
    pub students: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
pub struct NewStudent {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
}

/// Query parameters of `GET /courses`: exact-match filters plus optional
/// paging. Unknown parameters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CourseFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Student ids arrive as integers or decimal strings (clients following
/// the original API send `["1", "2"]`).
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Num(i64),
    Text(String),
}

fn coerce_ids<E: serde::de::Error>(raw: Vec<IdRepr>) -> Result<Vec<i64>, E> {
    raw.into_iter()
        .map(|r| match r {
            IdRepr::Num(n) => Ok(n),
            IdRepr::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("invalid student id '{}'", s))),
        })
        .collect()
}

fn student_ids<'de, D>(de: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    coerce_ids(Vec::<IdRepr>::deserialize(de)?)
}

fn opt_student_ids<'de, D>(de: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<IdRepr>>::deserialize(de)? {
        Some(raw) => Ok(Some(coerce_ids(raw)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_ids_accept_numbers_and_strings() {
        let new: NewCourse =
            serde_json::from_value(json!({"name": "course_1", "students": [1, "2"]})).unwrap();
        assert_eq!(new.students, vec![1, 2]);
    }

    #[test]
    fn student_ids_reject_non_numeric_strings() {
        let res: Result<NewCourse, _> =
            serde_json::from_value(json!({"name": "course_1", "students": ["seven"]}));
        assert!(res.is_err());
    }

    #[test]
    fn students_default_to_empty() {
        let new: NewCourse = serde_json::from_value(json!({"name": "course_1"})).unwrap();
        assert!(new.students.is_empty());
    }

    #[test]
    fn patch_fields_are_optional() {
        let patch: CoursePatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.name.is_none());
        assert!(patch.students.is_none());
    }
}
