//! Course handlers: list, create, read, replace, update, delete.

use crate::error::AppError;
use crate::models::{CourseFilter, CoursePatch, CourseUpdate, NewCourse};
use crate::service::CourseService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let courses = CourseService::list(&state.pool, &filter).await?;
    Ok((StatusCode::OK, Json(courses)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewCourse>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let course = CourseService::create(&state.pool, &body).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let course = CourseService::read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id)))?;
    Ok((StatusCode::OK, Json(course)))
}

/// PUT: full update. Name is required; associations are replaced when
/// `students` is present.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CourseUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let change = CoursePatch {
        name: Some(body.name),
        students: body.students,
    };
    let course = CourseService::update(&state.pool, id, &change)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id)))?;
    Ok((StatusCode::OK, Json(course)))
}

/// PATCH: partial update; unspecified fields unchanged.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CoursePatch>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let course = CourseService::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id)))?;
    Ok((StatusCode::OK, Json(course)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if CourseService::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("course {}", id)))
    }
}
