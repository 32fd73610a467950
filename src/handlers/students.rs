//! Student handlers: same contract shape as courses.

use crate::error::AppError;
use crate::models::{NewStudent, StudentFilter, StudentPatch};
use crate::service::StudentService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let students = StudentService::list(&state.pool, &filter).await?;
    Ok((StatusCode::OK, Json(students)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewStudent>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student = StudentService::create(&state.pool, &body).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student = StudentService::read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok((StatusCode::OK, Json(student)))
}

/// PUT: rename. The student resource has no other writable field, so the
/// full update and the partial update coincide.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NewStudent>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let change = StudentPatch { name: Some(body.name) };
    let student = StudentService::update(&state.pool, id, &change)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok((StatusCode::OK, Json(student)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<StudentPatch>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student = StudentService::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok((StatusCode::OK, Json(student)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if StudentService::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("student {}", id)))
    }
}
