//! Route assembly: per-resource routers, common routes, and the composed app.

mod common;
mod courses;
mod students;

pub use common::{common_routes, common_routes_with_ready};
pub use courses::course_routes;
pub use students::student_routes;

use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// The full application: resource routes mounted at the root and again
/// under `/api/v1`, with trailing slashes trimmed so `/courses/` and
/// `/courses` resolve to the same route.
pub fn app(state: AppState) -> NormalizePath<Router> {
    let api = Router::new()
        .merge(course_routes(state.clone()))
        .merge(student_routes(state.clone()));
    let router = Router::new()
        .merge(common_routes_with_ready(state))
        .merge(api.clone())
        .nest("/api/v1", api);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
