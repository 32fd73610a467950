//! Course CRUD routes.

use crate::handlers::courses::{create, delete as delete_handler, list, read, replace, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn course_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(list).post(create))
        .route(
            "/courses/:id",
            get(read).put(replace).patch(update).delete(delete_handler),
        )
        .with_state(state)
}
