//! Book routes, mounted under `/books`.

use crate::handlers::books::{create, delete, list, read, update};
use crate::handlers::method_not_allowed;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/:isbn",
            get(read).put(update).delete(delete).fallback(method_not_allowed),
        )
        .with_state(state)
}
