//! Router assembly: book routes, common routes, and the middleware stack.

mod books;
mod common;

pub use books::book_routes;
pub use common::common_routes_with_ready;

use crate::error::{internal_message, ErrorEnvelope, ErrorMessage};
use crate::handlers::fallback;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Full application: `/books`, health/ready/version, JSON 404 fallback, panic and body-size guards.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/books", book_routes(state))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(DefaultBodyLimit::max(body_limit_bytes)),
        )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "handler panicked");
    ErrorEnvelope::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorMessage::Single(internal_message()),
    )
    .into_response()
}
