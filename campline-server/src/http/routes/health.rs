//! Liveness endpoint

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

/// GET / - liveness check, empty 200
async fn root() -> StatusCode {
    StatusCode::OK
}

/// Liveness routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
