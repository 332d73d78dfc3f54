//! Activity endpoints
//!
//! Activities are read-only over HTTP except for deletion, which
//! cascades over the activity's signups. Creation happens through the
//! seeding path only.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;

use crate::db::repos::{Activity, ActivityRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Activity response
#[derive(Serialize)]
pub struct ActivityResponse {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

impl From<Activity> for ActivityResponse {
    fn from(a: Activity) -> Self {
        Self {
            id: a.id,
            name: a.name,
            difficulty: a.difficulty,
        }
    }
}

/// GET /activities - list all activities
async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let activities = ActivityRepo::new(&state.pool).list().await?;

    Ok(Json(
        activities.into_iter().map(ActivityResponse::from).collect(),
    ))
}

/// DELETE /activities/{id} - delete an activity and its signups
async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ActivityRepo::new(&state.pool).delete_cascade(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Activity routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/{id}", delete(delete_activity))
}
