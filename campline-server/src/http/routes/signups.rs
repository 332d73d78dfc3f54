//! Signup endpoint
//!
//! Signups are only created here; they disappear through the
//! activity cascade delete and are otherwise immutable.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{SignupDetail, SignupRepo};
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::routes::activities::ActivityResponse;
use crate::http::routes::campers::CamperResponse;
use crate::http::server::AppState;
use crate::models::{SignupTime, ValidationError};

/// Create signup request
#[derive(Deserialize)]
pub struct CreateSignupRequest {
    pub camper_id: i64,
    pub activity_id: i64,
    pub time: i64,
}

/// Signup response with both referenced entities.
///
/// The nested camper and activity carry no signup lists, so the
/// serialization cannot recurse back into this signup.
#[derive(Serialize)]
pub struct SignupResponse {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub camper: CamperResponse,
    pub activity: ActivityResponse,
}

impl From<SignupDetail> for SignupResponse {
    fn from(d: SignupDetail) -> Self {
        Self {
            id: d.signup.id,
            time: d.signup.time,
            camper_id: d.signup.camper_id,
            activity_id: d.signup.activity_id,
            camper: CamperResponse::from(d.camper),
            activity: ActivityResponse::from(d.activity),
        }
    }
}

/// POST /signups - create a signup
///
/// A dangling camper or activity reference is a validation failure
/// here, not a not-found: the signup is the resource being created
/// and its foreign keys are just fields that failed their check.
async fn create_signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let time = SignupTime::new(req.time)?;

    let detail = SignupRepo::new(&state.pool)
        .create(req.camper_id, req.activity_id, time)
        .await
        .map_err(|e| match e {
            DbError::NotFound { resource, id } => {
                ApiError::Validation(ValidationError::MissingReference {
                    field: match resource {
                        "Camper" => "camper_id",
                        _ => "activity_id",
                    },
                    id,
                })
            }
            other => ApiError::from(other),
        })?;

    Ok((StatusCode::CREATED, Json(SignupResponse::from(detail))))
}

/// Signup routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/signups", post(create_signup))
}
