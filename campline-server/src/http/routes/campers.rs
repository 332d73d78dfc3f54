//! Camper endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::repos::{Camper, CamperDetail, CamperRepo, SignupWithActivity};
use crate::http::error::ApiError;
use crate::http::routes::activities::ActivityResponse;
use crate::http::server::AppState;
use crate::models::{CamperAge, CamperName, CamperPatch, ValidationError};

/// Create camper request
#[derive(Deserialize)]
pub struct CreateCamperRequest {
    pub name: String,
    pub age: i64,
}

/// Camper response without signups (list and update bodies)
#[derive(Serialize)]
pub struct CamperResponse {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl From<Camper> for CamperResponse {
    fn from(c: Camper) -> Self {
        Self {
            id: c.id,
            name: c.name,
            age: c.age,
        }
    }
}

/// Camper response with signups (create and detail bodies).
///
/// Each nested signup carries its activity but no camper, so the
/// camper/signup cycle cannot appear in the output.
#[derive(Serialize)]
pub struct CamperWithSignups {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub signups: Vec<NestedSignup>,
}

/// Signup nested inside a camper response
#[derive(Serialize)]
pub struct NestedSignup {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub activity: ActivityResponse,
}

impl From<SignupWithActivity> for NestedSignup {
    fn from(s: SignupWithActivity) -> Self {
        Self {
            id: s.id,
            time: s.time,
            camper_id: s.camper_id,
            activity_id: s.activity_id,
            activity: ActivityResponse {
                id: s.activity_id,
                name: s.activity_name,
                difficulty: s.activity_difficulty,
            },
        }
    }
}

impl From<CamperDetail> for CamperWithSignups {
    fn from(d: CamperDetail) -> Self {
        Self {
            id: d.camper.id,
            name: d.camper.name,
            age: d.camper.age,
            signups: d.signups.into_iter().map(NestedSignup::from).collect(),
        }
    }
}

/// GET /campers - list all campers without signup details
async fn list_campers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CamperResponse>>, ApiError> {
    let campers = CamperRepo::new(&state.pool).list().await?;

    Ok(Json(campers.into_iter().map(CamperResponse::from).collect()))
}

/// POST /campers - create a camper
async fn create_camper(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCamperRequest>,
) -> Result<(StatusCode, Json<CamperWithSignups>), ApiError> {
    let name = CamperName::new(&req.name)?;
    let age = CamperAge::new(req.age)?;

    let camper = CamperRepo::new(&state.pool).create(&name, age).await?;

    let body = CamperWithSignups {
        id: camper.id,
        name: camper.name,
        age: camper.age,
        signups: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /campers/{id} - get a camper with its signups and activities
async fn get_camper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CamperWithSignups>, ApiError> {
    let detail = CamperRepo::new(&state.pool).get_with_signups(id).await?;
    Ok(Json(CamperWithSignups::from(detail)))
}

/// PATCH /campers/{id} - partial update from an allow-listed field set
async fn update_camper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CamperResponse>), ApiError> {
    let repo = CamperRepo::new(&state.pool);

    // Not-found takes precedence over a bad body
    repo.get(id).await?;

    let patch = parse_patch(&body)?;
    let camper = repo.update(id, patch).await?;

    Ok((StatusCode::ACCEPTED, Json(CamperResponse::from(camper))))
}

/// Build a `CamperPatch` from a PATCH body, rejecting anything
/// outside the allow-list (`name`, `age`).
fn parse_patch(body: &Value) -> Result<CamperPatch, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::InvalidType {
        field: "request body",
        expected: "a JSON object",
    })?;

    let mut patch = CamperPatch::default();
    for (key, value) in object {
        match key.as_str() {
            "name" => {
                let name = value.as_str().ok_or(ValidationError::InvalidType {
                    field: "name",
                    expected: "a string",
                })?;
                patch.name = Some(CamperName::new(name)?);
            }
            "age" => {
                let age = value.as_i64().ok_or(ValidationError::InvalidType {
                    field: "age",
                    expected: "an integer",
                })?;
                patch.age = Some(CamperAge::new(age)?);
            }
            other => {
                return Err(ValidationError::UnknownField {
                    field: other.to_owned(),
                })
            }
        }
    }

    Ok(patch)
}

/// Camper routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/campers", get(list_campers).post(create_camper))
        .route("/campers/{id}", get(get_camper).patch(update_camper))
}
