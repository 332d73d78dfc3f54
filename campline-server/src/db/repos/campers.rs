//! Camper repository
//!
//! Reads and writes for the campers table, plus the joined read that
//! pulls a camper's signups with their activities.

use sqlx::{FromRow, Row, SqlitePool};

use super::signups::SignupWithActivity;
use super::DbError;
use crate::models::{CamperAge, CamperName, CamperPatch};

/// Camper record from database
#[derive(Debug, Clone, FromRow)]
pub struct Camper {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// Camper with its signups, each joined with the signed-up activity
#[derive(Debug, Clone)]
pub struct CamperDetail {
    pub camper: Camper,
    pub signups: Vec<SignupWithActivity>,
}

/// Camper repository
pub struct CamperRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CamperRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all campers, ordered by id.
    pub async fn list(&self) -> Result<Vec<Camper>, DbError> {
        let campers = sqlx::query_as("SELECT id, name, age FROM campers ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(campers)
    }

    /// Get a single camper by id.
    pub async fn get(&self, id: i64) -> Result<Camper, DbError> {
        let camper = sqlx::query_as("SELECT id, name, age FROM campers WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "Camper",
                id,
            })?;

        Ok(camper)
    }

    /// Get a camper together with its signups and their activities.
    ///
    /// Single JOIN for the signup side (no N+1).
    pub async fn get_with_signups(&self, id: i64) -> Result<CamperDetail, DbError> {
        let camper = self.get(id).await?;

        let rows = sqlx::query(
            r#"
            SELECT
                s.id,
                s.time,
                s.camper_id,
                s.activity_id,
                a.name as activity_name,
                a.difficulty as activity_difficulty
            FROM signups s
            JOIN activities a ON a.id = s.activity_id
            WHERE s.camper_id = ?
            ORDER BY s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let signups = rows
            .into_iter()
            .map(|r| SignupWithActivity {
                id: r.get("id"),
                time: r.get("time"),
                camper_id: r.get("camper_id"),
                activity_id: r.get("activity_id"),
                activity_name: r.get("activity_name"),
                activity_difficulty: r.get("activity_difficulty"),
            })
            .collect();

        Ok(CamperDetail { camper, signups })
    }

    /// Create a camper. Fields are validated before this is called.
    pub async fn create(&self, name: &CamperName, age: CamperAge) -> Result<Camper, DbError> {
        let camper = sqlx::query_as(
            r#"
            INSERT INTO campers (name, age)
            VALUES (?, ?)
            RETURNING id, name, age
            "#,
        )
        .bind(name.as_str())
        .bind(age.get())
        .fetch_one(self.pool)
        .await?;

        Ok(camper)
    }

    /// Apply a partial update and return the merged camper.
    ///
    /// Only the fields present in the patch change; the rest keep
    /// their stored values.
    pub async fn update(&self, id: i64, patch: CamperPatch) -> Result<Camper, DbError> {
        let current = self.get(id).await?;

        let name = patch
            .name
            .map(CamperName::into_string)
            .unwrap_or(current.name);
        let age = patch.age.map(CamperAge::get).unwrap_or(current.age);

        let camper = sqlx::query_as(
            r#"
            UPDATE campers
            SET name = ?, age = ?
            WHERE id = ?
            RETURNING id, name, age
            "#,
        )
        .bind(&name)
        .bind(age)
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(camper)
    }
}
