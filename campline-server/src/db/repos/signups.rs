//! Signup repository
//!
//! Signups are created through one transactional path that verifies
//! both foreign rows before inserting. They are never updated or
//! deleted on their own; removal happens only as a cascade from
//! activity deletion.

use sqlx::{FromRow, SqlitePool};

use super::activities::Activity;
use super::campers::Camper;
use super::DbError;
use crate::models::SignupTime;

/// Signup record from database
#[derive(Debug, Clone, FromRow)]
pub struct Signup {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
}

/// Signup row joined with its activity, for camper detail reads
#[derive(Debug, Clone)]
pub struct SignupWithActivity {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub activity_name: String,
    pub activity_difficulty: i64,
}

/// Freshly created signup with both referenced rows
#[derive(Debug, Clone)]
pub struct SignupDetail {
    pub signup: Signup,
    pub camper: Camper,
    pub activity: Activity,
}

/// Signup repository
pub struct SignupRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SignupRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a signup (atomic).
    ///
    /// Verifies camper and activity inside the transaction so the
    /// insert cannot race a concurrent cascade delete. A dangling
    /// reference surfaces as `DbError::NotFound` naming the missing
    /// side; the handler decides how that maps onto the wire.
    pub async fn create(
        &self,
        camper_id: i64,
        activity_id: i64,
        time: SignupTime,
    ) -> Result<SignupDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let camper: Camper = sqlx::query_as("SELECT id, name, age FROM campers WHERE id = ?")
            .bind(camper_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                resource: "Camper",
                id: camper_id,
            })?;

        let activity: Activity =
            sqlx::query_as("SELECT id, name, difficulty FROM activities WHERE id = ?")
                .bind(activity_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(DbError::NotFound {
                    resource: "Activity",
                    id: activity_id,
                })?;

        let signup: Signup = sqlx::query_as(
            r#"
            INSERT INTO signups (time, camper_id, activity_id)
            VALUES (?, ?, ?)
            RETURNING id, time, camper_id, activity_id
            "#,
        )
        .bind(time.get())
        .bind(camper_id)
        .bind(activity_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SignupDetail {
            signup,
            camper,
            activity,
        })
    }
}
