//! Activity repository
//!
//! Activities have no creation endpoint; rows arrive through the
//! seeding path (`insert`). Deletion cascades over the signups that
//! reference the activity, inside one transaction.

use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// Activity record from database
#[derive(Debug, Clone, FromRow)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

/// Activity repository
pub struct ActivityRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ActivityRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all activities, ordered by id.
    pub async fn list(&self) -> Result<Vec<Activity>, DbError> {
        let activities = sqlx::query_as("SELECT id, name, difficulty FROM activities ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(activities)
    }

    /// Get a single activity by id.
    pub async fn get(&self, id: i64) -> Result<Activity, DbError> {
        let activity = sqlx::query_as("SELECT id, name, difficulty FROM activities WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "Activity",
                id,
            })?;

        Ok(activity)
    }

    /// Insert an activity directly (seeding path; no HTTP endpoint).
    pub async fn insert(&self, name: &str, difficulty: i64) -> Result<Activity, DbError> {
        let activity = sqlx::query_as(
            r#"
            INSERT INTO activities (name, difficulty)
            VALUES (?, ?)
            RETURNING id, name, difficulty
            "#,
        )
        .bind(name)
        .bind(difficulty)
        .fetch_one(self.pool)
        .await?;

        Ok(activity)
    }

    /// Delete an activity and every signup referencing it (atomic).
    ///
    /// Both deletes run in one transaction; either the activity and
    /// all its signups disappear together or nothing changes.
    pub async fn delete_cascade(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM activities WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists.0 {
            return Err(DbError::NotFound {
                resource: "Activity",
                id,
            });
        }

        let removed = sqlx::query("DELETE FROM signups WHERE activity_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            activity_id = id,
            signups_removed = removed.rows_affected(),
            "activity deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{CamperRepo, SignupRepo};
    use crate::db::{create_memory_pool, migrations};
    use crate::models::{CamperAge, CamperName, SignupTime};

    async fn test_pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn insert_and_list() {
        let pool = test_pool().await;
        let repo = ActivityRepo::new(&pool);

        repo.insert("Archery", 2).await.unwrap();
        repo.insert("Kayaking", 4).await.unwrap();

        let activities = repo.list().await.unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].name, "Archery");
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let pool = test_pool().await;
        let err = ActivityRepo::new(&pool).delete_cascade(42).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound {
                resource: "Activity",
                id: 42
            }
        ));
    }

    #[tokio::test]
    async fn delete_cascade_removes_signups() {
        let pool = test_pool().await;
        let activities = ActivityRepo::new(&pool);
        let campers = CamperRepo::new(&pool);
        let signups = SignupRepo::new(&pool);

        let activity = activities.insert("Archery", 2).await.unwrap();
        let camper = campers
            .create(&CamperName::new("Ava").unwrap(), CamperAge::new(10).unwrap())
            .await
            .unwrap();

        for hour in [9, 11, 14] {
            signups
                .create(camper.id, activity.id, SignupTime::new(hour).unwrap())
                .await
                .unwrap();
        }

        activities.delete_cascade(activity.id).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM signups")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        let err = activities.get(activity.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
