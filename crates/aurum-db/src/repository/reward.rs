//! # Reward Repository
//!
//! Database operations for the static reward catalog.
//!
//! The catalog is seeded by migration and read-only during normal
//! operation; `insert` and `set_availability` exist for seeding and
//! catalog administration, never for the transaction flow.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use aurum_core::Reward;

/// Repository for reward catalog operations.
#[derive(Debug, Clone)]
pub struct RewardRepository {
    pool: SqlitePool,
}

impl RewardRepository {
    /// Creates a new RewardRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RewardRepository { pool }
    }

    /// Lists all currently available rewards, cheapest first.
    pub async fn list_available(&self) -> DbResult<Vec<Reward>> {
        let rewards = sqlx::query_as::<_, Reward>(
            r#"
            SELECT id, name, cost_points, is_available, created_at
            FROM rewards
            WHERE is_available = 1
            ORDER BY cost_points ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rewards)
    }

    /// Gets a reward by its name (the business key redemptions address).
    ///
    /// Returns unavailable rewards too - the caller decides whether
    /// availability matters for its operation.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Reward>> {
        let reward = sqlx::query_as::<_, Reward>(
            r#"
            SELECT id, name, cost_points, is_available, created_at
            FROM rewards
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reward)
    }

    /// Inserts a reward (seeding / catalog administration only).
    pub async fn insert(&self, reward: &Reward) -> DbResult<()> {
        debug!(id = %reward.id, name = %reward.name, "Inserting reward");

        sqlx::query(
            r#"
            INSERT INTO rewards (id, name, cost_points, is_available, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&reward.id)
        .bind(&reward.name)
        .bind(reward.cost_points)
        .bind(reward.is_available)
        .bind(reward.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Flips a reward's availability.
    pub async fn set_availability(&self, name: &str, available: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE rewards SET is_available = ?2 WHERE name = ?1")
            .bind(name)
            .bind(available)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reward", name));
        }

        Ok(())
    }

    /// Counts all rewards (available or not).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rewards")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_seeded_catalog_lists_available_ascending() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rewards = db.rewards().list_available().await.unwrap();

        assert!(!rewards.is_empty());
        assert!(rewards.iter().all(|r| r.is_available));
        assert!(rewards.windows(2).all(|w| w[0].cost_points <= w[1].cost_points));

        // The seed includes an unavailable reward; listing must hide it
        let total = db.rewards().count().await.unwrap();
        assert!(total > rewards.len() as i64);
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let reward = db.rewards().get_by_name("FreeShipping").await.unwrap().unwrap();
        assert_eq!(reward.cost_points, 50);
        assert!(reward.is_available);

        assert!(db.rewards().get_by_name("NoSuchReward").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_availability() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rewards();

        repo.set_availability("FreeShipping", false).await.unwrap();
        let reward = repo.get_by_name("FreeShipping").await.unwrap().unwrap();
        assert!(!reward.is_available);

        let err = repo.set_availability("NoSuchReward", false).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_insert_rejects_non_positive_cost() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let bad = Reward {
            id: Uuid::new_v4().to_string(),
            name: "Freebie".to_string(),
            cost_points: 0,
            is_available: true,
            created_at: Utc::now(),
        };

        let err = db.rewards().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
