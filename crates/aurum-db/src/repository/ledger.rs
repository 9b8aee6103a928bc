//! # Ledger Repository
//!
//! Database operations for the append-only points ledger.
//!
//! ## Append-Only Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Rules                                      │
//! │                                                                         │
//! │  1. APPEND                                                              │
//! │     └── append() → LedgerEntry with a strictly increasing id            │
//! │                                                                         │
//! │  2. PROJECT                                                             │
//! │     └── balance() → SUM(delta), 0 for an empty history                  │
//! │     └── history() → all entries, oldest first                           │
//! │                                                                         │
//! │  3. REDEEM (the gate)                                                   │
//! │     └── redeem() → balance check + negative append in ONE transaction   │
//! │                                                                         │
//! │  There is NO update and NO delete. Corrections are offsetting           │
//! │  manual_adjust appends.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why the Gate Lives Here
//! The affordability check and the redeem append must be one indivisible
//! unit of work, otherwise two concurrent redemptions can both pass the
//! check against a stale balance and jointly overdraw the account. Only
//! this layer can hold both steps inside a single SQL transaction.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use aurum_core::{EntryKind, LedgerEntry, Reward};

/// Outcome of an atomic redemption attempt.
///
/// Insufficient balance is an expected business outcome, not a storage
/// failure, so it is a value rather than a `DbError` - the program layer
/// maps it onto its caller-facing error taxonomy.
#[derive(Debug, Clone)]
pub enum RedeemOutcome {
    /// The redeem entry was appended.
    Posted(LedgerEntry),
    /// The balance at gate time could not cover the cost. Nothing was
    /// appended; history is untouched.
    InsufficientBalance { balance: i64 },
}

/// Repository for ledger database operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Appends a transaction to the ledger.
    ///
    /// ## Constraints
    /// - `delta` must be non-zero (checked here and by the schema)
    /// - `customer_id` must reference an existing customer (FK enforced)
    ///
    /// ## Returns
    /// The persisted entry, carrying the strictly increasing rowid and
    /// the recorded timestamp.
    pub async fn append(
        &self,
        customer_id: &str,
        kind: EntryKind,
        delta: i64,
        reason: Option<&str>,
    ) -> DbResult<LedgerEntry> {
        if delta == 0 {
            return Err(DbError::CheckViolation {
                message: "ledger delta must be non-zero".to_string(),
            });
        }

        debug!(customer_id = %customer_id, kind = %kind, delta = delta, "Appending ledger entry");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO ledger_entries (customer_id, kind, delta, reason, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(customer_id)
        .bind(kind)
        .bind(delta)
        .bind(reason)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(LedgerEntry {
            id: result.last_insert_rowid(),
            customer_id: customer_id.to_string(),
            kind,
            delta,
            reason: reason.map(str::to_string),
            created_at: now,
        })
    }

    /// Gets a customer's full history, oldest first.
    ///
    /// Ordered by id: the rowid is assigned at append time, so id order
    /// is append order regardless of clock behavior.
    pub async fn history(&self, customer_id: &str) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, customer_id, kind, delta, reason, created_at
            FROM ledger_entries
            WHERE customer_id = ?1
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Projects a customer's current balance from the ledger.
    ///
    /// Always `SUM(delta)` over the full history - there is no cached
    /// balance anywhere to fall out of sync. Returns 0 for a customer
    /// with no transactions.
    pub async fn balance(&self, customer_id: &str) -> DbResult<i64> {
        let sum: Option<i64> =
            sqlx::query_scalar("SELECT SUM(delta) FROM ledger_entries WHERE customer_id = ?1")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(sum.unwrap_or(0))
    }

    /// Atomically redeems a reward: affordability check plus negative
    /// append in one SQL transaction.
    ///
    /// ## All-or-Nothing
    /// ```text
    /// BEGIN
    ///   balance := SUM(delta) WHERE customer_id = ?      ← inside the tx
    ///   IF balance < cost → ROLLBACK, nothing appended
    ///   INSERT redeem entry (delta = -cost, reason = reward name)
    /// COMMIT
    /// ```
    /// Two concurrent redemptions serialize on the write transaction, so
    /// both can never pass the check against the same stale balance.
    pub async fn redeem(&self, customer_id: &str, reward: &Reward) -> DbResult<RedeemOutcome> {
        debug!(customer_id = %customer_id, reward = %reward.name, "Attempting redemption");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let sum: Option<i64> =
            sqlx::query_scalar("SELECT SUM(delta) FROM ledger_entries WHERE customer_id = ?1")
                .bind(customer_id)
                .fetch_one(&mut *tx)
                .await?;
        let balance = sum.unwrap_or(0);

        if balance < reward.cost_points {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            return Ok(RedeemOutcome::InsufficientBalance { balance });
        }

        let now = Utc::now();
        let delta = -reward.cost_points;

        let result = sqlx::query(
            r#"
            INSERT INTO ledger_entries (customer_id, kind, delta, reason, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(customer_id)
        .bind(EntryKind::Redeem)
        .bind(delta)
        .bind(&reward.name)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let entry = LedgerEntry {
            id: result.last_insert_rowid(),
            customer_id: customer_id.to_string(),
            kind: EntryKind::Redeem,
            delta,
            reason: Some(reward.name.clone()),
            created_at: now,
        };

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(entry_id = entry.id, new_balance = balance + delta, "Redemption posted");

        Ok(RedeemOutcome::Posted(entry))
    }

    /// Counts all ledger entries (diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ledger_entries")
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
    use aurum_core::project_balance;
    use chrono::Utc;
    use uuid::Uuid;

    async fn db_with_customer() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = db.customers().upsert("test@x.com", "Test").await.unwrap();
        (db, customer.id)
    }

    fn reward(name: &str, cost: i64) -> Reward {
        Reward {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            cost_points: cost,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_balance_empty_history() {
        let (db, customer_id) = db_with_customer().await;
        assert_eq!(db.ledger().balance(&customer_id).await.unwrap(), 0);
        assert!(db.ledger().history(&customer_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ids() {
        let (db, customer_id) = db_with_customer().await;
        let ledger = db.ledger();

        let a = ledger.append(&customer_id, EntryKind::Earn, 100, Some("Order #1")).await.unwrap();
        let b = ledger.append(&customer_id, EntryKind::Earn, 200, Some("Order #2")).await.unwrap();
        let c = ledger.append(&customer_id, EntryKind::ManualAdjust, -50, Some("oops")).await.unwrap();

        assert!(a.id < b.id && b.id < c.id);

        let history = ledger.history(&customer_id).await.unwrap();
        let ids: Vec<i64> = history.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_balance_matches_projection() {
        let (db, customer_id) = db_with_customer().await;
        let ledger = db.ledger();

        for delta in [250_i64, -50, 1000, -999, 7] {
            ledger
                .append(&customer_id, EntryKind::ManualAdjust, delta, Some("test"))
                .await
                .unwrap();
        }

        let history = ledger.history(&customer_id).await.unwrap();
        let stored = ledger.balance(&customer_id).await.unwrap();
        assert_eq!(stored, project_balance(&history));
        assert_eq!(stored, 208);
    }

    #[tokio::test]
    async fn test_zero_delta_rejected() {
        let (db, customer_id) = db_with_customer().await;

        let err = db
            .ledger()
            .append(&customer_id, EntryKind::Earn, 0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_append_unknown_customer_violates_fk() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .ledger()
            .append("no-such-customer", EntryKind::Earn, 10, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_redeem_affordable() {
        let (db, customer_id) = db_with_customer().await;
        let ledger = db.ledger();

        ledger.append(&customer_id, EntryKind::Earn, 100, None).await.unwrap();

        let outcome = ledger.redeem(&customer_id, &reward("FreeShipping", 50)).await.unwrap();
        let entry = match outcome {
            RedeemOutcome::Posted(entry) => entry,
            other => panic!("expected Posted, got {:?}", other),
        };
        assert_eq!(entry.kind, EntryKind::Redeem);
        assert_eq!(entry.delta, -50);
        assert_eq!(entry.reason.as_deref(), Some("FreeShipping"));

        assert_eq!(ledger.balance(&customer_id).await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_redeem_exact_balance() {
        let (db, customer_id) = db_with_customer().await;
        let ledger = db.ledger();

        ledger.append(&customer_id, EntryKind::Earn, 50, None).await.unwrap();

        let outcome = ledger.redeem(&customer_id, &reward("FreeShipping", 50)).await.unwrap();
        assert!(matches!(outcome, RedeemOutcome::Posted(_)));
        assert_eq!(ledger.balance(&customer_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_redeem_insufficient_leaves_history_untouched() {
        let (db, customer_id) = db_with_customer().await;
        let ledger = db.ledger();

        ledger.append(&customer_id, EntryKind::Earn, 30, None).await.unwrap();
        let before = ledger.history(&customer_id).await.unwrap();

        let outcome = ledger.redeem(&customer_id, &reward("FreeShipping", 50)).await.unwrap();
        match outcome {
            RedeemOutcome::InsufficientBalance { balance } => assert_eq!(balance, 30),
            other => panic!("expected InsufficientBalance, got {:?}", other),
        }

        let after = ledger.history(&customer_id).await.unwrap();
        assert_eq!(before.len(), after.len());
        assert_eq!(ledger.balance(&customer_id).await.unwrap(), 30);
    }

    #[tokio::test]
    async fn test_concurrent_redemptions_cannot_overdraw() {
        // File-backed database so the pool hands out more than one
        // connection and the two redemptions genuinely overlap.
        let path = std::env::temp_dir().join(format!("aurum-gate-{}.db", Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path)).await.unwrap();

        let customer = db.customers().upsert("race@x.com", "Race").await.unwrap();
        db.ledger()
            .append(&customer.id, EntryKind::Earn, 50, None)
            .await
            .unwrap();

        // Balance covers exactly one of the two attempts.
        let prize = reward("FreeShipping", 50);
        let first = {
            let db = db.clone();
            let id = customer.id.clone();
            let prize = prize.clone();
            tokio::spawn(async move { db.ledger().redeem(&id, &prize).await })
        };
        let second = {
            let db = db.clone();
            let id = customer.id.clone();
            let prize = prize.clone();
            tokio::spawn(async move { db.ledger().redeem(&id, &prize).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];

        // The loser sees either InsufficientBalance or a write conflict,
        // depending on where the transactions interleave; it must never
        // see Posted.
        let posted = results
            .iter()
            .filter(|r| matches!(r, Ok(RedeemOutcome::Posted(_))))
            .count();
        assert_eq!(posted, 1, "exactly one redemption may pass the gate");

        assert_eq!(db.ledger().balance(&customer.id).await.unwrap(), 0);
        let history = db.ledger().history(&customer.id).await.unwrap();
        assert_eq!(
            history.iter().filter(|e| e.kind == EntryKind::Redeem).count(),
            1
        );

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[tokio::test]
    async fn test_manual_adjust_may_go_negative() {
        let (db, customer_id) = db_with_customer().await;
        let ledger = db.ledger();

        ledger.append(&customer_id, EntryKind::Earn, 100, None).await.unwrap();
        ledger
            .append(&customer_id, EntryKind::ManualAdjust, -600, Some("fraud reversal"))
            .await
            .unwrap();

        assert_eq!(ledger.balance(&customer_id).await.unwrap(), -500);
    }
}
