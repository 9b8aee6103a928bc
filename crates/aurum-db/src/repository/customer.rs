//! # Customer Repository
//!
//! Database operations for customer records.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Customer Lifecycle                                  │
//! │                                                                         │
//! │  First purchase for unknown email                                       │
//! │       └── upsert() → creates the record (UUID id, canonical email)     │
//! │                                                                         │
//! │  Every subsequent operation                                             │
//! │       └── upsert() / get_by_email() → resolves the same record         │
//! │                                                                         │
//! │  There is no delete path - accounts are always live.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories assume the email is already canonical (trimmed,
//! lowercased). Canonicalization happens once at the program boundary.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use aurum_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by canonical email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, email, display_name, created_at, updated_at
            FROM customers
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by UUID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, email, display_name, created_at, updated_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer directly.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, email = %customer.email, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, email, display_name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.email)
        .bind(&customer.display_name)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Resolves a customer by email, creating the record on first use.
    ///
    /// ## Upsert Semantics
    /// If the email is unknown a new record is created with the given
    /// display name. If it already exists the existing record is returned
    /// unchanged - a later purchase never overwrites the enrolled name.
    ///
    /// `INSERT OR IGNORE` against the UNIQUE(email) index makes the
    /// create-or-resolve race-free without a read-check-write gap.
    pub async fn upsert(&self, email: &str, display_name: &str) -> DbResult<Customer> {
        let now = Utc::now();
        let candidate = Customer {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            created_at: now,
            updated_at: now,
        };

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO customers (id, email, display_name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&candidate.id)
        .bind(&candidate.email)
        .bind(&candidate.display_name)
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            debug!(id = %candidate.id, email = %candidate.email, "Enrolled new customer");
            return Ok(candidate);
        }

        // Insert was ignored: the email already exists, fetch the row.
        let existing = self.get_by_email(email).await?;
        existing.ok_or_else(|| crate::error::DbError::not_found("Customer", email))
    }

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
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
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_upsert_creates_then_resolves() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let created = repo.upsert("a@x.com", "Ada").await.unwrap();
        assert_eq!(created.email, "a@x.com");
        assert_eq!(created.display_name, "Ada");

        // Second upsert resolves the same record, keeps the original name
        let resolved = repo.upsert("a@x.com", "Somebody Else").await.unwrap();
        assert_eq!(resolved.id, created.id);
        assert_eq!(resolved.display_name, "Ada");

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_by_email_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let found = db.customers().get_by_email("ghost@x.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_insert_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let first = repo.upsert("dup@x.com", "First").await.unwrap();
        let mut clone = first.clone();
        clone.id = uuid::Uuid::new_v4().to_string();

        let err = repo.insert(&clone).await.unwrap_err();
        assert!(matches!(err, crate::error::DbError::UniqueViolation { .. }));
    }
}
