//! # Domain Types
//!
//! Core domain types used throughout the Aurum loyalty program.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │   LedgerEntry   │   │     Reward      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (rowid)     │   │  id (UUID)      │       │
//! │  │  email (biz key)│   │  kind           │   │  name (biz key) │       │
//! │  │  display_name   │   │  delta (signed) │   │  cost_points    │       │
//! │  └─────────────────┘   │  reason         │   │  is_available   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    EntryKind    │   │      Tier       │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Earn           │   │  Standard       │                             │
//! │  │  Redeem         │   │  Gold           │  (ordered: Std < Gold)      │
//! │  │  ManualAdjust   │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Customers and rewards have:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business key: (email, reward name) - human-facing, how callers address them
//!
//! Ledger entries instead use the SQLite rowid as their identifier because
//! the ledger requires a strictly increasing ordering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Entry Kind
// =============================================================================

/// The kind of a point-affecting ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Points earned from a purchase. Delta is positive.
    Earn,
    /// Points spent on a catalog reward. Delta is negative.
    Redeem,
    /// Agent-initiated correction or override. Delta may be either sign,
    /// and may take the balance negative (deliberate business rule).
    ManualAdjust,
}

impl EntryKind {
    /// Returns the canonical wire/storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Earn => "earn",
            EntryKind::Redeem => "redeem",
            EntryKind::ManualAdjust => "manual_adjust",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earn" => Ok(EntryKind::Earn),
            "redeem" => Ok(EntryKind::Redeem),
            "manual_adjust" => Ok(EntryKind::ManualAdjust),
            other => Err(ValidationError::UnknownKind {
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Tier
// =============================================================================

/// Discrete loyalty level derived from the current balance.
///
/// ## Ordering
/// The derive order matters: `Standard < Gold` under `Ord`, which is what
/// makes the monotonicity property (`balance_a >= balance_b` implies
/// `tier_a >= tier_b`) expressible directly with comparison operators.
///
/// Tier is never stored - it is re-derived from the balance on every
/// evaluation, with no hysteresis. A customer who redeems below the Gold
/// threshold reverts to Standard immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Standard,
    Gold,
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Standard
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Standard => f.write_str("Standard"),
            Tier::Gold => f.write_str("Gold"),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A loyalty program member.
///
/// Balance and tier are deliberately absent: both are derived from the
/// ledger, never stored, so they can never diverge from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Canonical email address - business identifier.
    /// Always stored trimmed and lowercased.
    pub email: String,

    /// Display name shown in customer-facing views.
    pub display_name: String,

    /// When the customer was first enrolled.
    pub created_at: DateTime<Utc>,

    /// When the customer record was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// A single point-affecting transaction in the append-only ledger.
///
/// Immutable once created - corrections are made by appending an
/// offsetting `ManualAdjust` entry, never by editing history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    /// Strictly increasing identifier (SQLite rowid).
    pub id: i64,

    /// The customer this entry belongs to.
    pub customer_id: String,

    /// What caused the entry.
    pub kind: EntryKind,

    /// Signed point delta. Never zero.
    pub delta: i64,

    /// Free-text reference: order id for earns, reward name for redeems,
    /// agent-supplied reason for manual adjustments.
    pub reason: Option<String>,

    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reward
// =============================================================================

/// A redeemable catalog reward.
///
/// The catalog is static: rewards are seeded at initialization and are
/// not customer-specific.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reward {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Reward name - business identifier, how redemptions address it.
    pub name: String,

    /// Point cost. Always positive.
    pub cost_points: i64,

    /// Whether the reward can currently be redeemed.
    pub is_available: bool,

    /// When the reward was seeded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Account Summary
// =============================================================================

/// The full customer view returned by lookup: record, derived balance,
/// derived tier, and the complete history oldest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub customer: Customer,
    pub balance: i64,
    pub tier: Tier,
    pub history: Vec<LedgerEntry>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_round_trip() {
        for kind in [EntryKind::Earn, EntryKind::Redeem, EntryKind::ManualAdjust] {
            assert_eq!(kind.as_str().parse::<EntryKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_entry_kind_rejects_unknown() {
        let err = "refund".parse::<EntryKind>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownKind { .. }));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Gold > Tier::Standard);
        assert_eq!(Tier::default(), Tier::Standard);
    }

    #[test]
    fn test_entry_kind_display() {
        assert_eq!(EntryKind::ManualAdjust.to_string(), "manual_adjust");
    }
}
