//! # Ledger Projection
//!
//! The pure fold from a sequence of ledger entries to a point balance.
//!
//! ## Source of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Balance Projection                                   │
//! │                                                                         │
//! │  history (oldest first)                                                 │
//! │  ┌──────┬──────────────┬───────┐                                        │
//! │  │ earn │ Order #1001  │ +1000 │                                        │
//! │  │ earn │ Order #1002  │  +450 │                                        │
//! │  │redeem│ FreeShipping │   -50 │   project_balance ──► 800              │
//! │  │adjust│ fraud revert │  -600 │                                        │
//! │  └──────┴──────────────┴───────┘                                        │
//! │                                                                         │
//! │  The ledger is the ONLY source of truth for a balance. There is no     │
//! │  stored balance column anywhere, so nothing can silently diverge.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database layer computes the same sum in SQL (`SUM(delta)`) for
//! efficiency; this fold is the reference semantics both must agree on,
//! and what in-memory callers and tests use.

use crate::types::LedgerEntry;

/// Folds a customer's history into their current balance.
///
/// Returns 0 for an empty history (a customer with no transactions).
///
/// ## Example
/// ```rust
/// use aurum_core::ledger::project_balance;
///
/// assert_eq!(project_balance(&[]), 0);
/// ```
pub fn project_balance(history: &[LedgerEntry]) -> i64 {
    history.iter().map(|entry| entry.delta).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
