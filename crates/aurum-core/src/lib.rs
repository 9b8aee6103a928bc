//! # aurum-core: Pure Business Logic for the Aurum Loyalty Program
//!
//! This crate is the **heart** of the loyalty program. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Aurum Loyalty Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 aurum-program (Operations)                      │   │
//! │  │    lookup ──► record_purchase ──► redeem ──► manual_adjust     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aurum-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  policy   │  │  ledger   │  │ validation│  │   │
//! │  │   │ Customer  │  │ EarnRate  │  │  balance  │  │   email   │  │   │
//! │  │   │LedgerEntry│  │TierPolicy │  │   fold    │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    aurum-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, LedgerEntry, Reward, Tier)
//! - [`policy`] - Configurable business rules (EarnRate, TierPolicy)
//! - [`ledger`] - Balance projection over ledger entries
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and email canonicalization
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Points**: Point deltas and balances are i64, purchase amounts
//!    are integer cents (never floats)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use aurum_core::policy::{EarnRate, TierPolicy};
//! use aurum_core::types::Tier;
//!
//! // $100.00 at 10 points per dollar earns 1000 points
//! let rate = EarnRate::new(10);
//! assert_eq!(rate.points_for(10_000), 1000);
//!
//! // 1000 points clears the default Gold threshold
//! let policy = TierPolicy::default();
//! assert_eq!(policy.classify(1000), Tier::Gold);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use aurum_core::Tier` instead of
// `use aurum_core::types::Tier`

pub use error::{CoreError, ValidationError};
pub use ledger::project_balance;
pub use policy::{EarnRate, TierPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a free-text reason/reference on a ledger entry.
///
/// ## Business Reason
/// Reasons render in history views and agent tooling; unbounded text is
/// never useful there. Long fraud-case notes belong in a case system,
/// not the ledger.
pub const MAX_REASON_LEN: usize = 500;

/// Maximum length of an accepted email address.
///
/// ## Business Reason
/// RFC 5321 caps the path at 254 octets; anything longer is garbage input.
pub const MAX_EMAIL_LEN: usize = 254;
