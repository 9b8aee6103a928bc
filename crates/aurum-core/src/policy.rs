//! # Business Rule Policies
//!
//! Configurable business rules: the earn rate and the tier threshold table.
//!
//! ## Why Value Types Instead of Constants?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Policy Flow                                         │
//! │                                                                         │
//! │  Environment / config file                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProgramConfig (aurum-program)                                         │
//! │       │                                                                 │
//! │       ├── EarnRate::new(points_per_dollar)  ──► record_purchase        │
//! │       │                                                                 │
//! │       └── TierPolicy::new(gold_threshold)   ──► every tier evaluation  │
//! │                                                                         │
//! │  Nothing downstream reads the raw constants - the rules may change     │
//! │  per deployment, so use sites only ever see a policy value.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! Both policies are pure: same balance (or purchase amount) in, same
//! tier (or point count) out, every time.

use serde::{Deserialize, Serialize};

use crate::types::Tier;

// =============================================================================
// Earn Rate
// =============================================================================

/// Default earn rate: 10 points per dollar spent.
pub const DEFAULT_POINTS_PER_DOLLAR: i64 = 10;

/// Default Gold threshold: 500 points on the current balance.
pub const DEFAULT_GOLD_THRESHOLD: i64 = 500;

/// Points-per-dollar earn rate.
///
/// ## Arithmetic
/// Purchase amounts are integer cents (never floats). Earned points are
/// `amount_cents * rate / 100` with flooring integer division, so a $10.99
/// purchase at 10 points/dollar earns 109 points - partial points are
/// never awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnRate(i64);

impl EarnRate {
    /// Creates an earn rate from points per dollar.
    #[inline]
    pub const fn new(points_per_dollar: i64) -> Self {
        EarnRate(points_per_dollar)
    }

    /// Returns the configured points per dollar.
    #[inline]
    pub const fn points_per_dollar(&self) -> i64 {
        self.0
    }

    /// Computes the points earned for a purchase amount in cents.
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::policy::EarnRate;
    ///
    /// let rate = EarnRate::new(10);
    /// assert_eq!(rate.points_for(10_000), 1000); // $100.00
    /// assert_eq!(rate.points_for(1_099), 109);   // $10.99, floored
    /// assert_eq!(rate.points_for(5), 0);         // $0.05 earns nothing
    /// ```
    #[inline]
    pub const fn points_for(&self, amount_cents: i64) -> i64 {
        amount_cents * self.0 / 100
    }
}

impl Default for EarnRate {
    fn default() -> Self {
        EarnRate(DEFAULT_POINTS_PER_DOLLAR)
    }
}

// =============================================================================
// Tier Policy
// =============================================================================

/// Static ascending threshold table mapping a balance to a tier.
///
/// Currently two tiers, so the "table" is a single Gold threshold; adding
/// a tier means adding a variant to [`Tier`] (keeping the derive order
/// ascending) and a threshold field here, with `classify` checking
/// thresholds from the top down.
///
/// ## Monotonicity
/// `classify` is monotonic non-decreasing in the balance: a higher balance
/// can never map to a lower tier. There is no hysteresis - dropping below
/// the threshold reverts the tier on the very next evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPolicy {
    gold_threshold: i64,
}

impl TierPolicy {
    /// Creates a tier policy with the given Gold threshold.
    #[inline]
    pub const fn new(gold_threshold: i64) -> Self {
        TierPolicy { gold_threshold }
    }

    /// Returns the Gold threshold.
    #[inline]
    pub const fn gold_threshold(&self) -> i64 {
        self.gold_threshold
    }

    /// Maps a balance to its tier.
    #[inline]
    pub const fn classify(&self, balance: i64) -> Tier {
        if balance >= self.gold_threshold {
            Tier::Gold
        } else {
            Tier::Standard
        }
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        TierPolicy::new(DEFAULT_GOLD_THRESHOLD)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
