//! # Error Types
//!
//! Domain-specific error types for aurum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aurum-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  aurum-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures, constraint violations        │
//! │                                                                         │
//! │  aurum-program errors (separate crate)                                 │
//! │  └── ProgramError     - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ProgramError → Caller   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (email, reward name, balance)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer cannot be found.
    ///
    /// ## When This Occurs
    /// - Email doesn't resolve to a customer record
    /// - The customer was never enrolled (no first purchase yet)
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Reward does not exist or is not currently available.
    ///
    /// Unavailable rewards are deliberately indistinguishable from
    /// nonexistent ones at this level: neither can be redeemed.
    #[error("Unknown or unavailable reward: {0}")]
    UnknownReward(String),

    /// Redemption exceeds the customer's current balance.
    ///
    /// ## When This Occurs
    /// - `balance < reward.cost_points` at redemption time
    ///
    /// ## User Workflow
    /// ```text
    /// Redeem "FreeShipping" (cost: 50)
    ///      │
    ///      ▼
    /// Check balance: 30 points
    ///      │
    ///      ▼
    /// InsufficientBalance { reward: "FreeShipping", cost_points: 50, balance: 30 }
    ///      │
    ///      ▼
    /// UI shows: "You need 50 points for FreeShipping, you have 30"
    /// ```
    /// No ledger entry is appended - the redemption gate is all-or-nothing.
    #[error("Insufficient balance for {reward}: costs {cost_points}, balance is {balance}")]
    InsufficientBalance {
        reward: String,
        cost_points: i64,
        balance: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A ledger entry may never carry a zero delta.
    #[error("point delta must be non-zero")]
    ZeroDelta,

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Transaction kind is not one of the enumerated values.
    #[error("unknown transaction kind: '{value}'")]
    UnknownKind { value: String },

    /// Email address fails the canonicalization shape check.
    #[error("invalid email address: {reason}")]
    InvalidEmail { reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientBalance {
            reward: "FreeShipping".to_string(),
            cost_points: 50,
            balance: 30,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance for FreeShipping: costs 50, balance is 30"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "reason".to_string(),
        };
        assert_eq!(err.to_string(), "reason is required");

        let err = ValidationError::ZeroDelta;
        assert_eq!(err.to_string(), "point delta must be non-zero");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::UnknownKind {
            value: "refund".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
