//! # Program Error Type
//!
//! The caller-facing error taxonomy for program operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in Aurum Loyalty                            │
//! │                                                                         │
//! │  Presentation layer            Program operation                        │
//! │  ──────────────────            ─────────────────                        │
//! │                                                                         │
//! │  redeem("a@x.com", "FreeShipping")                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  LoyaltyService::redeem                                          │  │
//! │  │  Result<OperationResult, ProgramError>                           │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage error? ──── DbError ───────────────────────┐            │  │
//! │  │         │                                           ▼            │  │
//! │  │  Gate rejected? ──── InsufficientBalance ──── ProgramError ────► │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Every variant carries the identifiers (email, reward name) the        │
//! │  caller needs to render a user-facing message. All are recoverable;    │
//! │  none is retried automatically - a button click can be repeated.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use aurum_core::{CoreError, ValidationError};
use aurum_db::DbError;

/// Machine-readable error codes for programmatic handling.
///
/// ## Usage in a Presentation Layer
/// ```text
/// match error.code() {
///     ErrorCode::NotFound            => "Customer email not found",
///     ErrorCode::InsufficientBalance => "Not enough points",
///     ErrorCode::ValidationError     => show the message inline,
///     _                              => "Something went wrong",
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Customer or reward not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Reward missing or unavailable (404)
    UnknownReward,

    /// Redemption exceeds balance (422)
    InsufficientBalance,

    /// Persistence unavailable or constraint violation (500)
    StorageError,
}

/// Errors surfaced by program operations.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Malformed input: zero delta, empty reason, bad email, too-small
    /// purchase.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No customer with the given email (or, internally, a missing
    /// relation row).
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// The reward does not exist or is not currently available.
    #[error("Unknown or unavailable reward: {0}")]
    UnknownReward(String),

    /// The redemption gate rejected the request. Nothing was appended.
    #[error("Insufficient balance for {reward}: costs {cost_points}, balance is {balance}")]
    InsufficientBalance {
        reward: String,
        cost_points: i64,
        balance: i64,
    },

    /// The persistence layer failed.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl ProgramError {
    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        ProgramError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProgramError::Validation(_) => ErrorCode::ValidationError,
            ProgramError::NotFound { .. } => ErrorCode::NotFound,
            ProgramError::UnknownReward(_) => ErrorCode::UnknownReward,
            ProgramError::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
            ProgramError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

/// Converts core errors, preserving their category.
impl From<CoreError> for ProgramError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CustomerNotFound(email) => ProgramError::not_found("Customer", email),
            CoreError::UnknownReward(name) => ProgramError::UnknownReward(name),
            CoreError::InsufficientBalance {
                reward,
                cost_points,
                balance,
            } => ProgramError::InsufficientBalance {
                reward,
                cost_points,
                balance,
            },
            CoreError::Validation(e) => ProgramError::Validation(e),
        }
    }
}

/// Result type for program operations.
pub type ProgramResult<T> = Result<T, ProgramError>;

// =============================================================================
// Unit Tests
// =============================================================================
