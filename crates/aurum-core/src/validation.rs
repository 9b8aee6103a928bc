//! # Validation Module
//!
//! Input validation and email canonicalization for the loyalty program.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Program Operations (aurum-program)                           │
//! │  ├── Canonicalize email at EVERY entry point                           │
//! │  └── THIS MODULE: field validation before any I/O                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  ├── CHECK (delta <> 0), CHECK (cost_points > 0)                       │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: the schema enforces what validation promised.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::validation::{canonicalize_email, validate_delta};
//!
//! // Same account regardless of spelling
//! assert_eq!(canonicalize_email("  A@X.com ").unwrap(), "a@x.com");
//!
//! // Zero deltas never reach the ledger
//! assert!(validate_delta(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_EMAIL_LEN, MAX_REASON_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Email Canonicalization
// =============================================================================

/// Canonicalizes an email address: trim whitespace, ASCII lowercase.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_EMAIL_LEN`] characters
/// - Must have a non-empty local part and domain around exactly one `@`
///
/// Only ASCII letters are folded. Unicode case mapping is locale-sensitive
/// and can change the byte length of the key, so non-ASCII characters pass
/// through unchanged.
///
/// This is a shape check, not RFC 5322 validation; the goal is a stable
/// business key, not deliverability. The canonical form is what every
/// repository and every uniqueness constraint sees - callers apply this
/// once at the boundary and never pass raw input further down.
///
/// ## Example
/// ```rust
/// use aurum_core::validation::canonicalize_email;
///
/// assert_eq!(canonicalize_email("Jo.Doe@Example.COM").unwrap(), "jo.doe@example.com");
/// assert!(canonicalize_email("not-an-email").is_err());
/// ```
pub fn canonicalize_email(raw: &str) -> ValidationResult<String> {
    let email = raw.trim().to_ascii_lowercase();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let mut parts = email.split('@');
    let (local, domain) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(ValidationError::InvalidEmail {
            reason: "expected local@domain".to_string(),
        });
    }

    Ok(email)
}

// =============================================================================
// Ledger Field Validators
// =============================================================================

/// Validates a ledger delta.
///
/// ## Rules
/// - Must be non-zero (either sign is fine; the redemption gate and earn
///   computation own the sign rules for their kinds)
pub fn validate_delta(delta: i64) -> ValidationResult<()> {
    if delta == 0 {
        return Err(ValidationError::ZeroDelta);
    }

    Ok(())
}

/// Validates a manual-adjustment reason.
///
/// ## Rules
/// - Must not be empty (every override needs an audit trail)
/// - Must be at most [`MAX_REASON_LEN`] characters
///
/// ## Returns
/// The trimmed reason.
pub fn validate_reason(reason: &str) -> ValidationResult<String> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    if reason.len() > MAX_REASON_LEN {
        return Err(ValidationError::TooLong {
            field: "reason".to_string(),
            max: MAX_REASON_LEN,
        });
    }

    Ok(reason.to_string())
}

/// Validates an order reference on a purchase.
///
/// ## Rules
/// - Must not be empty (earns are always traceable to an order)
/// - Must be at most [`MAX_REASON_LEN`] characters
///
/// ## Returns
/// The trimmed reference.
pub fn validate_order_reference(reference: &str) -> ValidationResult<String> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "order reference".to_string(),
        });
    }

    if reference.len() > MAX_REASON_LEN {
        return Err(ValidationError::TooLong {
            field: "order reference".to_string(),
            max: MAX_REASON_LEN,
        });
    }

    Ok(reference.to_string())
}

/// Validates a purchase amount in cents.
///
/// ## Rules
/// - Must be strictly positive (zero or negative purchases earn nothing
///   and are caller errors)
pub fn validate_purchase_amount(amount_cents: i64) -> ValidationResult<()> {
    if amount_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "purchase amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_display_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "display name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "display name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_email() {
        assert_eq!(canonicalize_email("a@x.com").unwrap(), "a@x.com");
        assert_eq!(canonicalize_email("  A@X.COM  ").unwrap(), "a@x.com");
        assert_eq!(
            canonicalize_email("Jo.Doe@Example.com").unwrap(),
            "jo.doe@example.com"
        );
    }

    #[test]
    fn test_canonicalize_email_folds_ascii_only() {
        // Non-ASCII characters pass through unchanged; only ASCII letters
        // are lowercased.
        assert_eq!(canonicalize_email("ÅKE@X.COM").unwrap(), "Åke@x.com");
        assert_eq!(canonicalize_email("josé@X.COM").unwrap(), "josé@x.com");
    }

    #[test]
    fn test_canonicalize_email_rejects_garbage() {
        assert!(canonicalize_email("").is_err());
        assert!(canonicalize_email("   ").is_err());
        assert!(canonicalize_email("no-at-sign").is_err());
        assert!(canonicalize_email("@domain.com").is_err());
        assert!(canonicalize_email("local@").is_err());
        assert!(canonicalize_email("a@b@c.com").is_err());

        let long = format!("{}@x.com", "a".repeat(300));
        assert!(canonicalize_email(&long).is_err());
    }

    #[test]
    fn test_validate_delta() {
        assert!(validate_delta(1).is_ok());
        assert!(validate_delta(-1).is_ok());
        assert!(validate_delta(i64::MIN).is_ok());
        assert!(validate_delta(0).is_err());
    }

    #[test]
    fn test_validate_reason() {
        assert_eq!(validate_reason("  fraud reversal  ").unwrap(), "fraud reversal");
        assert!(validate_reason("").is_err());
        assert!(validate_reason("   ").is_err());
        assert!(validate_reason(&"x".repeat(600)).is_err());
    }

    #[test]
    fn test_validate_order_reference() {
        assert_eq!(validate_order_reference("ORDER1").unwrap(), "ORDER1");
        assert!(validate_order_reference("").is_err());
    }

    #[test]
    fn test_validate_purchase_amount() {
        assert!(validate_purchase_amount(1).is_ok());
        assert!(validate_purchase_amount(10_000).is_ok());
        assert!(validate_purchase_amount(0).is_err());
        assert!(validate_purchase_amount(-500).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert_eq!(validate_display_name(" Ada Lovelace ").unwrap(), "Ada Lovelace");
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name(&"A".repeat(300)).is_err());
    }
}
