//! # aurum-program: Operations Surface for Aurum Loyalty
//!
//! The four customer-facing operations of the loyalty program, plus the
//! reward listing, exposed as a single [`LoyaltyService`]:
//!
//! - `lookup(email)` → customer, balance, tier, full history
//! - `record_purchase(email, amount_cents, order_reference)` → earn entry
//! - `redeem(email, reward_name)` → redeem entry (gated on affordability)
//! - `manual_adjust(email, delta, reason)` → adjustment entry
//! - `rewards()` → available catalog
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Every Mutating Operation                          │
//! │                                                                         │
//! │  canonicalize email ──► validate input ──► append ONE ledger entry     │
//! │                                                  │                       │
//! │                                                  ▼                       │
//! │                          re-project balance, re-evaluate tier           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All errors are recoverable at this boundary: they carry the customer
//! email or reward name needed to render a user-facing message, and no
//! operation is retried automatically - the originating human action can
//! simply be repeated.
//!
//! ## Example
//! ```rust,ignore
//! use aurum_db::{Database, DbConfig};
//! use aurum_program::{LoyaltyService, ProgramConfig};
//!
//! let config = ProgramConfig::load()?;
//! let db = Database::new(DbConfig::new(&config.database_path)).await?;
//! let service = LoyaltyService::new(db, config);
//!
//! service.record_purchase("a@x.com", 10_000, "ORDER1").await?;
//! let account = service.lookup("a@x.com").await?;
//! println!("{} points, {} tier", account.balance, account.tier);
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::{ConfigError, ProgramConfig};
pub use error::{ErrorCode, ProgramError};
pub use service::{LoyaltyService, OperationResult};
