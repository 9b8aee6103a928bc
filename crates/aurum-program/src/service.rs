//! # Loyalty Service
//!
//! Orchestrates the program operations over the repositories.
//!
//! ## Operation Shape
//! Every mutating operation follows the same sequence:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Canonicalize the email (trim + lowercase, once, at the boundary)   │
//! │  2. Validate remaining input before any I/O                            │
//! │  3. Resolve the customer (upsert for purchases, lookup otherwise)      │
//! │  4. Append exactly ONE ledger entry                                    │
//! │  5. Re-project balance and re-evaluate tier for the response           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds an explicit [`Database`] handle - no global
//! connection state. Cloning the service is cheap and every operation
//! scopes its connection use to the call.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use aurum_core::validation::{
    canonicalize_email, validate_delta, validate_order_reference, validate_purchase_amount,
    validate_reason,
};
use aurum_core::{AccountSummary, EntryKind, LedgerEntry, Reward, Tier, ValidationError};
use aurum_db::repository::ledger::RedeemOutcome;
use aurum_db::Database;

use crate::config::ProgramConfig;
use crate::error::{ProgramError, ProgramResult};

// =============================================================================
// Operation Result
// =============================================================================

/// Response from a mutating operation: the appended entry plus the
/// re-projected balance and re-evaluated tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub entry: LedgerEntry,
    pub balance: i64,
    pub tier: Tier,
}

// =============================================================================
// Loyalty Service
// =============================================================================

/// The program operations surface.
#[derive(Debug, Clone)]
pub struct LoyaltyService {
    db: Database,
    config: ProgramConfig,
}

impl LoyaltyService {
    /// Creates a service over an open database handle.
    pub fn new(db: Database, config: ProgramConfig) -> Self {
        LoyaltyService { db, config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Looks up a customer: record, current balance, current tier, and
    /// full history oldest-first.
    ///
    /// ## Errors
    /// * `NotFound` - no customer with that email exists. Lookup never
    ///   auto-creates; only a first purchase enrolls.
    pub async fn lookup(&self, email: &str) -> ProgramResult<AccountSummary> {
        let email = canonicalize_email(email)?;
        debug!(email = %email, "lookup");

        let customer = self
            .db
            .customers()
            .get_by_email(&email)
            .await?
            .ok_or_else(|| ProgramError::not_found("Customer", &email))?;

        let balance = self.db.ledger().balance(&customer.id).await?;
        let history = self.db.ledger().history(&customer.id).await?;
        let tier = self.config.tier_policy().classify(balance);

        Ok(AccountSummary {
            customer,
            balance,
            tier,
            history,
        })
    }

    // =========================================================================
    // Record Purchase
    // =========================================================================

    /// Records a purchase and awards points at the configured earn rate.
    ///
    /// Enrolls the customer on first purchase (upsert semantics). The
    /// appended entry's reason is `Order #<reference>`.
    ///
    /// ## Errors
    /// * `Validation` - non-positive amount, empty order reference, or a
    ///   purchase too small to earn a single whole point (a zero-delta
    ///   entry is unappendable, and "succeeded but earned nothing" would
    ///   mislead the caller)
    pub async fn record_purchase(
        &self,
        email: &str,
        amount_cents: i64,
        order_reference: &str,
    ) -> ProgramResult<OperationResult> {
        let email = canonicalize_email(email)?;
        validate_purchase_amount(amount_cents)?;
        let order_reference = validate_order_reference(order_reference)?;

        let points = self.config.earn_rate().points_for(amount_cents);
        if points == 0 {
            return Err(ValidationError::MustBePositive {
                field: "earned points".to_string(),
            }
            .into());
        }

        // Display name defaults to the email local part until a proper
        // enrollment flow exists.
        let display_name = email.split('@').next().unwrap_or(&email);
        let customer = self.db.customers().upsert(&email, display_name).await?;

        let reason = format!("Order #{}", order_reference);
        let entry = self
            .db
            .ledger()
            .append(&customer.id, EntryKind::Earn, points, Some(&reason))
            .await?;

        let result = self.summarize(&customer.id, entry).await?;
        info!(
            email = %email,
            points = points,
            order = %order_reference,
            balance = result.balance,
            tier = %result.tier,
            "Purchase recorded"
        );

        Ok(result)
    }

    // =========================================================================
    // Redeem
    // =========================================================================

    /// Redeems an available catalog reward by name.
    ///
    /// Validation order: reward must exist and be available, then the
    /// balance must cover the cost. The affordability check and the
    /// negative append are one atomic unit inside the ledger repository -
    /// on failure nothing is appended.
    ///
    /// ## Errors
    /// * `NotFound` - unknown customer
    /// * `UnknownReward` - missing or unavailable reward
    /// * `InsufficientBalance` - gate rejected; history unchanged
    pub async fn redeem(&self, email: &str, reward_name: &str) -> ProgramResult<OperationResult> {
        let email = canonicalize_email(email)?;
        debug!(email = %email, reward = %reward_name, "redeem");

        let customer = self
            .db
            .customers()
            .get_by_email(&email)
            .await?
            .ok_or_else(|| ProgramError::not_found("Customer", &email))?;

        let reward = self.resolve_reward(reward_name).await?;

        match self.db.ledger().redeem(&customer.id, &reward).await? {
            RedeemOutcome::Posted(entry) => {
                let result = self.summarize(&customer.id, entry).await?;
                info!(
                    email = %email,
                    reward = %reward.name,
                    cost = reward.cost_points,
                    balance = result.balance,
                    "Reward redeemed"
                );
                Ok(result)
            }
            RedeemOutcome::InsufficientBalance { balance } => {
                Err(ProgramError::InsufficientBalance {
                    reward: reward.name,
                    cost_points: reward.cost_points,
                    balance,
                })
            }
        }
    }

    // =========================================================================
    // Manual Adjust
    // =========================================================================

    /// Appends an agent-initiated adjustment with unrestricted sign.
    ///
    /// May take the balance negative - that is a deliberate business rule
    /// for overrides like fraud reversals, not a bug.
    ///
    /// ## Errors
    /// * `Validation` - zero delta or empty reason
    /// * `NotFound` - unknown customer (adjustments never enroll)
    pub async fn manual_adjust(
        &self,
        email: &str,
        delta: i64,
        reason: &str,
    ) -> ProgramResult<OperationResult> {
        let email = canonicalize_email(email)?;
        validate_delta(delta)?;
        let reason = validate_reason(reason)?;

        let customer = self
            .db
            .customers()
            .get_by_email(&email)
            .await?
            .ok_or_else(|| ProgramError::not_found("Customer", &email))?;

        let entry = self
            .db
            .ledger()
            .append(&customer.id, EntryKind::ManualAdjust, delta, Some(&reason))
            .await?;

        let result = self.summarize(&customer.id, entry).await?;
        info!(
            email = %email,
            delta = delta,
            reason = %reason,
            balance = result.balance,
            tier = %result.tier,
            "Manual adjustment applied"
        );

        Ok(result)
    }

    // =========================================================================
    // Rewards
    // =========================================================================

    /// Lists the currently available rewards, cheapest first.
    pub async fn rewards(&self) -> ProgramResult<Vec<Reward>> {
        Ok(self.db.rewards().list_available().await?)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Resolves a reward by name; missing and unavailable are both
    /// `UnknownReward` (neither can be redeemed).
    async fn resolve_reward(&self, name: &str) -> ProgramResult<Reward> {
        let reward = self.db.rewards().get_by_name(name.trim()).await?;
        match reward {
            Some(r) if r.is_available => Ok(r),
            _ => Err(ProgramError::UnknownReward(name.trim().to_string())),
        }
    }

    /// Re-projects balance and tier after a mutation.
    async fn summarize(&self, customer_id: &str, entry: LedgerEntry) -> ProgramResult<OperationResult> {
        let balance = self.db.ledger().balance(customer_id).await?;
        let tier = self.config.tier_policy().classify(balance);

        Ok(OperationResult {
            entry,
            balance,
            tier,
        })
    }
}
