//! Funding tier and contribution rules.

use crate::address::validate_ledger_address;
use crate::error::CoreError;
use crate::project::validate_required;

/// Maximum number of benefit bullet points on a tier.
pub const MAX_TIER_BENEFITS: usize = 20;

/// Maximum length of a caller-supplied transaction id.
pub const MAX_TRANSACTION_ID_LENGTH: usize = 128;

/// Prefix for server-generated transaction ids on off-chain contributions.
pub const GENERATED_TX_PREFIX: &str = "offchain-";

/// Validate a new funding tier.
pub fn validate_tier(
    name: &str,
    amount: i64,
    benefits: &[String],
    max_backers: Option<i32>,
) -> Result<(), CoreError> {
    validate_required(name, "name")?;
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "amount must be greater than 0, got {amount}"
        )));
    }
    if benefits.len() > MAX_TIER_BENEFITS {
        return Err(CoreError::Validation(format!(
            "a tier may list at most {MAX_TIER_BENEFITS} benefits"
        )));
    }
    if benefits.iter().any(|b| b.trim().is_empty()) {
        return Err(CoreError::Validation(
            "benefits must not contain blank entries".into(),
        ));
    }
    if let Some(cap) = max_backers {
        if cap <= 0 {
            return Err(CoreError::Validation(format!(
                "maxBackers must be greater than 0, got {cap}"
            )));
        }
    }
    Ok(())
}

/// Validate a contribution payload.
pub fn validate_contribution(
    contributor_name: &str,
    amount: i64,
    wallet_address: Option<&str>,
    transaction_id: Option<&str>,
) -> Result<(), CoreError> {
    validate_required(contributor_name, "contributorName")?;
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "amount must be greater than 0, got {amount}"
        )));
    }
    if let Some(addr) = wallet_address {
        validate_ledger_address(addr, "walletAddress")?;
    }
    if let Some(tx) = transaction_id {
        validate_required(tx, "transactionId")?;
        if tx.len() > MAX_TRANSACTION_ID_LENGTH {
            return Err(CoreError::Validation(format!(
                "transactionId must be at most {MAX_TRANSACTION_ID_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Use the caller's transaction id, or mint a unique off-chain one.
pub fn resolve_transaction_id(supplied: Option<&str>) -> String {
    match supplied {
        Some(tx) => tx.trim().to_string(),
        None => format!("{GENERATED_TX_PREFIX}{}", uuid::Uuid::new_v4().simple()),
    }
}
