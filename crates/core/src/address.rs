//! Ledger address and object id format checks.
//!
//! Wallet addresses and on-chain object ids share one textual form: `0x`
//! followed by 1 to 64 hex digits.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{1,64}$").expect("valid regex"));

/// Returns `true` if `value` looks like a ledger address or object id.
pub fn is_ledger_address(value: &str) -> bool {
    ADDRESS_RE.is_match(value)
}

/// Validate a wallet address or object id, naming `field` in the error.
pub fn validate_ledger_address(value: &str, field: &str) -> Result<(), CoreError> {
    if !is_ledger_address(value) {
        return Err(CoreError::Validation(format!(
            "{field} must be 0x followed by 1-64 hex digits, got '{value}'"
        )));
    }
    Ok(())
}
