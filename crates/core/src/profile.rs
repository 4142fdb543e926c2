//! User profile validation.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateUrl;

use crate::address::validate_ledger_address;
use crate::error::CoreError;
use crate::project::validate_required;

/// Maximum display name length in characters.
pub const MAX_NAME_LENGTH: usize = 120;

static ORCID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").expect("valid regex"));

/// Validate an ORCID iD (`0000-0002-1825-0097` form).
pub fn validate_orcid(orcid: &str) -> Result<(), CoreError> {
    if !ORCID_RE.is_match(orcid) {
        return Err(CoreError::Validation(format!(
            "orcidId must look like 0000-0000-0000-000X, got '{orcid}'"
        )));
    }
    Ok(())
}

/// Validate a profile upsert.
pub fn validate_profile(
    name: &str,
    avatar_url: Option<&str>,
    wallet_address: Option<&str>,
    orcid_id: Option<&str>,
) -> Result<(), CoreError> {
    validate_required(name, "name")?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    if let Some(url) = avatar_url {
        if !url.validate_url() {
            return Err(CoreError::Validation(format!(
                "avatarUrl is not a valid URL: '{url}'"
            )));
        }
    }
    if let Some(addr) = wallet_address {
        validate_ledger_address(addr, "walletAddress")?;
    }
    if let Some(orcid) = orcid_id {
        validate_orcid(orcid)?;
    }
    Ok(())
}
