//! The four on-chain actions and the [`LedgerBridge`] that runs them.

use std::time::Duration;

use serde::Deserialize;

use super::command::{CallArg, MoveCall};
use super::parser::{parse_receipt, LedgerReceipt};
use super::runner::run_cli;
use super::{LedgerConfig, LedgerError};
use crate::address::is_ledger_address;
use crate::types::DbId;

/// Decimal places of the mock stablecoin; amounts are scaled by this.
pub const STABLECOIN_DECIMALS: u32 = 6;

/// Maximum length of a paper token symbol.
pub const MAX_SYMBOL_LENGTH: usize = 10;

pub const MODULE_MOCK_USDC: &str = "mock_usdc";
pub const MODULE_RESEARCH: &str = "research";
pub const MODULE_PAPER_TOKEN: &str = "paper_token";

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Mint mock stablecoin to a wallet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub recipient: String,
    /// Whole stablecoin units.
    pub amount: u64,
}

/// One funded milestone of an on-chain proposal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneInput {
    pub name: String,
    pub amount: u64,
}

/// Register a research proposal on-chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    /// Platform project to link the created proposal object to.
    pub project_id: Option<DbId>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub funding_goal: u64,
    #[serde(default)]
    pub milestones: Vec<MilestoneInput>,
}

/// Deploy a research-paper token backed by a proposal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployPaperRequest {
    pub name: String,
    pub symbol: String,
    pub total_supply: u64,
    /// Whole stablecoin units per token.
    pub price_per_token: u64,
    pub proposal_id: String,
}

/// Buy paper tokens with a stablecoin coin object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTokensRequest {
    pub paper_id: String,
    pub payment_coin_id: String,
    pub amount: u64,
}

// ---------------------------------------------------------------------------
// Argument checks
// ---------------------------------------------------------------------------

fn invalid(msg: impl Into<String>) -> LedgerError {
    LedgerError::InvalidArgument(msg.into())
}

fn require_text(value: &str, field: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    Ok(())
}

fn require_positive(value: u64, field: &str) -> Result<(), LedgerError> {
    if value == 0 {
        return Err(invalid(format!("{field} must be greater than 0")));
    }
    Ok(())
}

fn require_address(value: &str, field: &str) -> Result<(), LedgerError> {
    if !is_ledger_address(value) {
        return Err(invalid(format!(
            "{field} must be 0x followed by 1-64 hex digits"
        )));
    }
    Ok(())
}

/// Scale whole stablecoin units to base units.
pub fn to_base_units(amount: u64) -> Result<u64, LedgerError> {
    amount
        .checked_mul(10u64.pow(STABLECOIN_DECIMALS))
        .ok_or_else(|| invalid(format!("amount {amount} is too large")))
}

impl MintRequest {
    pub fn validate(&self) -> Result<(), LedgerError> {
        require_address(&self.recipient, "recipient")?;
        require_positive(self.amount, "amount")
    }
}

impl CreateProposalRequest {
    pub fn validate(&self) -> Result<(), LedgerError> {
        require_text(&self.title, "title")?;
        require_text(&self.abstract_text, "abstract")?;
        require_positive(self.funding_goal, "fundingGoal")?;
        let mut total: u64 = 0;
        for (i, m) in self.milestones.iter().enumerate() {
            require_text(&m.name, &format!("milestones[{i}].name"))?;
            total = total.saturating_add(m.amount);
        }
        if total > self.funding_goal {
            return Err(invalid(format!(
                "milestone amounts total {total}, which exceeds the funding goal of {}",
                self.funding_goal
            )));
        }
        Ok(())
    }
}

impl DeployPaperRequest {
    pub fn validate(&self) -> Result<(), LedgerError> {
        require_text(&self.name, "name")?;
        let symbol_ok = !self.symbol.is_empty()
            && self.symbol.len() <= MAX_SYMBOL_LENGTH
            && self
                .symbol
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if !symbol_ok {
            return Err(invalid(format!(
                "symbol must be 1-{MAX_SYMBOL_LENGTH} uppercase letters or digits"
            )));
        }
        require_positive(self.total_supply, "totalSupply")?;
        require_positive(self.price_per_token, "pricePerToken")?;
        require_address(&self.proposal_id, "proposalId")
    }
}

impl PurchaseTokensRequest {
    pub fn validate(&self) -> Result<(), LedgerError> {
        require_address(&self.paper_id, "paperId")?;
        require_address(&self.payment_coin_id, "paymentCoinId")?;
        require_positive(self.amount, "amount")
    }
}

// ---------------------------------------------------------------------------
// Bridge
// ---------------------------------------------------------------------------

/// Builds, runs and parses CLI invocations for the on-chain actions.
#[derive(Debug, Clone)]
pub struct LedgerBridge {
    config: LedgerConfig,
}

impl LedgerBridge {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    fn call(&self, module: &'static str, function: &'static str) -> MoveCall {
        MoveCall::new(&self.config.package_id, module, function).gas_budget(self.config.gas_budget)
    }

    pub fn mint_call(&self, req: &MintRequest) -> Result<MoveCall, LedgerError> {
        req.validate()?;
        Ok(self
            .call(MODULE_MOCK_USDC, "mint")
            .arg(CallArg::Object(self.config.treasury_cap_id.clone()))
            .arg(CallArg::U64(to_base_units(req.amount)?))
            .arg(CallArg::Object(req.recipient.clone())))
    }

    pub fn proposal_call(&self, req: &CreateProposalRequest) -> Result<MoveCall, LedgerError> {
        req.validate()?;
        let amounts = req
            .milestones
            .iter()
            .map(|m| to_base_units(m.amount))
            .collect::<Result<Vec<_>, _>>()?;
        let names = req.milestones.iter().map(|m| m.name.clone()).collect();
        Ok(self
            .call(MODULE_RESEARCH, "create_proposal")
            .arg(CallArg::Str(req.title.clone()))
            .arg(CallArg::Str(req.abstract_text.clone()))
            .arg(CallArg::U64(to_base_units(req.funding_goal)?))
            .arg(CallArg::U64Vec(amounts))
            .arg(CallArg::StrVec(names)))
    }

    pub fn deploy_call(&self, req: &DeployPaperRequest) -> Result<MoveCall, LedgerError> {
        req.validate()?;
        Ok(self
            .call(MODULE_PAPER_TOKEN, "deploy")
            .arg(CallArg::Str(req.name.clone()))
            .arg(CallArg::Str(req.symbol.clone()))
            .arg(CallArg::U64(req.total_supply))
            .arg(CallArg::U64(to_base_units(req.price_per_token)?))
            .arg(CallArg::Object(req.proposal_id.clone())))
    }

    pub fn purchase_call(&self, req: &PurchaseTokensRequest) -> Result<MoveCall, LedgerError> {
        req.validate()?;
        Ok(self
            .call(MODULE_PAPER_TOKEN, "purchase")
            .arg(CallArg::Object(req.paper_id.clone()))
            .arg(CallArg::Object(req.payment_coin_id.clone()))
            .arg(CallArg::U64(req.amount)))
    }

    pub async fn mint(&self, req: &MintRequest) -> Result<LedgerReceipt, LedgerError> {
        let call = self.mint_call(req)?;
        self.execute(&call, self.config.timeouts.mint).await
    }

    pub async fn create_proposal(
        &self,
        req: &CreateProposalRequest,
    ) -> Result<LedgerReceipt, LedgerError> {
        let call = self.proposal_call(req)?;
        self.execute(&call, self.config.timeouts.proposal).await
    }

    pub async fn deploy_paper(
        &self,
        req: &DeployPaperRequest,
    ) -> Result<LedgerReceipt, LedgerError> {
        let call = self.deploy_call(req)?;
        self.execute(&call, self.config.timeouts.deploy).await
    }

    pub async fn purchase_tokens(
        &self,
        req: &PurchaseTokensRequest,
    ) -> Result<LedgerReceipt, LedgerError> {
        let call = self.purchase_call(req)?;
        self.execute(&call, self.config.timeouts.purchase).await
    }

    /// Run `call` and scrape its report.
    pub async fn execute(
        &self,
        call: &MoveCall,
        timeout: Duration,
    ) -> Result<LedgerReceipt, LedgerError> {
        call.validate()?;
        let argv = call.to_argv();

        tracing::info!(
            module = call.module,
            function = call.function,
            timeout_secs = timeout.as_secs(),
            "Running ledger command",
        );

        let output = run_cli(&self.config.cli_path, &argv, timeout)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    module = call.module,
                    function = call.function,
                    error = %e,
                    "Ledger command could not complete",
                );
            })?;

        if !output.success() {
            tracing::warn!(
                module = call.module,
                function = call.function,
                exit_code = output.exit_code,
                duration_ms = output.duration_ms,
                "Ledger command exited with failure",
            );
            return Err(LedgerError::CommandFailed {
                exit_code: output.exit_code,
                output: output.failure_text(),
            });
        }

        let receipt = parse_receipt(&output.stdout)?;
        tracing::info!(
            module = call.module,
            function = call.function,
            digest = %receipt.transaction_digest,
            created = receipt.created_object_ids.len(),
            duration_ms = output.duration_ms,
            "Ledger command succeeded",
        );
        Ok(receipt)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
