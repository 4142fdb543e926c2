//! Ledger command bridge.
//!
//! Drives the external chain CLI (`sui client call ...`) for the four
//! on-chain actions the platform exposes: minting the mock stablecoin,
//! creating a research proposal, deploying a paper token and purchasing
//! paper tokens. There is no protocol code here; the CLI signs and submits,
//! and this module scrapes the transaction digest and created object ids
//! from its human-oriented report.
//!
//! - [`command`] -- Move call description and argv rendering.
//! - [`runner`] -- Subprocess spawn, output capture, timeout.
//! - [`parser`] -- Digest and object id scraping.
//! - [`operations`] -- Request payloads and the [`LedgerBridge`] facade.

pub mod command;
pub mod operations;
pub mod parser;
pub mod runner;

use std::time::Duration;

use crate::error::CoreError;

pub use operations::LedgerBridge;
pub use parser::LedgerReceipt;

/// Per-operation timeouts for CLI invocations.
#[derive(Debug, Clone)]
pub struct LedgerTimeouts {
    pub mint: Duration,
    pub proposal: Duration,
    pub deploy: Duration,
    pub purchase: Duration,
}

impl Default for LedgerTimeouts {
    fn default() -> Self {
        Self {
            mint: Duration::from_secs(30),
            proposal: Duration::from_secs(30),
            deploy: Duration::from_secs(60),
            purchase: Duration::from_secs(10),
        }
    }
}

/// Where the CLI lives and which on-chain package it targets.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// CLI binary, resolved through `PATH` when not absolute.
    pub cli_path: String,
    /// Address of the published Move package.
    pub package_id: String,
    /// Treasury cap object of the mock stablecoin, required for minting.
    pub treasury_cap_id: String,
    /// Gas budget passed with every call.
    pub gas_budget: u64,
    pub timeouts: LedgerTimeouts,
}

/// Default gas budget (0.1 SUI in MIST).
pub const DEFAULT_GAS_BUDGET: u64 = 100_000_000;

/// Errors produced while invoking the CLI or reading its report.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A payload field failed validation before anything was spawned.
    #[error("{0}")]
    InvalidArgument(String),

    /// The CLI could not be launched (missing binary, permissions).
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The CLI did not finish within its timeout and was killed.
    #[error("ledger command timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// The CLI exited non-zero; `output` is its raw stderr (or stdout when
    /// stderr was empty).
    #[error("{output}")]
    CommandFailed { exit_code: i32, output: String },

    /// The CLI reported success but printed no transaction digest.
    #[error("ledger command succeeded but no transaction digest was found in its output")]
    MissingDigest,
}

impl From<LedgerError> for CoreError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidArgument(msg) => CoreError::Validation(msg),
            other => CoreError::External(other.to_string()),
        }
    }
}
