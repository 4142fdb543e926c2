use std::time::Duration;

use paperfans_core::ledger::{LedgerConfig, LedgerTimeouts, DEFAULT_GAS_BUDGET};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets and chain identifiers have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`). Must outlast the
    /// slowest ledger call.
    pub request_timeout_secs: u64,
    /// Access token validation.
    pub jwt: JwtConfig,
    /// Chain CLI location, package identifiers and per-call timeouts.
    pub ledger: LedgerConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `90`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`ledger_config_from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = env_u64("REQUEST_TIMEOUT_SECS", 90);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            ledger: ledger_config_from_env(),
        }
    }
}

/// Load the chain CLI configuration.
///
/// | Env Var                        | Required | Default     |
/// |--------------------------------|----------|-------------|
/// | `LEDGER_CLI_PATH`              | no       | `sui`       |
/// | `LEDGER_PACKAGE_ID`            | **yes**  | --          |
/// | `LEDGER_TREASURY_CAP_ID`       | **yes**  | --          |
/// | `LEDGER_GAS_BUDGET`            | no       | `100000000` |
/// | `LEDGER_MINT_TIMEOUT_SECS`     | no       | `30`        |
/// | `LEDGER_PROPOSAL_TIMEOUT_SECS` | no       | `30`        |
/// | `LEDGER_DEPLOY_TIMEOUT_SECS`   | no       | `60`        |
/// | `LEDGER_PURCHASE_TIMEOUT_SECS` | no       | `10`        |
///
/// # Panics
///
/// Panics if a required variable is missing or a number fails to parse.
pub fn ledger_config_from_env() -> LedgerConfig {
    let defaults = LedgerTimeouts::default();
    let timeout = |key: &str, default: Duration| {
        Duration::from_secs(env_u64(key, default.as_secs()))
    };

    LedgerConfig {
        cli_path: std::env::var("LEDGER_CLI_PATH").unwrap_or_else(|_| "sui".into()),
        package_id: required("LEDGER_PACKAGE_ID"),
        treasury_cap_id: required("LEDGER_TREASURY_CAP_ID"),
        gas_budget: env_u64("LEDGER_GAS_BUDGET", DEFAULT_GAS_BUDGET),
        timeouts: LedgerTimeouts {
            mint: timeout("LEDGER_MINT_TIMEOUT_SECS", defaults.mint),
            proposal: timeout("LEDGER_PROPOSAL_TIMEOUT_SECS", defaults.proposal),
            deploy: timeout("LEDGER_DEPLOY_TIMEOUT_SECS", defaults.deploy),
            purchase: timeout("LEDGER_PURCHASE_TIMEOUT_SECS", defaults.purchase),
        },
    }
}

fn required(key: &str) -> String {
    let value = std::env::var(key).unwrap_or_else(|_| panic!("{key} must be set in the environment"));
    assert!(!value.trim().is_empty(), "{key} must not be empty");
    value
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid u64")),
        Err(_) => default,
    }
}
