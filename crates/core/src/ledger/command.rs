//! Move call description and CLI argv rendering.
//!
//! Arguments go to the CLI as separate argv entries, never through a shell,
//! so values with spaces or quotes survive intact. Vector arguments use the
//! CLI's bracket syntax.

use super::LedgerError;
use crate::address::is_ledger_address;

/// One positional argument of a Move call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// A UTF-8 string argument.
    Str(String),
    /// An unsigned integer argument.
    U64(u64),
    /// An object id or address (`0x...`).
    Object(String),
    /// A `vector<u64>` argument.
    U64Vec(Vec<u64>),
    /// A `vector<String>` argument.
    StrVec(Vec<String>),
}

impl CallArg {
    /// Render the argument as a single argv entry.
    pub fn render(&self) -> String {
        match self {
            CallArg::Str(s) => s.clone(),
            CallArg::U64(n) => n.to_string(),
            CallArg::Object(id) => id.clone(),
            CallArg::U64Vec(values) => {
                let items: Vec<String> = values.iter().map(u64::to_string).collect();
                format!("[{}]", items.join(","))
            }
            CallArg::StrVec(values) => {
                let items: Vec<String> = values.iter().map(|v| quote(v)).collect();
                format!("[{}]", items.join(","))
            }
        }
    }
}

/// Double-quote a string for the CLI's vector syntax, escaping `\` and `"`.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// A `sui client call` invocation.
#[derive(Debug, Clone)]
pub struct MoveCall {
    pub package: String,
    pub module: &'static str,
    pub function: &'static str,
    pub args: Vec<CallArg>,
    pub gas_budget: u64,
}

impl MoveCall {
    pub fn new(package: &str, module: &'static str, function: &'static str) -> Self {
        Self {
            package: package.to_string(),
            module,
            function,
            args: Vec::new(),
            gas_budget: super::DEFAULT_GAS_BUDGET,
        }
    }

    pub fn arg(mut self, arg: CallArg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn gas_budget(mut self, budget: u64) -> Self {
        self.gas_budget = budget;
        self
    }

    /// Check every object argument and the package id for address shape.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if !is_ledger_address(&self.package) {
            return Err(LedgerError::InvalidArgument(format!(
                "package id '{}' is not a valid address",
                self.package
            )));
        }
        for arg in &self.args {
            if let CallArg::Object(id) = arg {
                if !is_ledger_address(id) {
                    return Err(LedgerError::InvalidArgument(format!(
                        "'{id}' is not a valid object id"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the argv that follows the CLI program name.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = vec![
            "client".to_string(),
            "call".to_string(),
            "--package".to_string(),
            self.package.clone(),
            "--module".to_string(),
            self.module.to_string(),
            "--function".to_string(),
            self.function.to_string(),
        ];
        if !self.args.is_empty() {
            argv.push("--args".to_string());
            argv.extend(self.args.iter().map(CallArg::render));
        }
        argv.push("--gas-budget".to_string());
        argv.push(self.gas_budget.to_string());
        argv
    }
}
