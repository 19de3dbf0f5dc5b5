// Path: crates/cli/src/commands/call.rs

use super::print_output;
use anyhow::{Context, Result};
use clap::Parser;
use mno_cli::LedgerSession;

#[derive(Parser, Debug)]
pub struct CallArgs {
    /// The versioned method name, e.g. `listAll@v1`.
    pub method: String,
    /// The JSON arguments. Omit for methods that take none.
    pub params: Option<String>,
}

pub fn run(session: &mut LedgerSession, args: CallArgs) -> Result<()> {
    let params = match args.params {
        Some(json) => {
            // Reject malformed JSON here so the error names the argument.
            serde_json::from_str::<serde_json::Value>(&json)
                .context("PARAMS_JSON is not valid JSON")?;
            json.into_bytes()
        }
        None => Vec::new(),
    };
    let receipt = session.call(&args.method, params)?;
    print_output(&receipt);
    Ok(())
}
