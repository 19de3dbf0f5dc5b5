// Path: crates/cli/src/commands/digest.rs

use anyhow::Result;
use mno_cli::LedgerSession;

pub fn run(session: &LedgerSession) -> Result<()> {
    println!("{}", session.digest()?);
    Ok(())
}
