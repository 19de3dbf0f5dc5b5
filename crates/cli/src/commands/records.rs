// Path: crates/cli/src/commands/records.rs

use super::print_output;
use anyhow::Result;
use clap::Parser;
use mno_cli::LedgerSession;
use mno_services::mno_registry::{methods, MnoIdParams, MnoParams};

#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// The record id.
    #[clap(long)]
    pub id: String,
    /// The operator's display name.
    #[clap(long)]
    pub name: String,
    /// The operator's API endpoint.
    #[clap(long)]
    pub endpoint: String,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// The record id.
    pub id: String,
}

impl From<RecordArgs> for MnoParams {
    fn from(args: RecordArgs) -> Self {
        Self {
            mno_id: args.id,
            mno_name: args.name,
            endpoint: args.endpoint,
        }
    }
}

fn id_params(args: IdArgs) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&MnoIdParams { mno_id: args.id })?)
}

fn invoke(session: &mut LedgerSession, method: &str, params: Vec<u8>) -> Result<()> {
    let receipt = session.call(method, params)?;
    print_output(&receipt);
    Ok(())
}

pub fn seed(session: &mut LedgerSession) -> Result<()> {
    invoke(session, methods::SEED, Vec::new())
}

pub fn create(session: &mut LedgerSession, args: RecordArgs) -> Result<()> {
    let params = serde_json::to_vec(&MnoParams::from(args))?;
    invoke(session, methods::CREATE, params)
}

pub fn read(session: &mut LedgerSession, args: IdArgs) -> Result<()> {
    invoke(session, methods::READ, id_params(args)?)
}

pub fn update(session: &mut LedgerSession, args: RecordArgs) -> Result<()> {
    let params = serde_json::to_vec(&MnoParams::from(args))?;
    invoke(session, methods::UPDATE, params)
}

pub fn delete(session: &mut LedgerSession, args: IdArgs) -> Result<()> {
    invoke(session, methods::DELETE, id_params(args)?)
}

pub fn exists(session: &mut LedgerSession, args: IdArgs) -> Result<()> {
    invoke(session, methods::EXISTS, id_params(args)?)
}

pub fn list(session: &mut LedgerSession) -> Result<()> {
    invoke(session, methods::LIST_ALL, Vec::new())
}
