// Path: crates/cli/src/session.rs

//! One CLI invocation's view of the ledger: load the snapshot, run calls
//! through the executor, write the snapshot back after a committed write.

use anyhow::{Context, Result};
use mno_execution::{ExecutionReceipt, TransactionExecutor};
use mno_services::mno_registry::MnoRegistryService;
use mno_state::memory::MemoryState;
use mno_types::app::ServiceCall;
use mno_types::config::RegistryConfig;
use mno_types::error::TransactionError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A ledger loaded from an optional snapshot file, with the registry registered.
pub struct LedgerSession {
    path: Option<PathBuf>,
    state: MemoryState,
    executor: TransactionExecutor,
    service_id: String,
}

impl LedgerSession {
    /// Opens the snapshot at `path`, or an empty ledger if the file does not
    /// exist. Without a path the ledger lives only for this session.
    pub fn open(path: Option<&Path>, config: &RegistryConfig) -> Result<Self> {
        let state = match path {
            Some(p) if p.exists() => {
                let bytes = std::fs::read(p)
                    .with_context(|| format!("Failed to read state file '{}'", p.display()))?;
                MemoryState::from_snapshot(&bytes)
                    .with_context(|| format!("Corrupt state file '{}'", p.display()))?
            }
            _ => MemoryState::new(),
        };
        tracing::debug!(target: "cli", entries = state.len(), "opened ledger");

        let service = MnoRegistryService::new(config.clone())?;
        let mut executor = TransactionExecutor::new();
        executor.register(Arc::new(service))?;

        Ok(Self {
            path: path.map(Path::to_path_buf),
            state,
            executor,
            service_id: config.service_id.clone(),
        })
    }

    /// Executes one registry method, persisting the ledger if the call
    /// committed any writes.
    pub fn call(&mut self, method: &str, params: Vec<u8>) -> Result<ExecutionReceipt> {
        let call = ServiceCall::new(self.service_id.clone(), method, params);
        let receipt = self.execute(&call)?;
        if !receipt.is_read_only() {
            self.persist()?;
        }
        Ok(receipt)
    }

    /// The hex digest of the current ledger contents.
    pub fn digest(&self) -> Result<String> {
        Ok(self.state.digest()?)
    }

    fn execute(&mut self, call: &ServiceCall) -> Result<ExecutionReceipt, TransactionError> {
        self.executor.execute(&mut self.state, call)
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = self.state.snapshot()?;
        // Write-then-rename so an interrupted write never leaves a torn snapshot.
        let tmp = temp_path(path);
        std::fs::write(&tmp, &bytes)
            .with_context(|| format!("Failed to write state file '{}'", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace state file '{}'", path.display()))?;
        tracing::debug!(target: "cli", path = %path.display(), bytes = bytes.len(), "persisted ledger");
        Ok(())
    }
}

/// The sibling path a snapshot is staged at before it replaces `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
