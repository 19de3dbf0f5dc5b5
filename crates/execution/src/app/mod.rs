// Path: crates/execution/src/app/mod.rs
mod receipt;

pub use receipt::{write_set_digest, ExecutionReceipt};

use mno_api::services::{LedgerService, MethodIntent};
use mno_api::state::{StateAccess, StateChangeSet, StateOverlay};
use mno_types::app::ServiceCall;
use mno_types::error::{ErrorCode, ServiceError, TransactionError};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Dispatches service calls and commits each successful `Submit` call's writes
/// to the ledger in a single `batch_apply`.
///
/// Every call runs against a fresh `StateOverlay`, so a failing call leaves
/// the ledger exactly as it found it, however many writes it had buffered.
#[derive(Default)]
pub struct TransactionExecutor {
    // BTreeMap for deterministic iteration order.
    services: BTreeMap<String, Arc<dyn LedgerService>>,
}

impl TransactionExecutor {
    /// Creates an executor with no services.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service under its id.
    pub fn register(&mut self, service: Arc<dyn LedgerService>) -> Result<(), ServiceError> {
        let id = service.id().to_string();
        if self.services.contains_key(&id) {
            return Err(ServiceError::DuplicateService(id));
        }
        tracing::debug!(
            target: "execution",
            service = %id,
            abi_version = service.abi_version(),
            "registered service"
        );
        self.services.insert(id, service);
        Ok(())
    }

    /// The ids of all registered services, in ascending order.
    pub fn service_ids(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Executes `call`. A successful `Submit` call's writes are committed to
    /// `state`; anything else leaves `state` untouched.
    pub fn execute(
        &self,
        state: &mut dyn StateAccess,
        call: &ServiceCall,
    ) -> Result<ExecutionReceipt, TransactionError> {
        let (intent, output, (inserts, deletes)) = self.run(&*state, call)?;

        if intent == MethodIntent::Evaluate {
            return ExecutionReceipt::new(output, Vec::new(), Vec::new());
        }

        let receipt = ExecutionReceipt::new(output, inserts, deletes)?;
        state.batch_apply(&receipt.inserts, &receipt.deletes)?;
        tracing::info!(
            target: "execution",
            service = %call.service_id,
            method = %call.method,
            inserts = receipt.inserts.len(),
            deletes = receipt.deletes.len(),
            write_set = %receipt.digest_hex(),
            "committed service call"
        );
        Ok(receipt)
    }

    /// Executes `call` without committing, regardless of its intent.
    pub fn evaluate(
        &self,
        state: &dyn StateAccess,
        call: &ServiceCall,
    ) -> Result<ExecutionReceipt, TransactionError> {
        let (_, output, _) = self.run(state, call)?;
        ExecutionReceipt::new(output, Vec::new(), Vec::new())
    }

    fn run(
        &self,
        base: &dyn StateAccess,
        call: &ServiceCall,
    ) -> Result<(MethodIntent, Vec<u8>, StateChangeSet), TransactionError> {
        let service = self.services.get(&call.service_id).ok_or_else(|| {
            TransactionError::Unsupported(format!("Unknown service '{}'", call.service_id))
        })?;
        let intent = service.method_intent(&call.method).ok_or_else(|| {
            TransactionError::Unsupported(format!(
                "Service '{}' does not support method '{}'",
                call.service_id, call.method
            ))
        })?;

        let mut overlay = StateOverlay::new(base);
        match service.handle_service_call(&mut overlay, &call.method, &call.params) {
            Ok(output) => Ok((intent, output, overlay.into_ordered_batch())),
            Err(e) => {
                // The overlay is dropped with its writes.
                tracing::warn!(
                    target: "execution",
                    service = %call.service_id,
                    method = %call.method,
                    code = e.code(),
                    error = %e,
                    "service call failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mno_state::memory::MemoryState;
    use mno_types::error::RegistryError;
    use std::any::Any;

    /// Writes each byte of its params under its own key, then fails if asked to.
    struct Scribble;

    impl LedgerService for Scribble {
        fn id(&self) -> &str {
            "scribble"
        }
        fn abi_version(&self) -> u32 {
            1
        }
        fn state_schema(&self) -> &str {
            "v1"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn method_intent(&self, method: &str) -> Option<MethodIntent> {
            match method {
                "write@v1" | "write_then_fail@v1" => Some(MethodIntent::Submit),
                "peek@v1" => Some(MethodIntent::Evaluate),
                _ => None,
            }
        }
        fn handle_service_call(
            &self,
            state: &mut dyn StateAccess,
            method: &str,
            params: &[u8],
        ) -> Result<Vec<u8>, TransactionError> {
            for b in params {
                state.insert(&[*b], b"1")?;
            }
            match method {
                "write_then_fail@v1" => Err(RegistryError::InvalidRecord("late failure".into()).into()),
                _ => Ok(b"null".to_vec()),
            }
        }
    }

    fn executor() -> TransactionExecutor {
        let mut exec = TransactionExecutor::new();
        exec.register(Arc::new(Scribble)).unwrap();
        exec
    }

    #[test]
    fn duplicate_services_are_rejected() {
        let mut exec = executor();
        assert_eq!(
            exec.register(Arc::new(Scribble)),
            Err(ServiceError::DuplicateService("scribble".into()))
        );
        assert_eq!(exec.service_ids().collect::<Vec<_>>(), vec!["scribble"]);
    }

    #[test]
    fn submit_commits_all_writes() {
        let exec = executor();
        let mut state = MemoryState::new();
        let receipt = exec
            .execute(&mut state, &ServiceCall::new("scribble", "write@v1", b"ba".to_vec()))
            .unwrap();

        assert_eq!(state.len(), 2);
        assert_eq!(
            receipt.inserts,
            vec![(b"a".to_vec(), b"1".to_vec()), (b"b".to_vec(), b"1".to_vec())]
        );
        assert_eq!(receipt.output, b"null".to_vec());
    }

    #[test]
    fn failed_calls_commit_nothing() {
        let exec = executor();
        let mut state = MemoryState::new();
        let before = state.digest().unwrap();

        let err = exec
            .execute(&mut state, &ServiceCall::new("scribble", "write_then_fail@v1", b"xyz".to_vec()))
            .unwrap_err();
        assert_eq!(err.code(), "MNO_INVALID_RECORD");
        assert!(state.is_empty());
        assert_eq!(state.digest().unwrap(), before);
    }

    #[test]
    fn evaluate_intent_and_evaluate_calls_never_commit() {
        let exec = executor();
        let mut state = MemoryState::new();

        let receipt = exec
            .execute(&mut state, &ServiceCall::new("scribble", "peek@v1", b"p".to_vec()))
            .unwrap();
        assert!(receipt.is_read_only());
        assert!(state.is_empty());

        let receipt = exec
            .evaluate(&state, &ServiceCall::new("scribble", "write@v1", b"q".to_vec()))
            .unwrap();
        assert!(receipt.is_read_only());
        assert_eq!(receipt.output, b"null".to_vec());
        assert!(state.is_empty());
    }

    #[test]
    fn unknown_services_and_methods_are_unsupported() {
        let exec = executor();
        let mut state = MemoryState::new();
        for call in [
            ServiceCall::new("nope", "write@v1", Vec::new()),
            ServiceCall::new("scribble", "erase@v1", Vec::new()),
        ] {
            let err = exec.execute(&mut state, &call).unwrap_err();
            assert_eq!(err.code(), "TX_UNSUPPORTED");
        }
    }
}
