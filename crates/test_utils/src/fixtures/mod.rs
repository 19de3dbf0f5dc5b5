//! Test fixtures for reproducible tests

use mno_api::state::StateAccess;
use mno_state::memory::MemoryState;
use mno_types::app::Mno;
use mno_types::config::DEFAULT_SEED_ENDPOINT;
use mno_types::error::RegistryError;

/// The ids the default configuration seeds, in id order.
pub const SEEDED_IDS: [&str; 6] = ["mno1", "mno2", "mno3", "mno4", "mno5", "mno6"];

/// Predefined test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// A record with a name and endpoint derived from its id.
    pub fn mno(id: &str) -> Result<Mno, RegistryError> {
        Mno::new(id, format!("{id}-name"), format!("https://{id}.example/api/mno"))
    }

    /// The record `seed@v1` creates for `id` under the default configuration.
    pub fn seeded_mno(id: &str) -> Result<Mno, RegistryError> {
        Mno::new(id, id, DEFAULT_SEED_ENDPOINT)
    }

    /// A ledger holding the canonical encoding of each record under its id.
    pub fn ledger_with(records: &[Mno]) -> Result<MemoryState, RegistryError> {
        let mut state = MemoryState::new();
        for mno in records {
            state.insert(mno.id().as_bytes(), &mno.to_canonical_bytes()?)?;
        }
        Ok(state)
    }

    /// A ledger holding arbitrary raw values, for exercising decode failures.
    pub fn raw_ledger(entries: &[(&str, &[u8])]) -> MemoryState {
        let mut state = MemoryState::new();
        for (key, value) in entries {
            // MemoryState writes are infallible.
            let _ = state.insert(key.as_bytes(), value);
        }
        state
    }

    /// The JSON arguments of `create@v1` / `update@v1`.
    pub fn mno_params(id: &str, name: &str, endpoint: &str) -> Vec<u8> {
        serde_json::json!({ "mnoId": id, "mnoName": name, "endpoint": endpoint })
            .to_string()
            .into_bytes()
    }

    /// The JSON arguments of `read@v1`, `delete@v1` and `exists@v1`.
    pub fn id_params(id: &str) -> Vec<u8> {
        serde_json::json!({ "mnoId": id }).to_string().into_bytes()
    }
}
