// Path: crates/services/src/mno_registry/tests.rs

use super::*;
use mno_state::memory::MemoryState;
use mno_test_utils::fixtures::{TestFixtures, SEEDED_IDS};
use mno_test_utils::{assert_bytes_eq, assert_err, assert_err_code, assert_ok};
use mno_types::config::SeedRecord;
use mno_types::error::ErrorCode;
use mno_types::MAX_STATE_VALUE_BYTES;
use proptest::prelude::*;

fn service() -> MnoRegistryService {
    assert_ok!(MnoRegistryService::new(RegistryConfig::default()))
}

fn ids(records: &[Mno]) -> Vec<&str> {
    records.iter().map(Mno::id).collect()
}

#[test]
fn create_then_read_returns_equal_record() {
    let svc = service();
    let mut state = MemoryState::new();

    let created = assert_ok!(svc.create(&mut state, "121212", "mno1", "http://localhost:9099/api/mno"));
    let read = assert_ok!(svc.read(&state, "121212"));

    assert_eq!(created, read);
    assert_eq!(read.name(), "mno1");
    assert!(assert_ok!(svc.exists(&state, "121212")));
}

#[test]
fn create_writes_canonical_bytes_under_the_id() {
    let svc = service();
    let mut state = MemoryState::new();
    assert_ok!(svc.create(&mut state, "a", "n", "e"));

    let stored = assert_ok!(state.get(b"a")).unwrap();
    assert_bytes_eq!(stored, br#"{"endpoint":"e","mnoId":"a","mnoName":"n"}"#);
    assert_eq!(state.len(), 1);
}

#[test]
fn second_create_fails_and_leaves_value_unchanged() {
    let svc = service();
    let mut state = MemoryState::new();
    assert_ok!(svc.create(&mut state, "dup", "first", "e1"));
    let before = assert_ok!(state.get(b"dup"));

    let err = assert_err_code!(svc.create(&mut state, "dup", "second", "e2"), "MNO_ALREADY_EXIST");
    assert_eq!(err.to_string(), "Mno dup already exists");
    assert_eq!(assert_ok!(state.get(b"dup")), before);
}

#[test]
fn update_and_delete_of_unknown_ids_fail_not_found() {
    let svc = service();
    let mut state = MemoryState::new();

    let err = assert_err_code!(svc.update(&mut state, "ghost", "n", "e"), "MNO_NOT_FOUND");
    assert_eq!(err.to_string(), "Mno ghost does not exist");
    assert_err_code!(svc.delete(&mut state, "ghost"), "MNO_NOT_FOUND");
    assert_err_code!(svc.read(&state, "ghost"), "MNO_NOT_FOUND");
    assert!(state.is_empty());
}

#[test]
fn update_replaces_the_whole_record() {
    let svc = service();
    let mut state = MemoryState::new();
    assert_ok!(svc.create(&mut state, "x", "old", "http://old"));

    let updated = assert_ok!(svc.update(&mut state, "x", "new", "http://new"));
    assert_eq!(assert_ok!(svc.read(&state, "x")), updated);
    assert_eq!(updated.endpoint(), "http://new");
}

#[test]
fn delete_removes_the_record() {
    let svc = service();
    let mut state = MemoryState::new();
    assert_ok!(svc.create(&mut state, "gone", "n", "e"));

    assert_ok!(svc.delete(&mut state, "gone"));
    assert!(!assert_ok!(svc.exists(&state, "gone")));
    assert_eq!(assert_ok!(state.get(b"gone")), None);
    assert_err_code!(svc.delete(&mut state, "gone"), "MNO_NOT_FOUND");
}

#[test]
fn empty_values_count_as_absent() {
    let svc = service();
    let mut state = TestFixtures::raw_ledger(&[("hollow", &b""[..])]);

    assert!(!assert_ok!(svc.exists(&state, "hollow")));
    assert_err_code!(svc.read(&state, "hollow"), "MNO_NOT_FOUND");
    assert!(assert_ok!(svc.list_all(&state)).is_empty());
    // An empty slot can be created over.
    assert_ok!(svc.create(&mut state, "hollow", "n", "e"));
}

#[test]
fn create_rejects_an_empty_id() {
    let svc = service();
    let mut state = MemoryState::new();
    assert_err_code!(svc.create(&mut state, "", "n", "e"), "MNO_INVALID_RECORD");
    assert!(state.is_empty());
}

#[test]
fn list_all_is_ordered_by_id_bytes() {
    let svc = service();
    let mut state = MemoryState::new();
    for id in ["b", "a", "c"] {
        assert_ok!(svc.create(&mut state, id, id, "e"));
    }

    let records = assert_ok!(svc.list_all(&state));
    assert_eq!(ids(&records), vec!["a", "b", "c"]);
    assert_eq!(state.open_scans(), 0);
}

#[test]
fn list_all_of_an_empty_ledger_is_empty() {
    let svc = service();
    let state = MemoryState::new();
    assert!(assert_ok!(svc.list_all(&state)).is_empty());
    assert_eq!(state.open_scans(), 0);
}

#[test]
fn list_all_aborts_on_undecodable_value_and_releases_the_scan() {
    let svc = service();
    let good = assert_ok!(TestFixtures::mno("a")).to_canonical_bytes().unwrap();
    let state = TestFixtures::raw_ledger(&[("a", &good[..]), ("b", &b"not json"[..]), ("c", &good[..])]);

    let err = assert_err!(svc.list_all(&state));
    assert!(matches!(err, RegistryError::Decode(_)));
    assert_eq!(state.open_scans(), 0);

    // Reads of the healthy records are unaffected.
    assert_ok!(svc.read(&state, "a"));
    assert_err_code!(svc.read(&state, "b"), "MNO_DECODE_ERROR");
}

#[test]
fn oversized_records_are_rejected_before_writing() {
    let svc = service();
    let mut state = MemoryState::new();
    let original = assert_ok!(svc.create(&mut state, "a", "n", "e"));
    let huge = "x".repeat(MAX_STATE_VALUE_BYTES + 44 * 1024);

    assert_err_code!(svc.create(&mut state, "big", &huge, "e"), "MNO_INVALID_RECORD");
    assert!(!assert_ok!(svc.exists(&state, "big")));

    assert_err_code!(svc.update(&mut state, "a", &huge, "e"), "MNO_INVALID_RECORD");
    assert_eq!(assert_ok!(svc.read(&state, "a")), original);

    // The ledger stays listable.
    assert_eq!(ids(&assert_ok!(svc.list_all(&state))), vec!["a"]);
    assert_eq!(state.len(), 1);
}

#[test]
fn records_stored_under_a_foreign_key_fail_to_decode() {
    let svc = service();
    let a = assert_ok!(TestFixtures::mno("a")).to_canonical_bytes().unwrap();
    let state = TestFixtures::raw_ledger(&[("a", &a[..]), ("b", &a[..])]);

    assert_ok!(svc.read(&state, "a"));
    let err = assert_err_code!(svc.read(&state, "b"), "MNO_DECODE_ERROR");
    assert!(err.to_string().contains("record a is stored under key b"), "{err}");

    assert!(matches!(assert_err!(svc.list_all(&state)), RegistryError::Decode(_)));
    assert_eq!(state.open_scans(), 0);
}

#[test]
fn seed_creates_the_default_bootstrap_set() {
    let svc = service();
    let mut state = MemoryState::new();
    assert_ok!(svc.seed(&mut state));

    let records = assert_ok!(svc.list_all(&state));
    assert_eq!(ids(&records), SEEDED_IDS.to_vec());
    for record in &records {
        assert_eq!(*record, assert_ok!(TestFixtures::seeded_mno(record.id())));
        assert_eq!(record.endpoint(), "http://localhost:9000/api/mno");
    }
}

#[test]
fn seed_stops_at_the_first_existing_id() {
    let svc = service();
    let mut state = assert_ok!(TestFixtures::ledger_with(&[assert_ok!(TestFixtures::mno("mno3"))]));

    let err = assert_err_code!(svc.seed(&mut state), "MNO_ALREADY_EXIST");
    assert_eq!(err.to_string(), "Mno mno3 already exists");

    // Applied directly to the ledger, the creates before mno3 landed and none after it ran.
    assert!(assert_ok!(svc.exists(&state, "mno2")));
    assert!(!assert_ok!(svc.exists(&state, "mno4")));
}

#[test]
fn seed_uses_configured_records() {
    let config = RegistryConfig {
        service_id: "operators".into(),
        seed: vec![SeedRecord {
            mno_id: "vodafone".into(),
            mno_name: "Vodafone".into(),
            endpoint: "https://vodafone.example/mno".into(),
        }],
    };
    let svc = assert_ok!(MnoRegistryService::new(config));
    let mut state = MemoryState::new();
    assert_ok!(svc.seed(&mut state));

    assert_eq!(svc.id(), "operators");
    assert_eq!(assert_ok!(svc.read(&state, "vodafone")).name(), "Vodafone");
    assert_eq!(state.len(), 1);
}

proptest! {
    #[test]
    fn list_all_follows_id_byte_order_whatever_the_creation_order(
        created in prop::collection::btree_set("\\PC{1,12}", 1..24)
            .prop_map(|set| set.into_iter().collect::<Vec<String>>())
            .prop_shuffle()
    ) {
        let svc = service();
        let mut state = MemoryState::new();
        for id in &created {
            svc.create(&mut state, id, "n", "e").unwrap();
        }

        let mut expected: Vec<&str> = created.iter().map(String::as_str).collect();
        expected.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));

        let records = svc.list_all(&state).unwrap();
        prop_assert_eq!(ids(&records), expected);
        prop_assert_eq!(state.open_scans(), 0);
    }
}

// --- Dispatch through the method table ---

#[test]
fn method_table_exposes_versioned_methods_with_intents() {
    let svc = service();
    assert_eq!(
        svc.method_names().collect::<Vec<_>>(),
        vec![
            "create@v1",
            "delete@v1",
            "exists@v1",
            "listAll@v1",
            "read@v1",
            "seed@v1",
            "update@v1"
        ]
    );
    for submit in [methods::SEED, methods::CREATE, methods::UPDATE, methods::DELETE] {
        assert_eq!(svc.method_intent(submit), Some(MethodIntent::Submit), "{submit}");
    }
    for evaluate in [methods::READ, methods::EXISTS, methods::LIST_ALL] {
        assert_eq!(svc.method_intent(evaluate), Some(MethodIntent::Evaluate), "{evaluate}");
    }
    assert_eq!(svc.method_intent("create"), None);
    assert_eq!(svc.abi_version(), 1);
}

#[test]
fn dispatched_calls_return_canonical_json() {
    let svc = service();
    let mut state = MemoryState::new();

    let created = assert_ok!(svc.handle_service_call(
        &mut state,
        methods::CREATE,
        &TestFixtures::mno_params("a", "n", "e"),
    ));
    assert_bytes_eq!(created, br#"{"endpoint":"e","mnoId":"a","mnoName":"n"}"#);

    let read = assert_ok!(svc.handle_service_call(&mut state, methods::READ, &TestFixtures::id_params("a")));
    assert_eq!(read, created);

    let exists = assert_ok!(svc.handle_service_call(&mut state, methods::EXISTS, &TestFixtures::id_params("a")));
    assert_bytes_eq!(exists, b"true");
    let missing = assert_ok!(svc.handle_service_call(&mut state, methods::EXISTS, &TestFixtures::id_params("z")));
    assert_bytes_eq!(missing, b"false");

    let listed = assert_ok!(svc.handle_service_call(&mut state, methods::LIST_ALL, b""));
    assert_bytes_eq!(listed, br#"[{"endpoint":"e","mnoId":"a","mnoName":"n"}]"#);

    let deleted = assert_ok!(svc.handle_service_call(&mut state, methods::DELETE, &TestFixtures::id_params("a")));
    assert!(deleted.is_empty());
    assert!(state.is_empty());
}

#[test]
fn seed_accepts_empty_or_empty_object_params() {
    let svc = service();

    let mut state = MemoryState::new();
    assert!(assert_ok!(svc.handle_service_call(&mut state, methods::SEED, b"")).is_empty());
    assert_eq!(state.len(), 6);

    let mut state = MemoryState::new();
    assert_ok!(svc.handle_service_call(&mut state, methods::SEED, b"{}"));
    assert_eq!(state.len(), 6);

    let mut state = MemoryState::new();
    assert_err_code!(
        svc.handle_service_call(&mut state, methods::SEED, br#"{"force":true}"#),
        "TX_DESERIALIZATION_ERROR"
    );
    assert!(state.is_empty());
}

#[test]
fn malformed_params_are_rejected_before_touching_the_ledger() {
    let svc = service();
    let mut state = MemoryState::new();

    for bad in [
        &b"not json"[..],
        br#"{"mnoId":"a"}"#,
        br#"{"mnoId":"a","mnoName":"n","endpoint":"e","extra":1}"#,
        br#"["a","n","e"]"#,
    ] {
        let err = assert_err!(svc.handle_service_call(&mut state, methods::CREATE, bad));
        assert_eq!(err.code(), "TX_DESERIALIZATION_ERROR");
    }
    assert!(state.is_empty());
}

#[test]
fn registry_errors_keep_their_code_through_dispatch() {
    let svc = service();
    let mut state = MemoryState::new();
    let params = TestFixtures::mno_params("a", "n", "e");
    assert_ok!(svc.handle_service_call(&mut state, methods::CREATE, &params));

    let err = assert_err_code!(
        svc.handle_service_call(&mut state, methods::CREATE, &params),
        "MNO_ALREADY_EXIST"
    );
    assert_eq!(err.to_string(), "Mno a already exists");
    assert_err_code!(
        svc.handle_service_call(&mut state, methods::UPDATE, &TestFixtures::mno_params("b", "n", "e")),
        "MNO_NOT_FOUND"
    );
}

#[test]
fn unknown_methods_are_unsupported() {
    let svc = service();
    let mut state = MemoryState::new();
    assert_err_code!(
        svc.handle_service_call(&mut state, "create@v2", b"{}"),
        "TX_UNSUPPORTED"
    );
}

#[test]
fn as_any_downcasts_to_the_concrete_service() {
    let svc = service();
    let as_dyn: &dyn LedgerService = &svc;
    assert!(as_dyn.as_any().downcast_ref::<MnoRegistryService>().is_some());
}
