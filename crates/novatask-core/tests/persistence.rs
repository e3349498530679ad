use novatask_core::persist::{FileStorage, load, save};
use novatask_core::{AppState, MemoryStorage, Priority, StateStorage, Status, Store};
use tempfile::tempdir;

#[test]
fn empty_storage_seeds_example_projects() {
    let storage = MemoryStorage::new();
    let state = load(&storage).expect("load default");

    assert_eq!(state.projects.len(), 2);
    assert_eq!(state.projects[0].id, "1");
    assert_eq!(state.projects[0].name, "Cyberpunk Redesign");
    assert_eq!(state.projects[1].name, "System Core");
    assert!(state.tasks.is_empty());
    assert_eq!(state.active_project_id.as_deref(), Some("1"));
    assert!(storage.payload().is_none());
}

#[test]
fn state_round_trips_field_for_field() {
    let mut store = Store::with_state(AppState::default(), Box::new(MemoryStorage::new()));
    let _ = store.add_task("Shader Neon", "Glow pass", Priority::High, Status::InProgress);
    let _ = store.add_project("Orbital", "Goals", None);

    let json = serde_json::to_string(store.state()).expect("serialize state");
    let back: AppState = serde_json::from_str(&json).expect("deserialize state");
    assert_eq!(&back, store.state());
}

#[test]
fn persisted_shape_uses_camel_case_keys() {
    let storage = MemoryStorage::new();
    let mut store = Store::with_state(AppState::default(), Box::new(storage.clone()));
    let _ = store.add_task("Shader Neon", "", Priority::Low, Status::InProgress);

    let raw = storage.payload().expect("payload written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(value["activeProjectId"], "1");
    assert_eq!(value["tasks"][0]["projectId"], "1");
    assert_eq!(value["tasks"][0]["status"], "in-progress");
    assert!(value["tasks"][0]["createdAt"].is_i64());
    assert_eq!(value["projects"][1]["color"], "#a855f7");
}

#[test]
fn store_reopens_what_it_wrote() {
    let storage = MemoryStorage::new();
    {
        let mut store = Store::open(Box::new(storage.clone())).expect("open fresh store");
        let _ = store.add_project("Orbital", "", None);
        let _ = store.add_task("Launch", "", Priority::Medium, Status::Todo);
    }

    let reopened = Store::open(Box::new(storage)).expect("reopen store");
    let state = reopened.state();
    assert_eq!(state.projects.len(), 3);
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(
        state.active_project_id.as_deref(),
        Some(state.projects[2].id.as_str())
    );
}

#[test]
fn malformed_blob_fails_to_load() {
    let storage = MemoryStorage::with_payload("{\"projects\": [");
    let err = Store::open(Box::new(storage)).expect_err("malformed state must not load");
    assert!(format!("{err:#}").contains("failed parsing stored state"));
}

#[test]
fn file_storage_round_trip() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("state.json");
    let mut storage = FileStorage::new(&path);

    assert!(storage.read().expect("read missing").is_none());

    let state = AppState::default();
    save(&mut storage, &state).expect("save state");
    assert!(path.exists());

    let loaded = load(&storage).expect("load state");
    assert_eq!(loaded, state);

    let mut store = Store::open(Box::new(storage.clone())).expect("open file-backed store");
    let _ = store.delete_project("1");
    let reloaded = load(&storage).expect("reload state");
    assert_eq!(reloaded.projects.len(), 1);
    assert_eq!(reloaded.active_project_id.as_deref(), Some("2"));
}
