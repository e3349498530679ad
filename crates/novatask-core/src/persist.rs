use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Context;
use tracing::{debug, info};

use crate::model::AppState;

/// Local storage key holding the serialized [`AppState`].
pub const STATE_STORAGE_KEY: &str = "nova_task_state";

/// Backing slot for the persisted JSON blob. One blob, overwritten whole.
pub trait StateStorage {
    fn read(&self) -> anyhow::Result<Option<String>>;

    fn write(&mut self, payload: &str) -> anyhow::Result<()>;
}

/// Reads the persisted state, seeding the default projects when nothing has been stored
/// yet. A stored blob that fails to parse is an error.
#[tracing::instrument(skip(storage))]
pub fn load(storage: &dyn StateStorage) -> anyhow::Result<AppState> {
    let Some(raw) = storage.read().context("failed reading stored state")? else {
        info!("no stored state; seeding default projects");
        return Ok(AppState::default());
    };

    let state: AppState = serde_json::from_str(&raw).context("failed parsing stored state")?;
    debug!(
        projects = state.projects.len(),
        tasks = state.tasks.len(),
        active = ?state.active_project_id,
        "loaded stored state"
    );
    Ok(state)
}

#[tracing::instrument(skip_all)]
pub fn save(storage: &mut dyn StateStorage, state: &AppState) -> anyhow::Result<()> {
    let payload = serde_json::to_string(state).context("failed serializing state")?;
    storage.write(&payload).context("failed writing state")?;
    debug!(bytes = payload.len(), "saved state");
    Ok(())
}

/// In-memory storage. Clones share the same slot, so a test can keep a handle after
/// boxing one into a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        let storage = Self::default();
        *storage.slot.borrow_mut() = Some(payload.into());
        storage
    }

    pub fn payload(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StateStorage for MemoryStorage {
    fn read(&self) -> anyhow::Result<Option<String>> {
        Ok(self.payload())
    }

    fn write(&mut self, payload: &str) -> anyhow::Result<()> {
        *self.slot.borrow_mut() = Some(payload.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, anyhow};
    use tempfile::NamedTempFile;
    use tracing::debug;

    use super::StateStorage;

    /// JSON file on disk, replaced atomically on every write.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl StateStorage for FileStorage {
        fn read(&self) -> anyhow::Result<Option<String>> {
            if !self.path.exists() {
                return Ok(None);
            }
            let raw = fs::read_to_string(&self.path)
                .with_context(|| format!("failed reading {}", self.path.display()))?;
            Ok(Some(raw))
        }

        #[tracing::instrument(skip(self, payload), fields(file = %self.path.display()))]
        fn write(&mut self, payload: &str) -> anyhow::Result<()> {
            let dir = self
                .path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;

            let mut temp = NamedTempFile::new_in(dir)?;
            temp.write_all(payload.as_bytes())?;
            temp.flush()?;
            temp.persist(&self.path)
                .map_err(|err| anyhow!("failed to persist {}: {}", self.path.display(), err))?;

            debug!(bytes = payload.len(), "state file replaced");
            Ok(())
        }
    }
}
