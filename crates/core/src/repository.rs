//! Persistence port for the patient store.
//!
//! [`PatientService`](crate::PatientService) never touches storage directly; it loads and
//! saves whole stores through a [`PatientRepository`]. Two adapters are provided:
//!
//! - [`JsonFileRepository`] keeps the store in a single JSON data file
//! - [`InMemoryRepository`] keeps it in process memory, for tests and embedding

use crate::codec;
use crate::constants::TEMP_FILE_SUFFIX;
use crate::store::PatientStore;
use crate::{PatientError, PatientResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Loads and saves a complete [`PatientStore`].
pub trait PatientRepository: Send + Sync {
    fn load(&self) -> PatientResult<PatientStore>;

    fn save(&self, store: &PatientStore) -> PatientResult<()>;
}

/// Stores patients in a single JSON file, rewritten in full on every save.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(TEMP_FILE_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl PatientRepository for JsonFileRepository {
    /// Reads the data file. A missing file is an empty store.
    fn load(&self) -> PatientResult<PatientStore> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "patient data file {} not found, starting empty",
                    self.path.display()
                );
                return Ok(PatientStore::new());
            }
            Err(e) => return Err(PatientError::FileRead(e)),
        };

        let store = codec::decode(&contents)?;
        tracing::debug!(
            "loaded {} patients from {}",
            store.len(),
            self.path.display()
        );
        Ok(store)
    }

    /// Writes the whole store to a temporary sibling file, then renames it over the data
    /// file so readers never see a partial write.
    fn save(&self, store: &PatientStore) -> PatientResult<()> {
        let contents = codec::encode(store)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(PatientError::StorageDirCreation)?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, contents).map_err(PatientError::FileWrite)?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(PatientError::FileWrite(e));
        }

        tracing::debug!("saved {} patients to {}", store.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the store in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    inner: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    store: PatientStore,
    saves: usize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> PatientResult<usize> {
        let state = self.inner.lock().map_err(|_| PatientError::LockPoisoned)?;
        Ok(state.saves)
    }
}

impl PatientRepository for InMemoryRepository {
    fn load(&self) -> PatientResult<PatientStore> {
        let state = self.inner.lock().map_err(|_| PatientError::LockPoisoned)?;
        Ok(state.store.clone())
    }

    fn save(&self, store: &PatientStore) -> PatientResult<()> {
        let mut state = self.inner.lock().map_err(|_| PatientError::LockPoisoned)?;
        state.store = store.clone();
        state.saves += 1;
        Ok(())
    }
}
