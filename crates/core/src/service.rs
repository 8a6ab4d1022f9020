//! Patient service.
//!
//! Every operation is a single read-modify-write over the whole store: load through the
//! repository, act in memory, and save again for mutations. All validation happens
//! before the save, so a failed operation never writes.
//!
//! Operations on one service (and its clones) are serialised by a shared lock. This
//! prevents lost updates between concurrent requests that share a data file through
//! the same service. Separate processes writing the same file are not coordinated.

use crate::config::CoreConfig;
use crate::patient::{NewPatient, PatientRecord, PatientUpdate};
use crate::repository::{JsonFileRepository, PatientRepository};
use crate::sort::{SortField, SortOrder};
use crate::store::PatientStore;
use crate::{PatientError, PatientResult};
use std::sync::{Arc, Mutex, MutexGuard};

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    repository: Arc<dyn PatientRepository>,
    lock: Arc<Mutex<()>>,
}

impl PatientService {
    /// Creates a service over the given persistence port.
    pub fn new(repository: Arc<dyn PatientRepository>) -> Self {
        Self {
            repository,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a service backed by the JSON data file named in `cfg`.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(Arc::new(JsonFileRepository::new(cfg.patient_data_file())))
    }

    fn exclusive(&self) -> PatientResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| PatientError::LockPoisoned)
    }

    /// Validates and stores a new patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - any attribute is invalid (`Validation`),
    /// - the id is already in use (`DuplicateKey`),
    /// - the store cannot be loaded or saved.
    pub fn create(&self, new_patient: NewPatient) -> PatientResult<PatientRecord> {
        let record = new_patient.into_record()?;

        let _guard = self.exclusive()?;
        let mut store = self.repository.load()?;
        store.insert(record.clone())?;
        self.repository.save(&store)?;

        tracing::info!(
            "created patient {} (bmi {:.2}, {})",
            record.id(),
            record.bmi(),
            record.verdict()
        );
        Ok(record)
    }

    /// Returns every patient in stored order.
    pub fn get_all(&self) -> PatientResult<PatientStore> {
        let _guard = self.exclusive()?;
        self.repository.load()
    }

    /// Returns one patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no patient has this id.
    pub fn get_one(&self, id: &str) -> PatientResult<PatientRecord> {
        let _guard = self.exclusive()?;
        let store = self.repository.load()?;
        store.get(id).cloned()
    }

    /// Merges `update` into an existing patient and recomputes the derived fields.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - no patient has this id (`NotFound`),
    /// - the merged attributes are invalid (`Validation`),
    /// - the store cannot be loaded or saved.
    pub fn update(&self, id: &str, update: PatientUpdate) -> PatientResult<PatientRecord> {
        let _guard = self.exclusive()?;
        let mut store = self.repository.load()?;

        let updated = update.apply_to(store.get(id)?)?;
        store.replace(updated.clone())?;
        self.repository.save(&store)?;

        if update.changes_measurements() {
            tracing::info!(
                "updated patient {} (bmi {:.2}, {})",
                updated.id(),
                updated.bmi(),
                updated.verdict()
            );
        } else {
            tracing::info!("updated patient {}", updated.id());
        }
        Ok(updated)
    }

    /// Removes a patient and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no patient has this id.
    pub fn delete(&self, id: &str) -> PatientResult<PatientRecord> {
        let _guard = self.exclusive()?;
        let mut store = self.repository.load()?;
        let removed = store.remove(id)?;
        self.repository.save(&store)?;

        tracing::info!("deleted patient {}", removed.id());
        Ok(removed)
    }

    /// Returns every patient ordered by `field` (`height`, `weight` or `bmi`).
    ///
    /// `order` is `asc` or `desc`. Records with equal values keep their stored order.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidField` or `PatientError::InvalidOrder` before any
    /// storage access if either argument is not recognised.
    pub fn sort(&self, field: &str, order: &str) -> PatientResult<Vec<PatientRecord>> {
        let field: SortField = field.parse()?;
        let order: SortOrder = order.parse()?;

        let _guard = self.exclusive()?;
        let store = self.repository.load()?;
        Ok(store.sorted(field, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::Verdict;
    use crate::repository::InMemoryRepository;
    use std::fs;
    use std::path::Path;
    use std::thread;
    use tempfile::TempDir;

    fn new_patient(id: &str, height: f64, weight: f64) -> NewPatient {
        NewPatient {
            id: id.into(),
            name: "Binay".into(),
            city: "Mumbai".into(),
            age: 45,
            gender: "male".into(),
            height,
            weight,
        }
    }

    fn in_memory() -> (PatientService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (PatientService::new(repo.clone()), repo)
    }

    fn file_service(path: &Path) -> PatientService {
        let cfg = CoreConfig::new(path.to_path_buf()).expect("CoreConfig::new should succeed");
        PatientService::from_config(&cfg)
    }

    #[test]
    fn create_then_get_one_round_trips() {
        let (service, _repo) = in_memory();

        let created = service
            .create(new_patient("P002", 1.80, 95.0))
            .expect("create should succeed");
        let fetched = service.get_one("P002").expect("get_one should succeed");

        assert_eq!(fetched, created);
        assert!((fetched.bmi() - 29.32).abs() < 0.005);
        assert_eq!(fetched.verdict(), Verdict::Overweight);
    }

    #[test]
    fn duplicate_create_fails_without_saving() {
        let (service, repo) = in_memory();
        service.create(new_patient("P001", 1.70, 60.0)).unwrap();
        let before = service.get_all().unwrap();

        let err = service
            .create(new_patient("P001", 1.50, 80.0))
            .expect_err("duplicate create should fail");

        assert!(matches!(err, PatientError::DuplicateKey(id) if id == "P001"));
        assert_eq!(service.get_all().unwrap(), before);
        assert_eq!(repo.save_count().unwrap(), 1);
    }

    #[test]
    fn invalid_create_fails_without_saving() {
        let (service, repo) = in_memory();
        let err = service
            .create(new_patient("P001", -1.70, 60.0))
            .expect_err("negative height should fail");

        assert!(matches!(
            err,
            PatientError::Validation {
                field: "height",
                ..
            }
        ));
        assert_eq!(repo.save_count().unwrap(), 0);
    }

    #[test]
    fn id_with_surrounding_whitespace_is_rejected() {
        let (service, repo) = in_memory();
        let err = service
            .create(new_patient(" P7 ", 1.70, 60.0))
            .expect_err("padded id should fail");

        assert!(matches!(err, PatientError::Validation { field: "id", .. }));
        assert_eq!(repo.save_count().unwrap(), 0);

        service.create(new_patient("P7", 1.70, 60.0)).unwrap();
        assert!(matches!(
            service.get_one(" P7 "),
            Err(PatientError::NotFound { .. })
        ));
        assert!(service.get_one("P7").is_ok());
    }

    #[test]
    fn get_one_missing_is_not_found() {
        let (service, _repo) = in_memory();
        assert!(matches!(
            service.get_one("P404"),
            Err(PatientError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_missing_fails_and_leaves_store_unchanged() {
        let (service, repo) = in_memory();
        service.create(new_patient("P001", 1.70, 60.0)).unwrap();
        let before = service.get_all().unwrap();

        let err = service.delete("P999").expect_err("delete should fail");
        assert!(matches!(err, PatientError::NotFound { ref id, .. } if id == "P999"));
        assert_eq!(service.get_all().unwrap(), before);
        assert_eq!(repo.save_count().unwrap(), 1);
    }

    #[test]
    fn delete_removes_record() {
        let (service, _repo) = in_memory();
        service.create(new_patient("P001", 1.70, 60.0)).unwrap();
        service.create(new_patient("P002", 1.75, 65.0)).unwrap();

        let removed = service.delete("P001").expect("delete should succeed");
        assert_eq!(removed.id().as_str(), "P001");
        assert_eq!(service.get_all().unwrap().ids(), vec!["P002"]);
    }

    #[test]
    fn update_height_recomputes_bmi_and_verdict() {
        let (service, _repo) = in_memory();
        let created = service.create(new_patient("P001", 1.80, 70.0)).unwrap();
        assert_eq!(created.verdict(), Verdict::Normal);

        let updated = service
            .update(
                "P001",
                PatientUpdate {
                    height: Some(1.50),
                    ..Default::default()
                },
            )
            .expect("update should succeed");

        assert_eq!(updated.bmi(), 70.0 / (1.50 * 1.50));
        assert_eq!(updated.verdict(), Verdict::Obese);
        assert_eq!(service.get_one("P001").unwrap(), updated);
    }

    #[test]
    fn update_city_leaves_bmi_unchanged() {
        let (service, _repo) = in_memory();
        let created = service.create(new_patient("P001", 1.80, 70.0)).unwrap();

        let updated = service
            .update(
                "P001",
                PatientUpdate {
                    city: Some("Kolkata".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.details().city(), "Kolkata");
        assert_eq!(updated.bmi(), created.bmi());
        assert_eq!(updated.verdict(), created.verdict());
    }

    #[test]
    fn invalid_update_leaves_store_unchanged() {
        let (service, repo) = in_memory();
        service.create(new_patient("P001", 1.80, 70.0)).unwrap();
        let before = service.get_all().unwrap();

        let err = service
            .update(
                "P001",
                PatientUpdate {
                    age: Some(150),
                    ..Default::default()
                },
            )
            .expect_err("age out of range should fail");

        assert!(matches!(err, PatientError::Validation { field: "age", .. }));
        assert_eq!(service.get_all().unwrap(), before);
        assert_eq!(repo.save_count().unwrap(), 1);
    }

    #[test]
    fn update_missing_is_not_found() {
        let (service, _repo) = in_memory();
        assert!(matches!(
            service.update("P404", PatientUpdate::default()),
            Err(PatientError::NotFound { .. })
        ));
    }

    #[test]
    fn sort_orders_and_rejects_unknown_arguments() {
        let (service, _repo) = in_memory();
        service.create(new_patient("P001", 1.70, 80.0)).unwrap();
        service.create(new_patient("P002", 1.60, 50.0)).unwrap();
        service.create(new_patient("P003", 1.90, 65.0)).unwrap();

        let ids = |records: Vec<PatientRecord>| -> Vec<String> {
            records.iter().map(|r| r.id().to_string()).collect()
        };

        assert_eq!(
            ids(service.sort("weight", "asc").unwrap()),
            vec!["P002", "P003", "P001"]
        );
        assert_eq!(
            ids(service.sort("weight", "desc").unwrap()),
            vec!["P001", "P003", "P002"]
        );
        assert!(matches!(
            service.sort("invalid_field", "asc"),
            Err(PatientError::InvalidField(_))
        ));
        assert!(matches!(
            service.sort("bmi", "sideways"),
            Err(PatientError::InvalidOrder(_))
        ));
    }

    #[test]
    fn file_backed_service_persists_between_instances() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("patients.json");

        file_service(&path)
            .create(new_patient("P001", 1.65, 55.0))
            .expect("create should succeed");

        let reopened = file_service(&path);
        let record = reopened.get_one("P001").expect("get_one should succeed");
        assert_eq!(record.details().weight(), 55.0);

        let contents = fs::read_to_string(&path).expect("should read data file");
        assert!(contents.contains("\"P001\""));
        assert!(contents.contains("\"verdict\": \"Normal\""));
    }

    #[test]
    fn concurrent_creates_are_not_lost() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = file_service(&temp_dir.path().join("patients.json"));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                thread::spawn(move || service.create(new_patient(&format!("P{i:03}"), 1.70, 65.0)))
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .expect("thread should not panic")
                .expect("create should succeed");
        }

        assert_eq!(service.get_all().unwrap().len(), 8);
    }
}
