//! In-memory patient store.
//!
//! A [`PatientStore`] is the whole collection of patients treated as one unit. It keeps
//! insertion order, which is also the order the data file is written in. Stores are
//! loaded fresh for each operation and dropped afterwards.

use crate::patient::PatientRecord;
use crate::sort::{sort_records, SortField, SortOrder};
use crate::{PatientError, PatientResult};
use indexmap::IndexMap;
use pmr_types::PatientId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientStore {
    records: IndexMap<PatientId, PatientRecord>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> {
        self.records.values()
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.keys().map(|id| id.to_string()).collect()
    }

    /// Adds a new record at the end of the store.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::DuplicateKey` if the id is already present; the store is
    /// left unchanged.
    pub fn insert(&mut self, record: PatientRecord) -> PatientResult<()> {
        if self.records.contains_key(record.id()) {
            return Err(PatientError::DuplicateKey(record.id().to_string()));
        }
        self.records.insert(record.id().clone(), record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> PatientResult<&PatientRecord> {
        self.records.get(id).ok_or_else(|| self.not_found(id))
    }

    /// Replaces an existing record in place, keeping its position.
    pub fn replace(&mut self, record: PatientRecord) -> PatientResult<()> {
        match self.records.get_mut(record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(self.not_found(record.id().as_str())),
        }
    }

    /// Removes a record, preserving the order of the remaining ones.
    pub fn remove(&mut self, id: &str) -> PatientResult<PatientRecord> {
        match self.records.shift_remove(id) {
            Some(record) => Ok(record),
            None => Err(self.not_found(id)),
        }
    }

    /// All records ordered by `field`, ties in insertion order.
    pub fn sorted(&self, field: SortField, order: SortOrder) -> Vec<PatientRecord> {
        let mut records: Vec<PatientRecord> = self.records.values().cloned().collect();
        sort_records(&mut records, field, order);
        records
    }

    fn not_found(&self, id: &str) -> PatientError {
        PatientError::NotFound {
            id: id.to_owned(),
            known_ids: self.ids(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{NewPatient, PatientUpdate};

    fn record(id: &str, city: &str) -> PatientRecord {
        NewPatient {
            id: id.into(),
            name: "Test".into(),
            city: city.into(),
            age: 52,
            gender: "male".into(),
            height: 1.72,
            weight: 68.0,
        }
        .into_record()
        .unwrap()
    }

    #[test]
    fn insert_rejects_duplicate_and_leaves_store_unchanged() {
        let mut store = PatientStore::new();
        store.insert(record("P001", "Mumbai")).unwrap();
        let before = store.clone();

        let err = store.insert(record("P001", "Delhi")).unwrap_err();
        assert!(matches!(err, PatientError::DuplicateKey(id) if id == "P001"));
        assert_eq!(store, before);
        assert_eq!(store.get("P001").unwrap().details().city(), "Mumbai");
    }

    #[test]
    fn get_missing_reports_known_ids() {
        let mut store = PatientStore::new();
        store.insert(record("P001", "Mumbai")).unwrap();
        store.insert(record("P002", "Pune")).unwrap();

        match store.get("P404").unwrap_err() {
            PatientError::NotFound { id, known_ids } => {
                assert_eq!(id, "P404");
                assert_eq!(known_ids, vec!["P001", "P002"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn remove_missing_leaves_store_unchanged() {
        let mut store = PatientStore::new();
        store.insert(record("P001", "Mumbai")).unwrap();
        let before = store.clone();

        assert!(matches!(
            store.remove("P999"),
            Err(PatientError::NotFound { .. })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_and_replace_preserve_order() {
        let mut store = PatientStore::new();
        for id in ["P001", "P002", "P003", "P004"] {
            store.insert(record(id, "Mumbai")).unwrap();
        }

        let updated = PatientUpdate {
            city: Some("Chennai".into()),
            ..Default::default()
        }
        .apply_to(store.get("P002").unwrap())
        .unwrap();
        store.replace(updated).unwrap();
        store.remove("P003").unwrap();

        assert_eq!(store.ids(), vec!["P001", "P002", "P004"]);
        assert_eq!(store.get("P002").unwrap().details().city(), "Chennai");
    }
}
