//! Test repositories — mock `ProgressRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use hustle_core::error::DomainError;
use hustle_core::repository::{ProgressRecord, ProgressRepository};

/// An in-memory progress store that enforces the optimistic version check
/// and records every successful save.
#[derive(Debug, Default)]
pub struct InMemoryProgressRepository {
    records: Mutex<HashMap<String, ProgressRecord>>,
    saves: Mutex<Vec<(ProgressRecord, i64)>>,
}

impl InMemoryProgressRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with `record`. Seeding is not recorded
    /// as a save.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_record(record: ProgressRecord) -> Self {
        let repo = Self::new();
        repo.records
            .lock()
            .unwrap()
            .insert(record.phone_number.clone(), record);
        repo
    }

    /// Returns the current record for `phone_number`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn record(&self, phone_number: &str) -> Option<ProgressRecord> {
        self.records.lock().unwrap().get(phone_number).cloned()
    }

    /// Returns a snapshot of all successful saves with the expected version
    /// each was made against.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_records(&self) -> Vec<(ProgressRecord, i64)> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn load(&self, phone_number: &str) -> Result<Option<ProgressRecord>, DomainError> {
        Ok(self.records.lock().unwrap().get(phone_number).cloned())
    }

    async fn save(
        &self,
        record: &ProgressRecord,
        expected_version: i64,
    ) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        let current_version = records
            .get(&record.phone_number)
            .map_or(0, |stored| stored.version);
        if current_version != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                phone_number: record.phone_number.clone(),
                expected: expected_version,
            });
        }

        let mut stored = record.clone();
        stored.version = expected_version + 1;
        records.insert(stored.phone_number.clone(), stored.clone());
        self.saves.lock().unwrap().push((stored, expected_version));
        Ok(())
    }
}

/// A progress repository that always returns an infrastructure error. Useful
/// for testing the best-effort paths of a turn.
#[derive(Debug)]
pub struct FailingProgressRepository;

#[async_trait]
impl ProgressRepository for FailingProgressRepository {
    async fn load(&self, _phone_number: &str) -> Result<Option<ProgressRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(
        &self,
        _record: &ProgressRecord,
        _expected_version: i64,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
