use async_trait::async_trait;
use model::FhirRecord;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use store::StoreErrorReason::{AlreadyExists, BackendFailure};
use store::StoreOperation::PutRecord;
use store::{RecordStore, StoreError};

/// Keeps records in process, keyed by id. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<String, FhirRecord>>>,
}

impl InMemoryRecordStore {
    pub fn get(&self, id: &str) -> Option<FhirRecord> {
        self.guard().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn records(&self) -> Vec<FhirRecord> {
        self.guard().values().cloned().collect()
    }

    // Reads tolerate a poisoned lock, the map itself is never left half written
    fn guard(&self) -> MutexGuard<'_, HashMap<String, FhirRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put_record(&self, record: &FhirRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().map_err(|err| {
            StoreError::new(
                record.id().to_string(),
                PutRecord,
                BackendFailure(err.to_string().into()),
            )
        })?;

        match records.entry(record.id().to_string()) {
            Entry::Occupied(_) => Err(StoreError::new(
                record.id().to_string(),
                PutRecord,
                AlreadyExists,
            )),
            Entry::Vacant(entry) => {
                entry.insert(record.clone());

                Ok(())
            }
        }
    }
}
