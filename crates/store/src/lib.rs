use ::model::Error;
use async_trait::async_trait;
use model::FhirRecord;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Persist accepted FHIR records.
///
/// Implementations own the conversion from JSON into their native
/// representation, so the handler never sees storage specific types.
/// Every call creates exactly one new entry; nothing is read or updated.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_record(&self, record: &FhirRecord) -> Result<(), StoreError>;
}

/// Errors arising from writing a record.
#[derive(Debug, Error)]
#[error("{operation} failed for record {record_id}: {reason}")]
pub struct StoreError {
    pub record_id: String,

    pub operation: StoreOperation,
    #[source]
    pub reason: StoreErrorReason,
}

#[derive(Debug, Error)]
pub enum StoreErrorReason {
    // The record couldn't be converted into the storage representation
    #[error("bad record: {0}")]
    BadRecord(String),
    // An entry with the same id is already stored
    #[error("record already exists")]
    AlreadyExists,
    // An error from the underlying store
    #[error("backend failure: {0}")]
    BackendFailure(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    ConvertRecord,
    PutRecord,
}

impl Display for StoreOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreOperation::ConvertRecord => f.write_str("ConvertRecord"),
            StoreOperation::PutRecord => f.write_str("PutRecord"),
        }
    }
}

impl StoreError {
    pub fn new(record_id: String, operation: StoreOperation, reason: StoreErrorReason) -> Self {
        StoreError {
            record_id,
            operation,
            reason,
        }
    }
}
