use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

pub mod config;
pub mod env;
pub mod resource_types;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Key under which the generated identifier is stored.
pub const RECORD_ID: &str = "id";

/// A FHIR resource body as received, keyed by field name.
pub type RecordFields = Map<String, Value>;

/// A resource body paired with the identifier it is stored under.
///
/// The identifier is always present in the fields as well, so the record
/// serializes to exactly the item written to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct FhirRecord {
    id: String,
    fields: RecordFields,
}

impl FhirRecord {
    /// Wrap the fields with a freshly generated v4 UUID.
    pub fn generate(fields: RecordFields) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), fields)
    }

    /// Wrap the fields with a known id, replacing any `id` already in the body.
    pub fn with_id(id: String, mut fields: RecordFields) -> Self {
        fields.insert(RECORD_ID.to_string(), Value::String(id.clone()));

        FhirRecord { id, fields }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }

    pub fn into_fields(self) -> RecordFields {
        self.fields
    }
}

impl Serialize for FhirRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
