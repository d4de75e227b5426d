use store::StoreError;
use thiserror::Error;

pub const EMPTY_RESOURCE_BODY: &str = "Error: no FHIR resource specified in path (e.g. /Patient)\n";
pub const MALFORMED_BODY_BODY: &str = "Error: request body must be a JSON object\n";
pub const UNSUPPORTED_RESOURCE_BODY: &str = "Error: invalid or unsupported FHIR resource\n";
pub const WRITE_FAILED_BODY: &str = "Error";

/// Reasons a request is not stored.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no FHIR resource specified in path")]
    EmptyResource,

    #[error("unsupported FHIR resource: {0}")]
    UnsupportedResource(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IngestError {
    pub fn status_code(&self) -> u16 {
        match self {
            IngestError::EmptyResource | IngestError::MalformedBody(_) => 400,
            IngestError::UnsupportedResource(_) => 405,
            IngestError::Store(_) => 500,
        }
    }

    /// Text returned to the caller. Storage details are never included.
    pub fn response_body(&self) -> &'static str {
        match self {
            IngestError::EmptyResource => EMPTY_RESOURCE_BODY,
            IngestError::MalformedBody(_) => MALFORMED_BODY_BODY,
            IngestError::UnsupportedResource(_) => UNSUPPORTED_RESOURCE_BODY,
            IngestError::Store(_) => WRITE_FAILED_BODY,
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::MalformedBody(err.to_string())
    }
}

impl From<base64::DecodeError> for IngestError {
    fn from(err: base64::DecodeError) -> Self {
        IngestError::MalformedBody(err.to_string())
    }
}
