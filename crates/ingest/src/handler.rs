use crate::error::IngestError;
use crate::gate::ResourceGate;
use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::tracing;
use model::config::IngestConfig;
use model::{FhirRecord, RECORD_ID, RecordFields};
use std::borrow::Cow;
use std::sync::Arc;
use store::RecordStore;

/// Validates the resource type of a request and stores its body.
#[derive(Clone)]
pub struct IngestHandler {
    gate: ResourceGate,
    store: Arc<dyn RecordStore>,
}

impl IngestHandler {
    pub fn new(gate: ResourceGate, store: Arc<dyn RecordStore>) -> Self {
        IngestHandler { gate, store }
    }

    pub fn from_config(config: &IngestConfig, store: Arc<dyn RecordStore>) -> Self {
        Self::new(ResourceGate::from_config(config), store)
    }

    pub fn gate(&self) -> &ResourceGate {
        &self.gate
    }

    /// Run a proxy request through the gate and, if accepted, store its body.
    pub async fn handle(&self, request: &ApiGatewayProxyRequest) -> Result<FhirRecord, IngestError> {
        let resource: &str = resource_name(request.path.as_deref().unwrap_or_default());

        if resource.is_empty() {
            tracing::info!("No resource specified");

            return Err(IngestError::EmptyResource);
        }

        tracing::info!(resource, method = %request.http_method, "Received request");

        if !self.gate.accepts(resource) {
            tracing::info!(resource, "Invalid resource type");

            return Err(IngestError::UnsupportedResource(resource.to_string()));
        }

        let body: Cow<'_, [u8]> = decode_body(request).inspect_err(|err| {
            tracing::info!(error = %err, "Malformed request body");
        })?;

        self.write(&body).await
    }

    /// Parse a JSON object body, give it a fresh id and store it.
    pub async fn write(&self, raw_body: &[u8]) -> Result<FhirRecord, IngestError> {
        tracing::debug!(body = %String::from_utf8_lossy(raw_body), "Received body");

        let fields: RecordFields = serde_json::from_slice(raw_body).inspect_err(|err| {
            tracing::info!(error = %err, "Malformed request body");
        })?;

        if fields.contains_key(RECORD_ID) {
            tracing::warn!("Replacing id supplied in request body");
        }

        let record: FhirRecord = FhirRecord::generate(fields);

        self.store.put_record(&record).await.inspect_err(|err| {
            tracing::error!(error = %err, "Failed to write record");
        })?;

        tracing::info!(record_id = record.id(), "Wrote record");

        Ok(record)
    }
}

/// First segment of the request path, without leading slashes.
pub fn resource_name(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

fn decode_body(request: &ApiGatewayProxyRequest) -> Result<Cow<'_, [u8]>, IngestError> {
    let body: &str = request.body.as_deref().unwrap_or_default();

    if request.is_base64_encoded {
        Ok(Cow::Owned(STANDARD.decode(body)?))
    } else {
        Ok(Cow::Borrowed(body.as_bytes()))
    }
}
