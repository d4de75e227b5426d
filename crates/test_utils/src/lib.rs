use async_trait::async_trait;
use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
use aws_smithy_mocks::{Rule, mock, mock_client};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use model::FhirRecord;
use model::config::IngestConfig;
use store::StoreErrorReason::BackendFailure;
use store::StoreOperation::PutRecord;
use store::{RecordStore, StoreError};

/// Test table name
pub const TEST_TABLE: &str = "fhir-records";

/// Create a proxy request for a path with a plain text body
pub fn proxy_request(path: &str, body: Option<&str>) -> ApiGatewayProxyRequest {
    ApiGatewayProxyRequest {
        path: Some(path.to_string()),
        body: body.map(str::to_string),
        ..Default::default()
    }
}

/// Create a proxy request whose body is base64 encoded, as API Gateway does for binary media
pub fn base64_proxy_request(path: &str, body: &str) -> ApiGatewayProxyRequest {
    ApiGatewayProxyRequest {
        path: Some(path.to_string()),
        body: Some(STANDARD.encode(body)),
        is_base64_encoded: true,
        ..Default::default()
    }
}

/// Configuration pointing at the test table with the default allow-list
pub fn test_config() -> IngestConfig {
    IngestConfig {
        table_name: TEST_TABLE.to_string(),
        accepted_resources: None,
    }
}

/// A default mock DynamoDB client which accepts every put
pub fn create_mock_dynamodb_client() -> aws_sdk_dynamodb::Client {
    let put_item_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|_| true)
        .sequence()
        .output(|| PutItemOutput::builder().build())
        .repeatedly()
        .build();

    mock_client!(aws_sdk_dynamodb, [&put_item_rule])
}

/// A put rule which fails as if the table were missing.
/// The error is not retryable, so each put reaches the rule once.
pub fn create_failing_dynamodb_rule() -> Rule {
    mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
        PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder()
                .message("Requested resource not found")
                .build(),
        )
    })
}

/// A store where every write fails, for exercising the failure path
#[derive(Debug, Default, Clone)]
pub struct FailingRecordStore;

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn put_record(&self, record: &FhirRecord) -> Result<(), StoreError> {
        Err(StoreError::new(
            record.id().to_string(),
            PutRecord,
            BackendFailure("store unavailable".into()),
        ))
    }
}
