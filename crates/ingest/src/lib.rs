use crate::handler::IngestHandler;
use crate::response::proxy_response;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::tracing::{Instrument, Span};
use lambda_runtime::{LambdaEvent, tracing};
use model::{Error, FhirRecord};

pub mod error;
pub mod gate;
pub mod handler;
pub mod response;

pub use crate::error::IngestError;
pub use crate::gate::ResourceGate;

pub type IngestLambdaEvent = LambdaEvent<ApiGatewayProxyRequest>;

/// Handle one API Gateway proxy event, designed for use with `lambda_runtime::run()`.
///
/// Every outcome, including rejected and failed writes, is returned as a
/// response; the error path is never taken so the runtime doesn't report
/// the invocation as failed.
///
/// ```no_compile
/// let handler: IngestHandler = IngestHandler::from_config(&config, Arc::new(store));
///
/// lambda_runtime::run(service_fn(|event: IngestLambdaEvent| {
///     handle_proxy_request(&handler, event)
/// }))
/// .await
/// ```
pub async fn handle_proxy_request(
    handler: &IngestHandler,
    event: IngestLambdaEvent,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request_span: Span = tracing::span!(
        tracing::Level::INFO,
        "Ingest",
        request_id = %event.context.request_id
    );

    let result: Result<FhirRecord, IngestError> =
        handler.handle(&event.payload).instrument(request_span).await;

    Ok(proxy_response(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_mocks::{Rule, mock_client};
    use lambda_runtime::Context;
    use std::sync::Arc;
    use store_dynamodb::DynamoDbRecordStore;
    use store_in_memory::InMemoryRecordStore;
    use test_utils::{
        TEST_TABLE, create_failing_dynamodb_rule, create_mock_dynamodb_client, proxy_request,
        test_config,
    };

    fn event(path: &str, body: Option<&str>) -> IngestLambdaEvent {
        LambdaEvent::new(proxy_request(path, body), Context::default())
    }

    fn body_text(response: &ApiGatewayProxyResponse) -> String {
        match &response.body {
            Some(aws_lambda_events::encodings::Body::Text(text)) => text.clone(),
            other => panic!("Expected a text body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn patient_is_written_to_dynamodb() {
        let store: DynamoDbRecordStore =
            DynamoDbRecordStore::new(create_mock_dynamodb_client(), TEST_TABLE.to_string());
        let handler: IngestHandler = IngestHandler::from_config(&test_config(), Arc::new(store));

        let response: ApiGatewayProxyResponse =
            handle_proxy_request(&handler, event("/Patient", Some(r#"{"name":"Jane Doe"}"#)))
                .await
                .expect("Handler should always respond");

        assert_eq!(response.status_code, 200);
        assert_eq!(body_text(&response), "Success \n");
    }

    #[tokio::test]
    async fn dynamodb_failure_is_500() {
        let put_item_rule: Rule = create_failing_dynamodb_rule();
        let client: aws_sdk_dynamodb::Client =
            mock_client!(aws_sdk_dynamodb, [&put_item_rule]);
        let store: DynamoDbRecordStore = DynamoDbRecordStore::new(client, TEST_TABLE.to_string());
        let handler: IngestHandler = IngestHandler::from_config(&test_config(), Arc::new(store));

        let response: ApiGatewayProxyResponse =
            handle_proxy_request(&handler, event("/Patient", Some(r#"{"name":"Jane Doe"}"#)))
                .await
                .expect("Handler should always respond");

        assert_eq!(response.status_code, 500);
        assert_eq!(body_text(&response), "Error");
        assert_eq!(put_item_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn rejected_requests_never_reach_dynamodb() {
        let put_item_rule: Rule = create_failing_dynamodb_rule();
        let client: aws_sdk_dynamodb::Client =
            mock_client!(aws_sdk_dynamodb, [&put_item_rule]);
        let store: DynamoDbRecordStore = DynamoDbRecordStore::new(client, TEST_TABLE.to_string());
        let handler: IngestHandler = IngestHandler::from_config(&test_config(), Arc::new(store));

        for (path, body, status_code) in [
            ("/", Some(r#"{"name":"Jane Doe"}"#), 400),
            ("/Foo", Some(r#"{"name":"Jane Doe"}"#), 405),
            ("/Patient", Some("{not json"), 400),
        ] {
            let response: ApiGatewayProxyResponse =
                handle_proxy_request(&handler, event(path, body))
                    .await
                    .expect("Handler should always respond");

            assert_eq!(response.status_code, status_code, "{path}");
        }

        assert_eq!(put_item_rule.num_calls(), 0);
    }

    #[tokio::test]
    async fn responses_follow_status_table() {
        let store: InMemoryRecordStore = InMemoryRecordStore::default();
        let handler: IngestHandler =
            IngestHandler::new(ResourceGate::new(["Patient"]), Arc::new(store.clone()));

        let cases: [(&str, Option<&str>, i64, &str); 5] = [
            (
                "",
                None,
                400,
                "Error: no FHIR resource specified in path (e.g. /Patient)\n",
            ),
            (
                "/Observation",
                Some("{}"),
                405,
                "Error: invalid or unsupported FHIR resource\n",
            ),
            (
                "/Patient",
                Some("null"),
                400,
                "Error: request body must be a JSON object\n",
            ),
            ("/Patient", Some("{}"), 200, "Success \n"),
            ("/Patient/123", Some(r#"{"active":true}"#), 200, "Success \n"),
        ];

        for (path, body, status_code, text) in cases {
            let response: ApiGatewayProxyResponse =
                handle_proxy_request(&handler, event(path, body))
                    .await
                    .expect("Handler should always respond");

            assert_eq!(response.status_code, status_code, "{path}");
            assert_eq!(body_text(&response), text, "{path}");
        }

        assert_eq!(store.len(), 2);
    }
}
