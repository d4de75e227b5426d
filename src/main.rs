use aws_config::BehaviorVersion;
use ingest::handle_proxy_request;
use ingest::handler::IngestHandler;
use lambda_runtime::{service_fn, tracing};
use model::Error;
use model::config::IngestConfig;
use std::sync::Arc;
use store_dynamodb::DynamoDbRecordStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config: IngestConfig = IngestConfig::from_env()?;

    let dynamodb_client: aws_sdk_dynamodb::Client =
        aws_sdk_dynamodb::Client::new(&aws_config::load_defaults(BehaviorVersion::latest()).await);
    let store: DynamoDbRecordStore =
        DynamoDbRecordStore::new(dynamodb_client, config.table_name.clone());
    let handler: IngestHandler = IngestHandler::from_config(&config, Arc::new(store));

    tracing::info!(
        table_name = config.table_name.as_str(),
        accepted_resources = handler.gate().len(),
        "Starting FHIR ingest handler"
    );

    lambda_runtime::run(service_fn(|event| handle_proxy_request(&handler, event))).await
}
