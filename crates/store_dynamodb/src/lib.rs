use crate::attributes::Item;
use async_trait::async_trait;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use lambda_runtime::tracing;
use model::{FhirRecord, RECORD_ID};
use store::StoreErrorReason::{AlreadyExists, BackendFailure, BadRecord};
use store::StoreOperation::{ConvertRecord, PutRecord};
use store::{RecordStore, StoreError};

pub mod attributes;

/// Writes each record as a new item in a single DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoDbRecordStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoDbRecordStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Insert only: the put is rejected if an item with the same id exists.
    async fn put_item(
        &self,
        item: Item,
    ) -> Result<PutItemOutput, SdkError<PutItemError, HttpResponse>> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", RECORD_ID)
            .send()
            .await
    }
}

#[async_trait]
impl RecordStore for DynamoDbRecordStore {
    async fn put_record(&self, record: &FhirRecord) -> Result<(), StoreError> {
        let item: Item = attributes::to_item(record).map_err(|err| {
            StoreError::new(record.id().to_string(), ConvertRecord, BadRecord(err.to_string()))
        })?;

        tracing::debug!(
            table_name = self.table_name.as_str(),
            record_id = record.id(),
            attributes = item.len(),
            "Putting item"
        );

        self.put_item(item).await.map_err(|err| {
            let conflict: bool = err
                .as_service_error()
                .is_some_and(PutItemError::is_conditional_check_failed_exception);

            let reason = if conflict {
                AlreadyExists
            } else {
                BackendFailure(err.into())
            };

            StoreError::new(record.id().to_string(), PutRecord, reason)
        })?;

        Ok(())
    }
}
