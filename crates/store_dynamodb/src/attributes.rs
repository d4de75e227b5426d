//! Conversion from JSON records into DynamoDB attribute maps.
//!
//! JSON values map onto attributes as follows:
//! string -> `S`, number -> `N`, bool -> `BOOL`, null -> `NULL`,
//! array -> `L`, object -> `M`.

use aws_sdk_dynamodb::types::AttributeValue;
use model::FhirRecord;
use std::collections::HashMap;

pub type Item = HashMap<String, AttributeValue>;

pub(crate) fn to_item(record: &FhirRecord) -> Result<Item, serde_dynamo::Error> {
    serde_dynamo::to_item(record)
}
