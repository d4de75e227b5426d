/// Environment variable naming the destination DynamoDB table
pub const TABLE_NAME: &str = "TABLE_NAME";
/// Optional comma separated list of accepted FHIR resource types
pub const ACCEPTED_RESOURCES: &str = "FHIR_ACCEPTED_RESOURCES";
