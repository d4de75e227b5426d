use crate::error::IngestError;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::HeaderMap;
use http::header::{CONTENT_TYPE, HeaderValue};
use model::FhirRecord;

pub const SUCCESS_BODY: &str = "Success \n";

/// Map the outcome of a request to the plain text response sent back through API Gateway.
pub fn proxy_response(result: &Result<FhirRecord, IngestError>) -> ApiGatewayProxyResponse {
    match result {
        Ok(_) => text_response(200, SUCCESS_BODY),
        Err(err) => text_response(err.status_code(), err.response_body()),
    }
}

fn text_response(status_code: u16, body: &str) -> ApiGatewayProxyResponse {
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    ApiGatewayProxyResponse {
        status_code: i64::from(status_code),
        headers,
        body: Some(Body::Text(body.to_string())),
        ..Default::default()
    }
}
