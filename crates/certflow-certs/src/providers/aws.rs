//! Shared helpers for the AWS SDK clients

use aws_sdk_acm::error::SdkError;

/// Extract readable error information from an AWS SDK error
///
/// ACM and Route 53 share the same smithy `SdkError`, so one extractor
/// serves both clients.
pub(crate) fn sdk_error_details<E, R>(e: &SdkError<E, R>) -> String
where
    E: std::fmt::Display + std::fmt::Debug,
    R: std::fmt::Debug,
{
    match e {
        SdkError::ServiceError(service_err) => format!("{}", service_err.err()),
        SdkError::TimeoutError(_) => "Request timed out".to_string(),
        SdkError::DispatchFailure(dispatch_err) => {
            if dispatch_err.is_io() {
                "Network error: unable to reach the AWS endpoint".to_string()
            } else if dispatch_err.is_timeout() {
                "Connection timed out".to_string()
            } else if dispatch_err.is_user() {
                format!("Configuration error: {:?}", dispatch_err)
            } else {
                format!("Connection failed: {:?}", dispatch_err)
            }
        }
        SdkError::ConstructionFailure(_) => "Invalid request configuration".to_string(),
        SdkError::ResponseError(resp_err) => {
            format!("Unexpected response from AWS: {:?}", resp_err)
        }
        _ => format!("{:?}", e),
    }
}

/// Route 53 returns zone IDs as `/hostedzone/<id>`
pub(crate) fn strip_zone_prefix(id: &str) -> String {
    id.trim_start_matches("/hostedzone/").to_string()
}
