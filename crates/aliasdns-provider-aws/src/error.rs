//! Conversion of AWS SDK errors into collaborator errors

use aliasdns_core::ServiceError;
use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata};

/// Convert an SDK error into a [`ServiceError`] for `service`
///
/// The AWS error code is kept when the service returned one. Errors that
/// never reached the service (dispatch, timeout, construction) carry no code
/// and are rendered with their full source chain.
pub(crate) fn service_error<E>(service: &'static str, err: E) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };

    let converted = ServiceError::new(service, message);
    match err.code() {
        Some(code) => converted.with_code(code),
        None => converted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_route53::config::http::HttpResponse;
    use aws_sdk_route53::error::SdkError;
    use aws_sdk_route53::operation::change_resource_record_sets::ChangeResourceRecordSetsError;

    #[test]
    fn errors_without_metadata_keep_source_chain() {
        let err = SdkError::<ChangeResourceRecordSetsError, HttpResponse>::construction_failure(
            "hosted zone id is required",
        );

        let converted = service_error("route53", err);

        assert_eq!(converted.service, "route53");
        assert_eq!(converted.code, None);
        assert!(converted.message.contains("hosted zone id is required"));
    }
}
