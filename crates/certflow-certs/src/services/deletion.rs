//! Certificate deletion with validation record cleanup

use tracing::{info, warn};

use super::certificates::get_certificate;
use super::zones::delete_validation_record;
use crate::errors::CertError;
use crate::providers::{
    ChangeResourceRecordSets, DeleteCertificate, DescribeCertificate, ListHostedZones,
    ListResourceRecordSets, ValidationMethod,
};

/// Delete a certificate, removing its DNS validation record first.
///
/// If the record cannot be removed the certificate is left in place so the
/// deletion can be retried.
pub async fn delete_certificate<A, R>(acm: &A, route53: &R, arn: &str) -> Result<(), CertError>
where
    A: DescribeCertificate + DeleteCertificate + ?Sized,
    R: ListHostedZones + ListResourceRecordSets + ChangeResourceRecordSets + ?Sized,
{
    let certificate = get_certificate(acm, arn).await?;

    if certificate.validation_method == Some(ValidationMethod::Dns) {
        match &certificate.validation_record_set {
            Some(record_set) => delete_validation_record(route53, record_set).await?,
            None => warn!(
                "Certificate {} uses DNS validation but has no validation record yet",
                arn
            ),
        }
    }

    acm.delete_certificate(arn).await?;

    info!("Deleted certificate {}", arn);
    Ok(())
}
