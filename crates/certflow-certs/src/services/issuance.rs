//! Certificate issuance with DNS validation record provisioning
//!
//! Issuing with DNS validation runs these steps:
//!
//! 1. Request the certificate and keep its ARN
//! 2. Wait for the validation challenge to be populated
//! 3. Describe the certificate and take the first validation record
//! 4. Resolve the public hosted zone for the hosted domain
//! 5. Create the validation CNAME in that zone
//!
//! Any failure after step 1 deletes the requested certificate again, and the
//! returned [`IssueError`] reports both the failure and how the rollback went.

use std::time::Duration;

use tracing::{error, info, warn};

use super::zones::resolve_public_zone;
use crate::errors::{CertError, IssueError, RollbackOutcome};
use crate::models::{IssueCertificateRequest, IssueCertificateResult};
use crate::providers::{
    CertificateRequest, ChangeAction, ChangeResourceRecordSets, DeleteCertificate,
    DescribeCertificate, ListHostedZones, RecordChange, RequestCertificate, ValidationMethod,
    VALIDATION_RECORD_TTL, VALIDATION_RECORD_TYPE,
};

/// Delay between requesting a certificate and reading its validation record
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Issue a certificate and, for DNS validation, publish its validation record
pub async fn issue_certificate<A, R>(
    acm: &A,
    route53: &R,
    request: &IssueCertificateRequest,
    settle_delay: Duration,
) -> Result<IssueCertificateResult, IssueError>
where
    A: RequestCertificate + DescribeCertificate + DeleteCertificate + ?Sized,
    R: ListHostedZones + ChangeResourceRecordSets + ?Sized,
{
    let arn = acm
        .request_certificate(&CertificateRequest {
            domain_name: request.target_domain.clone(),
            validation_method: request.validation_method,
            validation_domain: request.hosted_domain.clone(),
        })
        .await
        .map_err(IssueError::Request)?;

    info!(
        "Requested certificate {} for {} ({} validation)",
        arn, request.target_domain, request.validation_method
    );

    let mut result = IssueCertificateResult {
        certificate_arn: arn.clone(),
        domain_name: request.target_domain.clone(),
        hosted_domain_name: request.hosted_domain.clone(),
        validation_method: request.validation_method,
        hosted_zone_id: None,
        validation_record_name: None,
        validation_record_value: None,
    };

    if request.validation_method == ValidationMethod::Email {
        return Ok(result);
    }

    // The challenge is not guaranteed to exist right after the request.
    tokio::time::sleep(settle_delay).await;

    match provision_validation_record(acm, route53, &arn, &request.hosted_domain).await {
        Ok((zone_id, name, value)) => {
            result.hosted_zone_id = Some(zone_id);
            result.validation_record_name = Some(name);
            result.validation_record_value = Some(value);
            Ok(result)
        }
        Err(cause) => Err(abort(acm, arn, cause).await),
    }
}

/// Describe, resolve the zone and create the record; returns zone ID, record
/// name and record value.
async fn provision_validation_record<A, R>(
    acm: &A,
    route53: &R,
    arn: &str,
    hosted_domain: &str,
) -> Result<(String, String, String), CertError>
where
    A: DescribeCertificate + ?Sized,
    R: ListHostedZones + ChangeResourceRecordSets + ?Sized,
{
    let detail = acm.describe_certificate(arn).await?;

    // Only the first option is considered; SAN certificates are not handled.
    let record = detail
        .domain_validations
        .into_iter()
        .next()
        .and_then(|dv| dv.resource_record)
        .ok_or_else(|| CertError::MissingValidationOptions(arn.to_string()))?;

    let zone = resolve_public_zone(route53, hosted_domain).await?;

    let change = RecordChange {
        action: ChangeAction::Create,
        name: record.name.clone(),
        record_type: VALIDATION_RECORD_TYPE.to_string(),
        ttl: Some(VALIDATION_RECORD_TTL),
        values: vec![record.value.clone()],
    };
    route53.change_resource_record_sets(&zone.id, &change).await?;

    info!(
        "Created validation record {} in zone {} for certificate {}",
        record.name, zone.id, arn
    );

    Ok((zone.id, record.name, record.value))
}

/// Delete the requested certificate and wrap the failure with the outcome
async fn abort<A>(acm: &A, arn: String, cause: CertError) -> IssueError
where
    A: DeleteCertificate + ?Sized,
{
    warn!("Issuing certificate {} failed: {}; rolling back", arn, cause);

    let rollback = match rollback_certificate(acm, &arn).await {
        Ok(()) => RollbackOutcome::Completed,
        Err(e) => {
            error!("Failed to roll back certificate {}: {}", arn, e);
            RollbackOutcome::Failed(e)
        }
    };

    IssueError::Aborted {
        arn,
        cause,
        rollback,
    }
}

/// Remove a certificate created by an unfinished issuance.
///
/// No validation record is touched: when rollback runs, none was created.
pub async fn rollback_certificate<A>(acm: &A, arn: &str) -> Result<(), CertError>
where
    A: DeleteCertificate + ?Sized,
{
    acm.delete_certificate(arn).await
}
