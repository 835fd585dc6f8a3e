//! Certificate models returned to callers

use serde::{Deserialize, Serialize};

use crate::providers::{CertificateDetail, ValidationMethod};

/// DNS record proving domain control for a DNS-validated certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Domain of the hosted zone that owns the record
    pub hosted_domain_name: String,
    pub name: String,
    pub value: String,
    pub record_type: String,
    pub ttl: Option<i64>,
}

/// Snapshot of a certificate as currently known to ACM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub arn: String,
    pub domain_name: String,
    /// Region segment of the ARN
    pub region: Option<String>,
    pub certificate_type: String,
    pub status: String,
    pub failure_reason: Option<String>,
    pub validation_method: Option<ValidationMethod>,
    /// Present only for DNS validation
    pub validation_record_set: Option<RecordSet>,
}

impl Certificate {
    /// Build a certificate from describe output, looking only at the first
    /// domain validation option.
    pub fn from_detail(arn: &str, detail: CertificateDetail) -> Self {
        let first = detail.domain_validations.into_iter().next();
        let validation_method = first.as_ref().and_then(|dv| dv.validation_method);

        let validation_record_set = match (validation_method, first) {
            (Some(ValidationMethod::Dns), Some(dv)) => dv.resource_record.map(|rr| RecordSet {
                hosted_domain_name: dv.validation_domain.unwrap_or_default(),
                name: rr.name,
                value: rr.value,
                record_type: rr.record_type,
                ttl: None,
            }),
            _ => None,
        };

        Self {
            arn: arn.to_string(),
            domain_name: detail.domain_name,
            region: region_from_arn(arn),
            certificate_type: detail.certificate_type,
            status: detail.status,
            failure_reason: detail.failure_reason,
            validation_method,
            validation_record_set,
        }
    }
}

/// Parameters of a certificate issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCertificateRequest {
    pub validation_method: ValidationMethod,
    /// Fully-qualified domain to certify
    pub target_domain: String,
    /// Public hosted zone that receives the validation record
    pub hosted_domain: String,
}

/// Outcome of a successful issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCertificateResult {
    pub certificate_arn: String,
    pub domain_name: String,
    pub hosted_domain_name: String,
    pub validation_method: ValidationMethod,
    pub hosted_zone_id: Option<String>,
    pub validation_record_name: Option<String>,
    pub validation_record_value: Option<String>,
}

/// Region segment of an ARN (`arn:partition:service:region:account:resource`)
pub fn region_from_arn(arn: &str) -> Option<String> {
    let mut parts = arn.splitn(6, ':');
    if parts.next() != Some("arn") {
        return None;
    }

    parts
        .nth(2)
        .filter(|region| !region.is_empty())
        .map(str::to_string)
}
