//! Capability traits and domain types for the ACM and Route 53 boundaries
//!
//! Each vendor operation gets its own trait so a caller (or a test double)
//! only has to provide the calls it actually makes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CertError;

/// TTL used for validation records created during issuance
pub const VALIDATION_RECORD_TTL: i64 = 300;

/// Record type of ACM DNS validation records
pub const VALIDATION_RECORD_TYPE: &str = "CNAME";

/// How domain ownership is proven before a certificate is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationMethod {
    Dns,
    Email,
}

impl ValidationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMethod::Dns => "DNS",
            ValidationMethod::Email => "EMAIL",
        }
    }
}

impl std::fmt::Display for ValidationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMethod {
    type Err = CertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DNS" => Ok(ValidationMethod::Dns),
            "EMAIL" => Ok(ValidationMethod::Email),
            _ => Err(CertError::InvalidValidationMethod(s.to_string())),
        }
    }
}

/// Entry of the certificate listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    pub arn: String,
    pub domain_name: String,
}

/// DNS record ACM asks to be published for validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub name: String,
    pub value: String,
    pub record_type: String,
}

/// One domain validation option of a described certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainValidation {
    pub domain_name: String,
    pub validation_domain: Option<String>,
    pub validation_method: Option<ValidationMethod>,
    pub resource_record: Option<ValidationRecord>,
}

/// Describe output of a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDetail {
    pub arn: String,
    pub domain_name: String,
    pub status: String,
    pub certificate_type: String,
    pub failure_reason: Option<String>,
    pub domain_validations: Vec<DomainValidation>,
}

/// Certificate request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    pub domain_name: String,
    pub validation_method: ValidationMethod,
    pub validation_domain: String,
}

/// Route 53 hosted zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Zone ID without the `/hostedzone/` prefix
    pub id: String,
    /// Zone name as returned by Route 53, usually with a trailing dot
    pub name: String,
    pub private_zone: bool,
}

/// Existing Route 53 record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    pub name: String,
    pub record_type: String,
    pub ttl: Option<i64>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Create,
    Delete,
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeAction::Create => write!(f, "CREATE"),
            ChangeAction::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single record change, sent as a one-change batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordChange {
    pub action: ChangeAction,
    pub name: String,
    pub record_type: String,
    pub ttl: Option<i64>,
    pub values: Vec<String>,
}

#[async_trait]
pub trait ListCertificates: Send + Sync {
    /// One page of certificate summaries plus the token of the next page
    async fn list_certificates(
        &self,
        next_token: Option<&str>,
    ) -> Result<(Vec<CertificateSummary>, Option<String>), CertError>;
}

#[async_trait]
pub trait DescribeCertificate: Send + Sync {
    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail, CertError>;
}

#[async_trait]
pub trait RequestCertificate: Send + Sync {
    /// Returns the ARN of the requested certificate
    async fn request_certificate(&self, request: &CertificateRequest)
        -> Result<String, CertError>;
}

#[async_trait]
pub trait DeleteCertificate: Send + Sync {
    async fn delete_certificate(&self, arn: &str) -> Result<(), CertError>;
}

/// Every ACM operation used by the orchestrators
pub trait AcmApi: ListCertificates + DescribeCertificate + RequestCertificate + DeleteCertificate {}

impl<T> AcmApi for T where
    T: ListCertificates + DescribeCertificate + RequestCertificate + DeleteCertificate
{
}

#[async_trait]
pub trait ListHostedZones: Send + Sync {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, CertError>;
}

#[async_trait]
pub trait ListResourceRecordSets: Send + Sync {
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_record_name: &str,
        max_items: i32,
    ) -> Result<Vec<ResourceRecordSet>, CertError>;
}

#[async_trait]
pub trait ChangeResourceRecordSets: Send + Sync {
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change: &RecordChange,
    ) -> Result<(), CertError>;
}

/// Every Route 53 operation used by the orchestrators
pub trait Route53Api: ListHostedZones + ListResourceRecordSets + ChangeResourceRecordSets {}

impl<T> Route53Api for T where T: ListHostedZones + ListResourceRecordSets + ChangeResourceRecordSets {}
