//! AWS Certificate Manager client
//!
//! Required IAM Policy:
//! - acm:ListCertificates
//! - acm:DescribeCertificate
//! - acm:RequestCertificate
//! - acm:DeleteCertificate

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_acm::{
    types::{self as acm_types, DomainValidationOption},
    Client,
};
use tracing::debug;

use super::aws::sdk_error_details;
use super::traits::{
    CertificateDetail, CertificateRequest, CertificateSummary, DeleteCertificate,
    DescribeCertificate, DomainValidation, ListCertificates, RequestCertificate, ValidationMethod,
    ValidationRecord,
};
use crate::errors::CertError;

/// ACM client bound to one region
#[derive(Debug, Clone)]
pub struct AcmClient {
    client: Client,
    region: Option<String>,
}

impl AcmClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
            region: config.region().map(|r| r.to_string()),
        }
    }

    /// Get the AWS region
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn to_sdk_method(method: ValidationMethod) -> acm_types::ValidationMethod {
        match method {
            ValidationMethod::Dns => acm_types::ValidationMethod::Dns,
            ValidationMethod::Email => acm_types::ValidationMethod::Email,
        }
    }

    fn from_sdk_method(method: &acm_types::ValidationMethod) -> Option<ValidationMethod> {
        match method {
            acm_types::ValidationMethod::Dns => Some(ValidationMethod::Dns),
            acm_types::ValidationMethod::Email => Some(ValidationMethod::Email),
            _ => None,
        }
    }

    fn convert_validation(dv: &acm_types::DomainValidation) -> DomainValidation {
        DomainValidation {
            domain_name: dv.domain_name().to_string(),
            validation_domain: dv.validation_domain().map(str::to_string),
            validation_method: dv.validation_method().and_then(Self::from_sdk_method),
            resource_record: dv.resource_record().map(|rr| ValidationRecord {
                name: rr.name().to_string(),
                value: rr.value().to_string(),
                record_type: rr.r#type().as_str().to_string(),
            }),
        }
    }

    fn convert_detail(arn: &str, detail: &acm_types::CertificateDetail) -> CertificateDetail {
        CertificateDetail {
            arn: detail.certificate_arn().unwrap_or(arn).to_string(),
            domain_name: detail.domain_name().unwrap_or_default().to_string(),
            status: detail
                .status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            certificate_type: detail
                .r#type()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            failure_reason: detail.failure_reason().map(|r| r.as_str().to_string()),
            domain_validations: detail
                .domain_validation_options()
                .iter()
                .map(Self::convert_validation)
                .collect(),
        }
    }
}

#[async_trait]
impl ListCertificates for AcmClient {
    async fn list_certificates(
        &self,
        next_token: Option<&str>,
    ) -> Result<(Vec<CertificateSummary>, Option<String>), CertError> {
        debug!("Listing ACM certificates (next_token: {:?})", next_token);

        let result = self
            .client
            .list_certificates()
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                CertError::Acm(format!(
                    "Failed to list certificates: {}",
                    sdk_error_details(&e)
                ))
            })?;

        let summaries = result
            .certificate_summary_list()
            .iter()
            .filter_map(|s| {
                Some(CertificateSummary {
                    arn: s.certificate_arn()?.to_string(),
                    domain_name: s.domain_name().unwrap_or_default().to_string(),
                })
            })
            .collect();

        Ok((summaries, result.next_token().map(str::to_string)))
    }
}

#[async_trait]
impl DescribeCertificate for AcmClient {
    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail, CertError> {
        debug!("Describing ACM certificate: {}", arn);

        let result = self
            .client
            .describe_certificate()
            .certificate_arn(arn)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_resource_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    CertError::CertificateNotFound(arn.to_string())
                } else {
                    CertError::Acm(format!(
                        "Failed to describe certificate: {}",
                        sdk_error_details(&e)
                    ))
                }
            })?;

        let detail = result
            .certificate()
            .ok_or_else(|| CertError::CertificateNotFound(arn.to_string()))?;

        Ok(Self::convert_detail(arn, detail))
    }
}

#[async_trait]
impl RequestCertificate for AcmClient {
    async fn request_certificate(
        &self,
        request: &CertificateRequest,
    ) -> Result<String, CertError> {
        debug!(
            "Requesting ACM certificate for {} ({} validation)",
            request.domain_name, request.validation_method
        );

        let option = DomainValidationOption::builder()
            .domain_name(&request.domain_name)
            .validation_domain(&request.validation_domain)
            .build()
            .map_err(|e| {
                CertError::Acm(format!("Failed to build domain validation option: {}", e))
            })?;

        let result = self
            .client
            .request_certificate()
            .domain_name(&request.domain_name)
            .validation_method(Self::to_sdk_method(request.validation_method))
            .domain_validation_options(option)
            .send()
            .await
            .map_err(|e| {
                CertError::Acm(format!(
                    "Failed to request certificate: {}",
                    sdk_error_details(&e)
                ))
            })?;

        result
            .certificate_arn()
            .map(str::to_string)
            .ok_or_else(|| CertError::Acm("No certificate ARN returned".to_string()))
    }
}

#[async_trait]
impl DeleteCertificate for AcmClient {
    async fn delete_certificate(&self, arn: &str) -> Result<(), CertError> {
        debug!("Deleting ACM certificate: {}", arn);

        self.client
            .delete_certificate()
            .certificate_arn(arn)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_resource_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    CertError::CertificateNotFound(arn.to_string())
                } else {
                    CertError::Acm(format!(
                        "Failed to delete certificate: {}",
                        sdk_error_details(&e)
                    ))
                }
            })?;

        Ok(())
    }
}
