use std::time::Duration;

use tracing::debug;

use crate::config::{load_sdk_config, ManagerConfig};
use crate::errors::{CertError, IssueError};
use crate::models::{Certificate, IssueCertificateRequest, IssueCertificateResult, RecordSet};
use crate::providers::{AcmApi, AcmClient, CertificateSummary, Route53Api, Route53Client};
use crate::services;

/// Certificate operations against one ACM region and its Route 53 account
pub struct CertificateManager<A = AcmClient, R = Route53Client> {
    acm: A,
    route53: R,
    region: String,
    settle_delay: Duration,
}

impl CertificateManager {
    /// Build SDK-backed clients from the given configuration
    pub async fn from_config(config: &ManagerConfig) -> Result<Self, CertError> {
        let sdk_config = load_sdk_config(config).await?;
        debug!("Loaded AWS configuration for region {}", config.region);

        Ok(Self::new(
            AcmClient::new(&sdk_config),
            Route53Client::new(&sdk_config),
            config.region.clone(),
        )
        .with_settle_delay(config.settle_delay()))
    }
}

impl<A, R> CertificateManager<A, R>
where
    A: AcmApi,
    R: Route53Api,
{
    pub fn new(acm: A, route53: R, region: impl Into<String>) -> Self {
        Self {
            acm,
            route53,
            region: region.into(),
            settle_delay: services::DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub async fn list_certificate_summaries(&self) -> Result<Vec<CertificateSummary>, CertError> {
        services::list_certificate_summaries(&self.acm).await
    }

    pub async fn list_certificates(&self) -> Result<Vec<Certificate>, CertError> {
        services::list_certificates(&self.acm).await
    }

    pub async fn get_certificate(&self, arn: &str) -> Result<Certificate, CertError> {
        services::get_certificate(&self.acm, arn).await
    }

    pub async fn issue_certificate(
        &self,
        request: &IssueCertificateRequest,
    ) -> Result<IssueCertificateResult, IssueError> {
        services::issue_certificate(&self.acm, &self.route53, request, self.settle_delay).await
    }

    pub async fn delete_certificate(&self, arn: &str) -> Result<(), CertError> {
        services::delete_certificate(&self.acm, &self.route53, arn).await
    }

    pub async fn delete_validation_record(&self, record_set: &RecordSet) -> Result<(), CertError> {
        services::delete_validation_record(&self.route53, record_set).await
    }
}
