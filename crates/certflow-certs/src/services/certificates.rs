//! Certificate directory reads

use tracing::{debug, warn};

use crate::errors::CertError;
use crate::models::Certificate;
use crate::providers::{AcmApi, CertificateSummary, DescribeCertificate, ListCertificates};

/// All certificate summaries, following pagination until exhausted
pub async fn list_certificate_summaries<A>(acm: &A) -> Result<Vec<CertificateSummary>, CertError>
where
    A: ListCertificates + ?Sized,
{
    let mut summaries = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let (page, next) = acm.list_certificates(next_token.as_deref()).await?;
        summaries.extend(page);

        match next {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    debug!("Listed {} certificate summaries", summaries.len());
    Ok(summaries)
}

/// Current details of one certificate
pub async fn get_certificate<A>(acm: &A, arn: &str) -> Result<Certificate, CertError>
where
    A: DescribeCertificate + ?Sized,
{
    let detail = acm.describe_certificate(arn).await?;
    Ok(Certificate::from_detail(arn, detail))
}

/// Every listed certificate with full details.
///
/// A certificate that cannot be described is logged and left out.
pub async fn list_certificates<A>(acm: &A) -> Result<Vec<Certificate>, CertError>
where
    A: AcmApi + ?Sized,
{
    let summaries = list_certificate_summaries(acm).await?;

    let mut certificates = Vec::with_capacity(summaries.len());
    for summary in summaries {
        match get_certificate(acm, &summary.arn).await {
            Ok(c) => certificates.push(c),
            Err(e) => {
                warn!("Skipping certificate {}: {}", summary.arn, e);
            }
        }
    }

    Ok(certificates)
}
