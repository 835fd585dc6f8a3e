//! In-memory ACM and Route 53 doubles for testing

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::CertError;
use crate::providers::{
    CertificateDetail, CertificateRequest, CertificateSummary, ChangeAction,
    ChangeResourceRecordSets, DeleteCertificate, DescribeCertificate, DomainValidation, HostedZone,
    ListCertificates, ListHostedZones, ListResourceRecordSets, RecordChange, RequestCertificate,
    ResourceRecordSet, ValidationMethod, ValidationRecord,
};

/// Ordered log of mutating calls, shareable between both mocks
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Describe output for a DNS-validated certificate
pub fn dns_certificate(
    arn: &str,
    domain_name: &str,
    hosted_domain: &str,
    record_name: &str,
    record_value: &str,
) -> CertificateDetail {
    CertificateDetail {
        arn: arn.to_string(),
        domain_name: domain_name.to_string(),
        status: "ISSUED".to_string(),
        certificate_type: "AMAZON_ISSUED".to_string(),
        failure_reason: None,
        domain_validations: vec![DomainValidation {
            domain_name: domain_name.to_string(),
            validation_domain: Some(hosted_domain.to_string()),
            validation_method: Some(ValidationMethod::Dns),
            resource_record: Some(ValidationRecord {
                name: record_name.to_string(),
                value: record_value.to_string(),
                record_type: "CNAME".to_string(),
            }),
        }],
    }
}

/// Describe output for an email-validated certificate
pub fn email_certificate(arn: &str, domain_name: &str) -> CertificateDetail {
    CertificateDetail {
        arn: arn.to_string(),
        domain_name: domain_name.to_string(),
        status: "PENDING_VALIDATION".to_string(),
        certificate_type: "AMAZON_ISSUED".to_string(),
        failure_reason: None,
        domain_validations: vec![DomainValidation {
            domain_name: domain_name.to_string(),
            validation_domain: Some(domain_name.to_string()),
            validation_method: Some(ValidationMethod::Email),
            resource_record: None,
        }],
    }
}

/// Mock ACM service
#[derive(Debug, Clone)]
pub struct MockAcm {
    certificates: Arc<Mutex<BTreeMap<String, CertificateDetail>>>,
    pub list_count: Arc<AtomicUsize>,
    pub describe_count: Arc<AtomicUsize>,
    pub request_count: Arc<AtomicUsize>,
    pub delete_count: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<CertificateRequest>>>,
    pub log: CallLog,

    /// Record handed out for DNS requests; `None` leaves the options empty
    pub issued_record: Option<ValidationRecord>,
    pub should_fail_request: bool,
    pub should_fail_delete: bool,
    pub fail_describe_for: HashSet<String>,
    /// Page size of the listing; everything in one page when `None`
    pub page_size: Option<usize>,
}

impl Default for MockAcm {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAcm {
    pub fn new() -> Self {
        Self {
            certificates: Arc::new(Mutex::new(BTreeMap::new())),
            list_count: Arc::new(AtomicUsize::new(0)),
            describe_count: Arc::new(AtomicUsize::new(0)),
            request_count: Arc::new(AtomicUsize::new(0)),
            delete_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            log: new_call_log(),
            issued_record: Some(ValidationRecord {
                name: "_validation.name.test.example.com".to_string(),
                value: "_validation.value.test.example.com".to_string(),
                record_type: "CNAME".to_string(),
            }),
            should_fail_request: false,
            should_fail_delete: false,
            fail_describe_for: HashSet::new(),
            page_size: None,
        }
    }

    pub fn with_certificate(self, detail: CertificateDetail) -> Self {
        self.certificates
            .lock()
            .unwrap()
            .insert(detail.arn.clone(), detail);
        self
    }

    pub fn with_issued_record(mut self, record: Option<ValidationRecord>) -> Self {
        self.issued_record = record;
        self
    }

    pub fn with_request_failure(mut self) -> Self {
        self.should_fail_request = true;
        self
    }

    pub fn with_delete_failure(mut self) -> Self {
        self.should_fail_delete = true;
        self
    }

    pub fn with_describe_failure(mut self, arn: &str) -> Self {
        self.fail_describe_for.insert(arn.to_string());
        self
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn contains(&self, arn: &str) -> bool {
        self.certificates.lock().unwrap().contains_key(arn)
    }

    pub fn list_call_count(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }

    pub fn describe_call_count(&self) -> usize {
        self.describe_count.load(Ordering::SeqCst)
    }

    pub fn request_call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListCertificates for MockAcm {
    async fn list_certificates(
        &self,
        next_token: Option<&str>,
    ) -> Result<(Vec<CertificateSummary>, Option<String>), CertError> {
        self.list_count.fetch_add(1, Ordering::SeqCst);

        let certificates = self.certificates.lock().unwrap();
        let all: Vec<CertificateSummary> = certificates
            .values()
            .map(|c| CertificateSummary {
                arn: c.arn.clone(),
                domain_name: c.domain_name.clone(),
            })
            .collect();

        let start = next_token
            .map(|t| t.parse::<usize>().unwrap_or(0))
            .unwrap_or(0);
        let size = self.page_size.unwrap_or(all.len().max(1));
        let end = (start + size).min(all.len());
        let next = (end < all.len()).then(|| end.to_string());

        Ok((all[start.min(end)..end].to_vec(), next))
    }
}

#[async_trait]
impl DescribeCertificate for MockAcm {
    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail, CertError> {
        self.describe_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_describe_for.contains(arn) {
            return Err(CertError::Acm(format!("Mock describe failure: {}", arn)));
        }

        self.certificates
            .lock()
            .unwrap()
            .get(arn)
            .cloned()
            .ok_or_else(|| CertError::CertificateNotFound(arn.to_string()))
    }
}

#[async_trait]
impl RequestCertificate for MockAcm {
    async fn request_certificate(
        &self,
        request: &CertificateRequest,
    ) -> Result<String, CertError> {
        let n = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());

        if self.should_fail_request {
            return Err(CertError::Acm("Mock request failure".to_string()));
        }

        let arn = format!("arn:aws:acm:us-east-1:000000000000:certificate/mock-{}", n);
        let validations = match request.validation_method {
            ValidationMethod::Email => email_certificate(&arn, &request.domain_name)
                .domain_validations,
            ValidationMethod::Dns => match &self.issued_record {
                Some(record) => vec![DomainValidation {
                    domain_name: request.domain_name.clone(),
                    validation_domain: Some(request.validation_domain.clone()),
                    validation_method: Some(ValidationMethod::Dns),
                    resource_record: Some(record.clone()),
                }],
                None => vec![],
            },
        };

        self.certificates.lock().unwrap().insert(
            arn.clone(),
            CertificateDetail {
                arn: arn.clone(),
                domain_name: request.domain_name.clone(),
                status: "PENDING_VALIDATION".to_string(),
                certificate_type: "AMAZON_ISSUED".to_string(),
                failure_reason: None,
                domain_validations: validations,
            },
        );
        self.log.lock().unwrap().push(format!("acm:request:{}", arn));

        Ok(arn)
    }
}

#[async_trait]
impl DeleteCertificate for MockAcm {
    async fn delete_certificate(&self, arn: &str) -> Result<(), CertError> {
        self.delete_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_delete {
            return Err(CertError::Acm("Mock delete failure".to_string()));
        }

        self.certificates
            .lock()
            .unwrap()
            .remove(arn)
            .ok_or_else(|| CertError::CertificateNotFound(arn.to_string()))?;
        self.log.lock().unwrap().push(format!("acm:delete:{}", arn));

        Ok(())
    }
}

/// Mock Route 53 service
#[derive(Debug, Clone)]
pub struct MockRoute53 {
    zones: Vec<HostedZone>,
    /// zone id -> record name -> record set
    records: Arc<Mutex<HashMap<String, BTreeMap<String, ResourceRecordSet>>>>,
    pub changes: Arc<Mutex<Vec<(String, RecordChange)>>>,
    pub list_zones_count: Arc<AtomicUsize>,
    pub list_records_count: Arc<AtomicUsize>,
    pub change_count: Arc<AtomicUsize>,
    pub log: CallLog,

    pub should_fail_list_zones: bool,
    pub should_fail_change: bool,
}

impl Default for MockRoute53 {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRoute53 {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            records: Arc::new(Mutex::new(HashMap::new())),
            changes: Arc::new(Mutex::new(Vec::new())),
            list_zones_count: Arc::new(AtomicUsize::new(0)),
            list_records_count: Arc::new(AtomicUsize::new(0)),
            change_count: Arc::new(AtomicUsize::new(0)),
            log: new_call_log(),
            should_fail_list_zones: false,
            should_fail_change: false,
        }
    }

    /// Add a zone whose ID is the domain with dots replaced by dashes
    pub fn with_zone(mut self, domain: &str, private_zone: bool) -> Self {
        self.zones.push(HostedZone {
            id: domain.replace('.', "-"),
            name: format!("{}.", domain),
            private_zone,
        });
        self
    }

    pub fn with_record(self, zone_id: &str, record: ResourceRecordSet) -> Self {
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .insert(record.name.clone(), record);
        self
    }

    pub fn with_list_zones_failure(mut self) -> Self {
        self.should_fail_list_zones = true;
        self
    }

    pub fn with_change_failure(mut self) -> Self {
        self.should_fail_change = true;
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn record(&self, zone_id: &str, name: &str) -> Option<ResourceRecordSet> {
        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .and_then(|r| r.get(name))
            .cloned()
    }

    pub fn applied_changes(&self) -> Vec<(String, RecordChange)> {
        self.changes.lock().unwrap().clone()
    }

    pub fn list_zones_call_count(&self) -> usize {
        self.list_zones_count.load(Ordering::SeqCst)
    }

    pub fn list_records_call_count(&self) -> usize {
        self.list_records_count.load(Ordering::SeqCst)
    }

    pub fn change_call_count(&self) -> usize {
        self.change_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListHostedZones for MockRoute53 {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, CertError> {
        self.list_zones_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_list_zones {
            return Err(CertError::Route53("Mock list zones failure".to_string()));
        }

        Ok(self.zones.clone())
    }
}

#[async_trait]
impl ListResourceRecordSets for MockRoute53 {
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_record_name: &str,
        max_items: i32,
    ) -> Result<Vec<ResourceRecordSet>, CertError> {
        self.list_records_count.fetch_add(1, Ordering::SeqCst);

        let records = self.records.lock().unwrap();
        let Some(zone_records) = records.get(zone_id) else {
            return Ok(vec![]);
        };

        Ok(zone_records
            .range(start_record_name.to_string()..)
            .take(max_items.max(0) as usize)
            .map(|(_, r)| r.clone())
            .collect())
    }
}

#[async_trait]
impl ChangeResourceRecordSets for MockRoute53 {
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change: &RecordChange,
    ) -> Result<(), CertError> {
        self.change_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_change {
            return Err(CertError::Route53("Mock change failure".to_string()));
        }

        if !self.zones.iter().any(|z| z.id == zone_id) {
            return Err(CertError::ZoneNotFound(zone_id.to_string()));
        }

        let mut records = self.records.lock().unwrap();
        let zone_records = records.entry(zone_id.to_string()).or_default();

        match change.action {
            ChangeAction::Create => {
                if zone_records.contains_key(&change.name) {
                    return Err(CertError::Route53(format!(
                        "Record already exists: {}",
                        change.name
                    )));
                }
                zone_records.insert(
                    change.name.clone(),
                    ResourceRecordSet {
                        name: change.name.clone(),
                        record_type: change.record_type.clone(),
                        ttl: change.ttl,
                        values: change.values.clone(),
                    },
                );
            }
            ChangeAction::Delete => {
                let matches = zone_records.get(&change.name).is_some_and(|existing| {
                    existing.record_type == change.record_type
                        && existing.ttl == change.ttl
                        && existing.values == change.values
                });
                if !matches {
                    return Err(CertError::Route53(format!(
                        "Record does not match: {}",
                        change.name
                    )));
                }
                zone_records.remove(&change.name);
            }
        }

        self.changes
            .lock()
            .unwrap()
            .push((zone_id.to_string(), change.clone()));
        self.log
            .lock()
            .unwrap()
            .push(format!("route53:{}:{}", change.action, change.name));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_acm_request_then_describe() {
        let acm = MockAcm::new();
        let request = CertificateRequest {
            domain_name: "test.example.com".to_string(),
            validation_method: ValidationMethod::Dns,
            validation_domain: "example.com".to_string(),
        };

        let arn = acm.request_certificate(&request).await.unwrap();
        let detail = acm.describe_certificate(&arn).await.unwrap();

        assert_eq!(detail.domain_name, "test.example.com");
        assert_eq!(detail.domain_validations.len(), 1);
        assert_eq!(acm.request_call_count(), 1);
        assert_eq!(acm.describe_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_acm_pagination() {
        let acm = MockAcm::new()
            .with_certificate(email_certificate("cert-1", "a.example.com"))
            .with_certificate(email_certificate("cert-2", "b.example.com"))
            .with_certificate(email_certificate("cert-3", "c.example.com"))
            .with_page_size(2);

        let (first, token) = acm.list_certificates(None).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(token.as_deref(), Some("2"));

        let (second, token) = acm.list_certificates(token.as_deref()).await.unwrap();
        assert_eq!(second.len(), 1);
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_mock_route53_delete_requires_exact_match() {
        let route53 = MockRoute53::new().with_zone("example.com", false).with_record(
            "example-com",
            ResourceRecordSet {
                name: "_a.example.com".to_string(),
                record_type: "CNAME".to_string(),
                ttl: Some(300),
                values: vec!["_b.example.com".to_string()],
            },
        );

        let wrong = RecordChange {
            action: ChangeAction::Delete,
            name: "_a.example.com".to_string(),
            record_type: "CNAME".to_string(),
            ttl: Some(300),
            values: vec!["_other.example.com".to_string()],
        };
        assert!(route53
            .change_resource_record_sets("example-com", &wrong)
            .await
            .is_err());
        assert!(route53.record("example-com", "_a.example.com").is_some());
    }
}
