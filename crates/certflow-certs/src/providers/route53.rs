//! AWS Route 53 client
//!
//! Required IAM Policy:
//! - route53:ListHostedZones
//! - route53:ListResourceRecordSets
//! - route53:ChangeResourceRecordSets

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_route53::{
    types::{self as r53_types, Change, ChangeBatch, ResourceRecord, RrType},
    Client,
};
use tracing::{debug, info};

use super::aws::{sdk_error_details, strip_zone_prefix};
use super::traits::{
    ChangeAction, ChangeResourceRecordSets, HostedZone, ListHostedZones, ListResourceRecordSets,
    RecordChange, ResourceRecordSet,
};
use crate::errors::CertError;

const CHANGE_COMMENT: &str = "Managed by certflow";

/// Route 53 client
#[derive(Debug, Clone)]
pub struct Route53Client {
    client: Client,
}

impl Route53Client {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    fn to_sdk_action(action: ChangeAction) -> r53_types::ChangeAction {
        match action {
            ChangeAction::Create => r53_types::ChangeAction::Create,
            ChangeAction::Delete => r53_types::ChangeAction::Delete,
        }
    }

    /// Zones without a config block are never treated as public
    fn convert_zone(zone: &r53_types::HostedZone) -> HostedZone {
        HostedZone {
            id: strip_zone_prefix(zone.id()),
            name: zone.name().to_string(),
            private_zone: zone.config().map(|c| c.private_zone()).unwrap_or(true),
        }
    }

    fn convert_record_set(rrs: &r53_types::ResourceRecordSet) -> ResourceRecordSet {
        ResourceRecordSet {
            name: rrs.name().to_string(),
            record_type: rrs.r#type().as_str().to_string(),
            ttl: rrs.ttl(),
            values: rrs
                .resource_records()
                .iter()
                .map(|rr| rr.value().to_string())
                .collect(),
        }
    }

    fn build_change_batch(change: &RecordChange) -> Result<ChangeBatch, CertError> {
        let records = change
            .values
            .iter()
            .map(|value| ResourceRecord::builder().value(value).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CertError::Route53(format!("Failed to build resource record: {}", e)))?;

        let record_set = r53_types::ResourceRecordSet::builder()
            .name(&change.name)
            .r#type(RrType::from(change.record_type.as_str()))
            .set_ttl(change.ttl)
            .set_resource_records(Some(records))
            .build()
            .map_err(|e| CertError::Route53(format!("Failed to build record set: {}", e)))?;

        let change = Change::builder()
            .action(Self::to_sdk_action(change.action))
            .resource_record_set(record_set)
            .build()
            .map_err(|e| CertError::Route53(format!("Failed to build change: {}", e)))?;

        ChangeBatch::builder()
            .comment(CHANGE_COMMENT)
            .changes(change)
            .build()
            .map_err(|e| CertError::Route53(format!("Failed to build change batch: {}", e)))
    }
}

#[async_trait]
impl ListHostedZones for Route53Client {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, CertError> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            debug!("Listing Route 53 hosted zones (marker: {:?})", marker);

            let result = self
                .client
                .list_hosted_zones()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| {
                    CertError::Route53(format!(
                        "Failed to list hosted zones: {}",
                        sdk_error_details(&e)
                    ))
                })?;

            zones.extend(result.hosted_zones().iter().map(Self::convert_zone));

            match result.next_marker() {
                Some(next) if result.is_truncated() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(zones)
    }
}

#[async_trait]
impl ListResourceRecordSets for Route53Client {
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_record_name: &str,
        max_items: i32,
    ) -> Result<Vec<ResourceRecordSet>, CertError> {
        debug!(
            "Listing record sets in zone {} starting at {}",
            zone_id, start_record_name
        );

        let result = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .start_record_name(start_record_name)
            .max_items(max_items)
            .send()
            .await
            .map_err(|e| {
                CertError::Route53(format!(
                    "Failed to list resource record sets: {}",
                    sdk_error_details(&e)
                ))
            })?;

        Ok(result
            .resource_record_sets()
            .iter()
            .map(Self::convert_record_set)
            .collect())
    }
}

#[async_trait]
impl ChangeResourceRecordSets for Route53Client {
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change: &RecordChange,
    ) -> Result<(), CertError> {
        let batch = Self::build_change_batch(change)?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| {
                CertError::Route53(format!(
                    "Failed to {} record {}: {}",
                    change.action,
                    change.name,
                    sdk_error_details(&e)
                ))
            })?;

        info!(
            "Applied {} {} record {} in zone {}",
            change.action, change.record_type, change.name, zone_id
        );

        Ok(())
    }
}
