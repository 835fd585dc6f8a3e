//! Public hosted zone resolution and validation record cleanup

use tracing::{debug, info};

use crate::errors::CertError;
use crate::models::RecordSet;
use crate::providers::{
    ChangeAction, ChangeResourceRecordSets, HostedZone, ListHostedZones, ListResourceRecordSets,
    RecordChange,
};

/// Normalize domain name (remove trailing dot, lowercase)
pub fn normalize_domain(domain: &str) -> String {
    domain.trim_end_matches('.').to_lowercase()
}

/// The single public hosted zone named exactly `domain`.
///
/// Private zones with the same name never match. Zero matches is
/// `ZoneNotFound`, more than one is `AmbiguousZone`.
pub async fn resolve_public_zone<R>(route53: &R, domain: &str) -> Result<HostedZone, CertError>
where
    R: ListHostedZones + ?Sized,
{
    let wanted = normalize_domain(domain);
    let zones = route53.list_hosted_zones().await?;

    let mut matches: Vec<HostedZone> = zones
        .into_iter()
        .filter(|z| !z.private_zone && normalize_domain(&z.name) == wanted)
        .collect();

    match matches.len() {
        0 => Err(CertError::ZoneNotFound(domain.to_string())),
        1 => {
            let zone = matches.remove(0);
            debug!("Resolved public hosted zone {} for {}", zone.id, domain);
            Ok(zone)
        }
        count => Err(CertError::AmbiguousZone {
            domain: domain.to_string(),
            count,
        }),
    }
}

/// Delete a validation record from its public hosted zone.
///
/// The record must exist under exactly its name; a missing record is an
/// error, so running this twice fails the second time.
pub async fn delete_validation_record<R>(route53: &R, record_set: &RecordSet) -> Result<(), CertError>
where
    R: ListHostedZones + ListResourceRecordSets + ChangeResourceRecordSets + ?Sized,
{
    let zone = resolve_public_zone(route53, &record_set.hosted_domain_name).await?;

    let found = route53
        .list_resource_record_sets(&zone.id, &record_set.name, 1)
        .await?;

    let existing = match found.as_slice() {
        [only] if only.name == record_set.name => only,
        _ => return Err(CertError::RecordNotFound(record_set.name.clone())),
    };

    let change = RecordChange {
        action: ChangeAction::Delete,
        name: record_set.name.clone(),
        record_type: existing.record_type.clone(),
        ttl: existing.ttl,
        values: if existing.values.is_empty() {
            vec![record_set.value.clone()]
        } else {
            existing.values.clone()
        },
    };

    route53.change_resource_record_sets(&zone.id, &change).await?;

    info!(
        "Deleted validation record {} from zone {}",
        record_set.name, zone.id
    );

    Ok(())
}
