//! Certificate orchestration built on the capability traits

mod certificates;
mod deletion;
mod issuance;
mod zones;

pub use certificates::{get_certificate, list_certificate_summaries, list_certificates};
pub use deletion::delete_certificate;
pub use issuance::{issue_certificate, rollback_certificate, DEFAULT_SETTLE_DELAY};
pub use zones::{delete_validation_record, normalize_domain, resolve_public_zone};
