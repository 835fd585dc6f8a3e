//! ACM certificate management for certflow
//!
//! This crate issues, inspects and deletes AWS Certificate Manager
//! certificates and keeps their DNS validation records in Route 53 in step:
//! - Issuing with DNS validation publishes the validation CNAME in the
//!   public hosted zone, and rolls the certificate back if that fails
//! - Deleting a DNS-validated certificate removes its validation record first
//! - Listing follows pagination and skips certificates that cannot be described

pub mod config;
pub mod errors;
pub mod manager;
pub mod models;
pub mod providers;
pub mod services;

// Re-export main types
pub use config::{ManagerConfig, StaticCredentials};
pub use errors::{CertError, IssueError, RollbackOutcome};
pub use manager::CertificateManager;
pub use models::{Certificate, IssueCertificateRequest, IssueCertificateResult, RecordSet};
pub use providers::{AcmClient, CertificateSummary, Route53Client, ValidationMethod};
pub use services::{
    delete_certificate, delete_validation_record, get_certificate, issue_certificate,
    list_certificate_summaries, list_certificates,
};
