//! Error types for certificate and validation record operations

use std::fmt;

use thiserror::Error;

/// Certificate and DNS errors
#[derive(Error, Debug)]
pub enum CertError {
    #[error("Certificate not found: {0}")]
    CertificateNotFound(String),

    #[error("Hosted zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Ambiguous hosted zone: {count} public zones match {domain}")]
    AmbiguousZone { domain: String, count: usize },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Domain validation options missing for certificate: {0}")]
    MissingValidationOptions(String),

    #[error("Invalid validation method: {0}")]
    InvalidValidationMethod(String),

    #[error("ACM error: {0}")]
    Acm(String),

    #[error("Route 53 error: {0}")]
    Route53(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CertError {
    /// Whether the error reports a missing certificate, zone or record
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CertError::CertificateNotFound(_)
                | CertError::ZoneNotFound(_)
                | CertError::RecordNotFound(_)
        )
    }
}

/// What happened to a requested certificate after a later issuance step failed
#[derive(Debug)]
pub enum RollbackOutcome {
    /// The certificate was deleted
    Completed,
    /// Deleting the certificate failed too
    Failed(CertError),
}

impl fmt::Display for RollbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackOutcome::Completed => write!(f, "rolled back certificate request"),
            RollbackOutcome::Failed(e) => {
                write!(f, "failed to roll back certificate request: {}", e)
            }
        }
    }
}

/// Issuance errors
///
/// A rejected request never created anything, so it carries no rollback.
/// Every later failure carries both the triggering error and the outcome of
/// deleting the certificate that was already requested.
#[derive(Error, Debug)]
pub enum IssueError {
    #[error("Certificate request failed: {0}")]
    Request(#[source] CertError),

    #[error("{cause}; {rollback}")]
    Aborted {
        arn: String,
        cause: CertError,
        rollback: RollbackOutcome,
    },
}

impl IssueError {
    /// The failure that stopped issuance
    pub fn cause(&self) -> &CertError {
        match self {
            IssueError::Request(e) => e,
            IssueError::Aborted { cause, .. } => cause,
        }
    }

    /// ARN of the certificate that had to be rolled back, if one was created
    pub fn certificate_arn(&self) -> Option<&str> {
        match self {
            IssueError::Request(_) => None,
            IssueError::Aborted { arn, .. } => Some(arn),
        }
    }

    /// The rollback failure, when the compensating delete did not succeed
    pub fn rollback_error(&self) -> Option<&CertError> {
        match self {
            IssueError::Aborted {
                rollback: RollbackOutcome::Failed(e),
                ..
            } => Some(e),
            _ => None,
        }
    }

    /// Whether a compensating delete ran and succeeded
    pub fn rolled_back(&self) -> bool {
        matches!(
            self,
            IssueError::Aborted {
                rollback: RollbackOutcome::Completed,
                ..
            }
        )
    }
}
