//! Connection settings for the ACM and Route 53 clients

use std::time::Duration;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_acm::config::{Credentials, Region};
use serde::{Deserialize, Serialize};

use crate::errors::CertError;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 5;

/// Static AWS access keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

/// Settings shared by both AWS clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Optional custom endpoint URL (for LocalStack or other AWS-compatible services)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Falls back to the default AWS credential chain when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<StaticCredentials>,
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_settle_delay_secs() -> u64 {
    DEFAULT_SETTLE_DELAY_SECS
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            credentials: None,
            settle_delay_secs: DEFAULT_SETTLE_DELAY_SECS,
        }
    }
}

impl ManagerConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn validate(&self) -> Result<(), CertError> {
        if self.region.trim().is_empty() {
            return Err(CertError::Configuration("region must not be empty".to_string()));
        }
        if let Some(creds) = &self.credentials {
            if creds.access_key_id.is_empty() || creds.secret_access_key.is_empty() {
                return Err(CertError::Configuration(
                    "static credentials need both an access key id and a secret".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Load the shared SDK configuration for both clients
pub async fn load_sdk_config(config: &ManagerConfig) -> Result<SdkConfig, CertError> {
    config.validate()?;

    let mut builder =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let Some(creds) = &config.credentials {
        builder = builder.credentials_provider(Credentials::new(
            &creds.access_key_id,
            &creds.secret_access_key,
            creds.session_token.clone(),
            None,
            "certflow",
        ));
    }

    // If a custom endpoint URL is provided (e.g., for LocalStack), use it
    if let Some(ref endpoint_url) = config.endpoint_url {
        builder = builder.endpoint_url(endpoint_url);
    }

    Ok(builder.load().await)
}
