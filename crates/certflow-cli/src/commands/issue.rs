use certflow_certs::{IssueCertificateRequest, ValidationMethod};
use clap::Args;
use colored::Colorize;
use tracing::error;

use super::{print_json, GlobalArgs};

/// Request a certificate and publish its DNS validation record
#[derive(Args)]
pub struct IssueCommand {
    /// Domain name to certify (e.g., "app.example.com")
    #[arg(long, short = 'd')]
    pub domain: String,

    /// Public hosted zone domain that receives the validation record
    #[arg(long)]
    pub hosted_domain: String,

    /// Validation method: dns or email
    #[arg(long, short = 'm', default_value = "dns")]
    pub method: ValidationMethod,
}

impl IssueCommand {
    pub fn execute(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let manager = global.connect().await?;
            let request = IssueCertificateRequest {
                validation_method: self.method,
                target_domain: self.domain,
                hosted_domain: self.hosted_domain,
            };

            if !global.json {
                println!(
                    "{} Requesting certificate for {}...",
                    "→".bright_blue(),
                    request.target_domain.bright_cyan()
                );
            }

            let result = match manager.issue_certificate(&request).await {
                Ok(result) => result,
                Err(e) => {
                    if let Some(rollback_err) = e.rollback_error() {
                        error!(
                            "Certificate {} may still exist: {}",
                            e.certificate_arn().unwrap_or_default(),
                            rollback_err
                        );
                    }
                    return Err(e.into());
                }
            };

            if global.json {
                return print_json(&result);
            }

            println!("{} Certificate requested", "✓".bright_green());
            println!();
            println!("  {} {}", "ARN:".bright_white(), result.certificate_arn);
            println!("  {} {}", "Domain:".bright_white(), result.domain_name);
            println!("  {} {}", "Validation:".bright_white(), result.validation_method);
            if let Some(zone_id) = &result.hosted_zone_id {
                println!("  {} {}", "Hosted zone:".bright_white(), zone_id);
            }
            if let (Some(name), Some(value)) = (
                &result.validation_record_name,
                &result.validation_record_value,
            ) {
                println!("  {} {} CNAME {}", "Record:".bright_white(), name, value);
            }
            println!();
            Ok(())
        })
    }
}
