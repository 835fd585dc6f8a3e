use clap::Args;
use colored::Colorize;

use super::{colored_status, print_json, GlobalArgs};

/// Show one certificate
#[derive(Args)]
pub struct GetCommand {
    /// Certificate ARN
    pub arn: String,
}

impl GetCommand {
    pub fn execute(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let manager = global.connect().await?;
            let cert = manager.get_certificate(&self.arn).await?;

            if global.json {
                return print_json(&cert);
            }

            println!();
            println!("  {} {}", "Domain:".bright_white(), cert.domain_name.bright_cyan());
            println!("  {} {}", "ARN:".bright_white(), cert.arn);
            println!("  {} {}", "Status:".bright_white(), colored_status(&cert.status));
            println!("  {} {}", "Type:".bright_white(), cert.certificate_type);
            if let Some(region) = &cert.region {
                println!("  {} {}", "Region:".bright_white(), region);
            }
            if let Some(reason) = &cert.failure_reason {
                println!("  {} {}", "Failure:".bright_white(), reason.bright_red());
            }
            if let Some(method) = cert.validation_method {
                println!("  {} {}", "Validation:".bright_white(), method);
            }
            if let Some(record) = &cert.validation_record_set {
                println!(
                    "  {} {} {} {}",
                    "Record:".bright_white(),
                    record.name,
                    record.record_type,
                    record.value
                );
                println!("  {} {}", "Zone:".bright_white(), record.hosted_domain_name);
            }
            println!();
            Ok(())
        })
    }
}
