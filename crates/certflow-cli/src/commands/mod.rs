pub mod delete;
pub mod get;
pub mod issue;
pub mod list;

pub use delete::DeleteCommand;
pub use get::GetCommand;
pub use issue::IssueCommand;
pub use list::{ListCommand, SummariesCommand};

use certflow_certs::{Certificate, CertificateManager, ManagerConfig};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

/// Connection and output flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// AWS region of the ACM certificates
    #[arg(long, env = "CERTFLOW_REGION", default_value = "us-east-1", global = true)]
    pub region: String,

    /// Custom AWS endpoint URL (for LocalStack or other AWS-compatible services)
    #[arg(long, env = "CERTFLOW_ENDPOINT_URL", global = true)]
    pub endpoint_url: Option<String>,

    /// Seconds to wait for ACM to populate the validation record after a request
    #[arg(
        long,
        env = "CERTFLOW_SETTLE_DELAY_SECS",
        default_value = "5",
        global = true
    )]
    pub settle_delay_secs: u64,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            credentials: None,
            settle_delay_secs: self.settle_delay_secs,
        }
    }

    pub async fn connect(&self) -> anyhow::Result<CertificateManager> {
        let config = self.manager_config();
        debug!("Connecting to ACM in {}", config.region);
        Ok(CertificateManager::from_config(&config).await?)
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn colored_status(status: &str) -> colored::ColoredString {
    match status {
        "ISSUED" => status.bright_green(),
        "PENDING_VALIDATION" => status.bright_yellow(),
        "FAILED" | "EXPIRED" | "REVOKED" | "VALIDATION_TIMED_OUT" => status.bright_red(),
        _ => status.normal(),
    }
}

pub(crate) fn print_certificate_table(certificates: &[Certificate]) {
    if certificates.is_empty() {
        println!("  {} No certificates found.", "ℹ".bright_blue());
        return;
    }

    println!(
        "  {:<40} {:<22} {}",
        "DOMAIN".bright_white().bold(),
        "STATUS".bright_white().bold(),
        "ARN".bright_white().bold()
    );
    println!("  {}", "─".repeat(110));

    for cert in certificates {
        println!(
            "  {:<40} {:<22} {}",
            cert.domain_name.bright_cyan(),
            colored_status(&cert.status),
            cert.arn
        );
    }
}
