use clap::Args;
use colored::Colorize;

use super::{print_certificate_table, print_json, GlobalArgs};

/// List certificates with their status and validation record
#[derive(Args)]
pub struct ListCommand {}

/// List certificate ARNs and domain names only
#[derive(Args)]
pub struct SummariesCommand {}

impl ListCommand {
    pub fn execute(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let manager = global.connect().await?;
            let certificates = manager.list_certificates().await?;

            if global.json {
                return print_json(&certificates);
            }

            println!();
            print_certificate_table(&certificates);
            println!();
            Ok(())
        })
    }
}

impl SummariesCommand {
    pub fn execute(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let manager = global.connect().await?;
            let summaries = manager.list_certificate_summaries().await?;

            if global.json {
                return print_json(&summaries);
            }

            println!();
            if summaries.is_empty() {
                println!("  {} No certificates found.", "ℹ".bright_blue());
            } else {
                println!(
                    "  {:<40} {}",
                    "DOMAIN".bright_white().bold(),
                    "ARN".bright_white().bold()
                );
                println!("  {}", "─".repeat(110));
                for summary in &summaries {
                    println!("  {:<40} {}", summary.domain_name.bright_cyan(), summary.arn);
                }
            }
            println!();
            Ok(())
        })
    }
}
