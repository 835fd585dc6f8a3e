use clap::Args;
use colored::Colorize;

use super::GlobalArgs;

/// Delete a certificate and its DNS validation record
#[derive(Args)]
pub struct DeleteCommand {
    /// Certificate ARN
    pub arn: String,
}

impl DeleteCommand {
    pub fn execute(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let manager = global.connect().await?;
            manager.delete_certificate(&self.arn).await?;

            if global.json {
                println!("{}", serde_json::json!({ "deleted": self.arn }));
            } else {
                println!("{} Deleted certificate {}", "✓".bright_green(), self.arn);
            }
            Ok(())
        })
    }
}
