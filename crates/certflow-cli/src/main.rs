//! certflow CLI - ACM certificates with Route 53 DNS validation
//!
//! Every command talks to one ACM region; validation records are kept in
//! the public Route 53 hosted zone of the domain given at issuance.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    DeleteCommand, GetCommand, GlobalArgs, IssueCommand, ListCommand, SummariesCommand,
};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "CERTFLOW_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "CERTFLOW_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List certificates with their status and validation record
    List(ListCommand),
    /// List certificate ARNs and domain names only
    Summaries(SummariesCommand),
    /// Show one certificate
    Get(GetCommand),
    /// Request a certificate and publish its DNS validation record
    Issue(IssueCommand),
    /// Delete a certificate and its DNS validation record
    Delete(DeleteCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If RUST_LOG is set, use it directly; otherwise use our default filter
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG environment variable: {}", e))?
    } else {
        // certflow crates at the requested level, SDK internals at warn
        tracing_subscriber::EnvFilter::new(format!(
            "certflow={level},\
             certflow_cli={level},\
             certflow_certs={level},\
             aws_config=warn,\
             aws_smithy_runtime=warn,\
             aws_sdk_acm=warn,\
             aws_sdk_route53=warn,\
             h2=warn,\
             hyper=warn,\
             rustls=warn",
            level = cli.log_level
        ))
    };

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
        _ => tracing_subscriber::fmt::layer() // "compact" or any other value
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::List(cmd) => cmd.execute(&cli.global),
        Commands::Summaries(cmd) => cmd.execute(&cli.global),
        Commands::Get(cmd) => cmd.execute(&cli.global),
        Commands::Issue(cmd) => cmd.execute(&cli.global),
        Commands::Delete(cmd) => cmd.execute(&cli.global),
    }
}
