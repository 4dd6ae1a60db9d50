//! CLI module for Leadscout
//!
//! Provides commands:
//! - `serve`: Run the HTTP API
//! - `analyze`: Score one event against one company and print the leads
//! - `doctor`: Check credentials and configuration

use clap::{Parser, Subcommand};

pub mod analyze;
pub mod doctor;

/// Leadscout CLI
#[derive(Parser, Debug)]
#[command(name = "leadscout")]
#[command(about = "Find the event attendees that match your ideal customer profile")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve,
    /// Analyze one event
    Analyze(analyze::AnalyzeArgs),
    /// Check credentials and configuration
    Doctor,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Analyze(args)) => analyze::run(args).await,
        Some(Commands::Doctor) => doctor::run().await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "leadscout",
            "analyze",
            "https://cerebralvalley.ai/summit",
            "--company-url",
            "https://linkup.so",
            "--company-name",
            "Linkup",
            "--output",
            "reports/cv.json",
        ])
        .unwrap();

        let Some(Commands::Analyze(args)) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.event_url, "https://cerebralvalley.ai/summit");
        assert_eq!(args.company_url, "https://linkup.so");
        assert_eq!(args.company_name.as_deref(), Some("Linkup"));
        assert!(args.event_name.is_none());
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("reports/cv.json")));
    }

    #[test]
    fn test_company_url_is_required() {
        assert!(Cli::try_parse_from(["leadscout", "analyze", "https://lu.ma/x"]).is_err());
    }
}
