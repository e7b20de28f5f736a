//! bookclub-client CLI entry point.

use bookclub_client::cli::{Cli, Commands, OutputFormat};
use bookclub_client::client::BookclubClient;
use bookclub_client::output::{format_output, pretty};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = BookclubClient::new(&cli.base_url);

    match cli.command {
        Commands::Signup(signup_cmd) => {
            let request = signup_cmd.into_request();
            client.signup(&request).await?;
            if !cli.quiet {
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&request, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_signup(&request)),
                }
            }
        }
        Commands::Health(health_cmd) => {
            use bookclub_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    client.livez().await?;
                    if !cli.quiet {
                        println!("ok");
                    }
                }
                HealthAction::Status => {
                    let report = client.healthz().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_health(&report)),
                    }
                    if report.error.is_some() {
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}
