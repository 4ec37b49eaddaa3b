use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod prompt;
pub mod serve;
pub mod slots;
pub mod submit;

use crate::core::AppConfig;
use crate::twin::IntentHint;

#[derive(Subcommand)]
enum Command {
    /// Run the web UI and API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2323")]
        port: String,
    },
    /// Send one simulated request to the twin and print the response
    Submit {
        #[arg(long, default_value = "Rhea")]
        requester_name: String,
        #[arg(long, default_value = "rhea@partner.com")]
        requester_email: String,
        #[arg(long, default_value = "FMCG GTM Brief Review")]
        topic: String,
        #[arg(
            long,
            default_value = "Can we meet this week to sanity-check the FMCG GTM brief? What should we prep? We need to move fast."
        )]
        message: String,
        /// One of INFO, MEETING or UNKNOWN
        #[arg(long, default_value = "MEETING")]
        intent_hint: IntentHint,
        /// Print the raw request and response JSON instead of the card
        #[arg(long, action, default_value = "false")]
        json: bool,
    },
    /// Print the system instruction sent to the model
    Prompt {},
    /// Print the candidate meeting slots for right now
    Slots {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Log to stderr so stdout stays clean for command output.
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::from_env()?;

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Submit {
            requester_name,
            requester_email,
            topic,
            message,
            intent_hint,
            json,
        }) => {
            init_cli_tracing();
            let form = crate::twin::FormInput {
                requester_name,
                requester_email,
                topic,
                message,
                intent_hint,
            };
            submit::run(form, json, config).await?;
        }
        Some(Command::Prompt {}) => {
            prompt::run(config)?;
        }
        Some(Command::Slots {}) => {
            slots::run(config)?;
        }
        None => {}
    }

    Ok(())
}
