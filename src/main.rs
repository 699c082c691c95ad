mod card;
mod cmd;
mod config;
mod context;
mod dialog;
mod domain;
mod error;
mod infra;
mod server;
mod services;
mod workflow;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::serve::{self, ServeCommandArgs};
use crate::error::AppResult;

#[derive(Parser)]
#[command(name = "helpdesk-bot", author, version, about = "Help desk chat bot that files tickets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chat webhook and the local ticket endpoint.
    Serve(ServeArgs),
    /// Inspect the configuration read from the environment.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Override the listen port from PORT.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Warning: .env not loaded: {err}");
        }
    }

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Serve(args) => {
            init_tracing();
            serve::run(ServeCommandArgs { port: args.port }).await
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
