mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vend",
    about = "Account vending — render AFT account requests and commit them to CodeCommit",
    version,
    propagate_version = true
)]
struct Cli {
    /// Deployment config file
    #[arg(long, global = true, env = "VENDING_CONFIG", default_value = "vending.yaml")]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the intake HTTP server
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "8080")]
        port: u16,
    },

    /// Run the commit workflow once against AWS
    Commit {
        /// Email of the person submitting the request
        #[arg(long)]
        owner_email: String,

        /// Account to vend (requires --environment)
        #[arg(long)]
        account_name: Option<String>,

        /// Target environment: dev, test, or prod
        #[arg(long)]
        environment: Option<String>,

        /// Retired directory-upload input; accepted and ignored
        #[arg(long, hide = true)]
        directory_path: Option<String>,
    },

    /// Render the account-request file locally without committing
    Render {
        #[arg(long)]
        owner_email: String,

        #[arg(long)]
        account_name: String,

        /// Target environment: dev, test, or prod
        #[arg(long)]
        environment: String,
    },

    /// Inspect and validate the deployment config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve { port } => cmd::serve::run(&cli.config, port),
        Commands::Commit {
            owner_email,
            account_name,
            environment,
            directory_path,
        } => cmd::commit::run(
            &cli.config,
            owner_email,
            account_name,
            environment,
            directory_path,
            cli.json,
        ),
        Commands::Render {
            owner_email,
            account_name,
            environment,
        } => cmd::render::run(&cli.config, owner_email, account_name, &environment, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&cli.config, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
