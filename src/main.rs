use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use portfolio_server::{
    cache::RepoCache,
    config::Config,
    export,
    github::GitHubClient,
    server,
};

#[derive(Parser)]
#[command(name = "portfolio-server")]
#[command(about = "Serves a portfolio site backed by a GitHub account's public repositories")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Write repos.json and config.json for static hosting
    Export {
        /// Existing output directory of the static build
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    // Load configuration
    let config = Config::load()?;
    log::debug!("Using GitHub account {}", config.account_name);

    let client = GitHubClient::new(config.api_base_url.clone(), config.auth_token.clone());
    let cache = Arc::new(RepoCache::new(Arc::new(client), config.account_name.clone()));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => server::serve(config, cache).await?,
        Commands::Export { out } => {
            let count = export::run(&cache, &config.contact, &out).await?;
            println!("Exported {} repositories to {}", count, out.display());
        }
    }

    Ok(())
}
