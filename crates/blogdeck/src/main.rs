//! blogdeck - command-line client for the blog site and its admin console.
//!
//! Main entry point for the blogdeck CLI.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use console::Style;

mod commands;
mod output;

use blogdeck_client::Flavor;
use commands::{articles, auth, navigate, secret, site};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// blogdeck - browse and administer the blog from the terminal
#[derive(Parser)]
#[command(name = "blogdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend API base URL (default: http://localhost:8080/api)
    #[arg(long, global = true, env = "BLOGDECK_SERVER_URL")]
    pub server: Option<String>,

    /// Act as the admin console instead of the public site
    #[arg(long, global = true)]
    pub console: bool,

    /// Directory holding config.toml, session storage, and logs
    #[arg(long, global = true, env = "BLOGDECK_CONFIG_DIR", hide = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(auth::LoginArgs),

    /// Clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami(auth::WhoamiArgs),

    /// Browse articles
    Articles(articles::ArticlesArgs),

    /// List categories
    Categories,

    /// List tags
    Tags,

    /// Show comments on an article
    Comments(site::CommentsArgs),

    /// Show system settings (console only)
    Settings,

    /// Check whether a page may be visited with the current session
    Navigate(navigate::NavigateArgs),

    /// Obfuscate or reveal a stored secret
    Secret(secret::SecretArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let red = Style::new().red();
        eprintln!("{} {:#}", red.apply_to("Error:"), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let loaded = blogdeck_config::load_config_with_options(None, cli.config_dir.as_deref())
        .context("failed to load configuration")?;

    // Initialize tracing: console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "blogdeck=debug,blogdeck_client=debug,blogdeck_session=debug,blogdeck_router=debug,blogdeck_config=debug,warn"
    } else {
        "blogdeck=warn,blogdeck_client=warn,blogdeck_session=warn,blogdeck_router=warn,error"
    };

    let log_dir = loaded.config_dir.join("logs");
    let file_appender = tracing_appender::rolling::daily(&log_dir, "blogdeck.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "blogdeck=trace,blogdeck_client=trace,blogdeck_session=trace,blogdeck_router=trace,blogdeck_config=trace,info",
                )),
        )
        .init();

    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }

    let mut settings = loaded
        .config
        .resolve(&loaded.config_dir)
        .context("invalid configuration")?;
    if cli.console {
        settings = settings.with_flavor(Flavor::Console, &loaded.config_dir);
    }
    if let Some(server) = cli.server {
        settings.base_url = server;
    }

    // Create context for commands
    let ctx = commands::Context {
        settings,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Login(args) => auth::login(args, &ctx).await,
        Commands::Logout => auth::logout(&ctx).await,
        Commands::Whoami(args) => auth::whoami(args, &ctx).await,
        Commands::Articles(args) => articles::run(args, &ctx).await,
        Commands::Categories => site::categories(&ctx).await,
        Commands::Tags => site::tags(&ctx).await,
        Commands::Comments(args) => site::comments(args, &ctx).await,
        Commands::Settings => site::settings(&ctx).await,
        Commands::Navigate(args) => navigate::run(args, &ctx),
        Commands::Secret(args) => secret::run(args, &ctx),
    }
}
