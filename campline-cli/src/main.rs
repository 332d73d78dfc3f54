//! campline CLI - runs the camp signup record service
//!
//! `campline serve` starts the HTTP server (the default when no
//! subcommand is given); `campline seed` inserts a starter set of
//! activities, which have no creation endpoint.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use campline_server::db::repos::ActivityRepo;
use campline_server::db::{create_pool, migrations};
use campline_server::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "campline", about = "Camp signup record service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Insert a starter set of activities
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5555)]
    port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://camp.db")]
    database_url: String,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            port: 5555,
            bind: "127.0.0.1".to_string(),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://camp.db".to_string()),
        }
    }
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://camp.db")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(args).await,
        Command::Seed(args) => seed(args).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

async fn serve(args: ServeArgs) -> Result<()> {
    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .context("invalid bind address")?;

    let config = ServerConfig {
        bind_addr,
        database_url: args.database_url,
    };

    campline_server::run_server(config).await?;
    Ok(())
}

async fn seed(args: SeedArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("could not open database")?;
    migrations::run(&pool).await?;

    let repo = ActivityRepo::new(&pool);
    for (name, difficulty) in [
        ("Archery", 2),
        ("Swimming", 3),
        ("Kayaking", 4),
        ("Arts and Crafts", 1),
    ] {
        let activity = repo.insert(name, difficulty).await?;
        info!(id = activity.id, name = %activity.name, "seeded activity");
    }

    Ok(())
}
