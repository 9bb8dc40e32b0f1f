use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ivahit::{api, config::Config, db::Database};

#[derive(Parser)]
#[command(name = "ivahit")]
#[command(about = "Notes with tags and groups, served over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for HTTP API (overrides IVAHIT_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides IVAHIT_HOST)
        #[arg(long)]
        host: Option<String>,

        /// SQLite database file (overrides IVAHIT_DB_PATH)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Create the database and apply migrations, then exit
    Init {
        /// SQLite database file (overrides IVAHIT_DB_PATH)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ivahit=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let db = config.open_database()?;
    let app = api::create_router(db);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("ivahit listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env();

    match cli.command {
        Some(Commands::Serve { port, host, db }) => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if db.is_some() {
                config.db_path = db;
            }
            serve(config).await?;
        }
        Some(Commands::Init { db }) => {
            if db.is_some() {
                config.db_path = db;
            }
            config.open_database()?;
            let path = match config.db_path {
                Some(path) => path,
                None => Database::default_path()?,
            };
            println!("Database ready at {}", path.display());
        }
        None => serve(config).await?,
    }

    Ok(())
}
