//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::render::Target;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "James Walsh")]
#[command(version)]
#[command(about = "Personal portfolio and blog renderer", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post in the posts directory
    New {
        /// Title of the new post
        title: String,

        /// Cover image path (defaults to /img/<slug>.png)
        #[arg(long)]
        cover: Option<String>,
    },

    /// Render one page: "home", "about", or a post slug
    #[command(alias = "r")]
    Render {
        target: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,tower_http=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, cover } => {
            let app = folio::Folio::new(&base_dir)?;
            let path = folio::commands::new::create_post(&app, &title, cover.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Render { target, output } => {
            let app = folio::Folio::new(&base_dir)?;
            folio::commands::render::run(&app, &Target::parse(&target), output.as_deref()).await?;
        }

        Commands::Serve { port, ip, open } => {
            let app = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&app, &ip, port, open).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
