//! CLI entry point for finblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "finblog")]
#[command(version)]
#[command(about = "A static site generator for a financial-education blog", long_about = None)]
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
    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category slug for the new post
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content (post, category, tag, popular)
    List {
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show visitor statistics
    Stats,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "finblog=debug,info"
    } else {
        "finblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::New { title, category } => {
            let blog = finblog::Blog::new(&base_dir)?;
            finblog::commands::new::run(&blog, &title, category.as_deref())?;
        }

        Commands::Generate => {
            let blog = finblog::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let blog = finblog::Blog::new(&base_dir)?;

            // Generate first so the served tree is fresh
            tracing::info!("Generating static files...");
            blog.generate()?;

            finblog::server::start(&blog, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let blog = finblog::Blog::new(&base_dir)?;
            finblog::commands::list::run(&blog, &r#type)?;
        }

        Commands::Stats => {
            let blog = finblog::Blog::new(&base_dir)?;
            finblog::commands::stats::run(&blog).await?;
        }

        Commands::Clean => {
            let blog = finblog::Blog::new(&base_dir)?;
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("finblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
