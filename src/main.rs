use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrine::{catalog, config, ingest, output, server};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Marketplace-style image catalog with a moderation queue")]
#[command(long_about = "\
Marketplace-style image catalog with a moderation queue

Your filesystem is the data source. Drop images into the content directory,
reconcile them into the catalog, then moderate and price them from the admin
dashboard while approved work shows in the public gallery.

Typical flow:

  vitrine ingest                 # register new files as pending
  ADMIN_TOKEN=s3cret vitrine serve
  open http://localhost:5000/admin?token=s3cret

Configuration is read from config.toml (all keys optional); ADMIN_TOKEN and
WA_PHONE environment variables override the file.")]
#[command(version = version_string())]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile the content directory into the catalog
    Ingest,
    /// Run the HTTP server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vitrine=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::AppConfig::load(&cli.config)?;

    match cli.command {
        Command::Ingest => {
            let catalog = catalog::Catalog::open(&config.db_path)?;
            let report = ingest::ingest(&config.content_dir, &catalog)?;
            output::print_ingest_report(&report);
        }
        Command::Serve => {
            server::run(&config).await?;
        }
    }

    Ok(())
}
