use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod crawl;

#[derive(Debug, Parser)]
#[command(name = "upcwatch")]
#[command(about = "UPC competitor price watcher")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the input UPC list, resuming from the last persisted result.
    Crawl,
    /// Export the result store to a flat CSV without crawling.
    Export {
        /// Destination path; defaults to `UPCWATCH_EXPORT_PATH`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the store size and the resume position.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = upcwatch_core::load_app_config()?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();
    match cli.command {
        // A bare invocation crawls; that is the tool's whole job.
        Some(Commands::Crawl) | None => {
            let summary = crawl::run(&config).await?;
            tracing::info!(
                rows_processed = summary.rows_processed,
                rows_failed = summary.rows_failed,
                records_added = summary.records_added,
                "crawl finished"
            );
        }
        Some(Commands::Export { output }) => {
            let store = upcwatch_store::ResultStore::new(&config.results_path);
            let out = output.unwrap_or_else(|| config.export_path.clone());
            let rows = upcwatch_store::export_csv(&store, &out)?;
            println!("exported {rows} record(s) to {}", out.display());
        }
        Some(Commands::Status) => {
            let store = upcwatch_store::ResultStore::new(&config.results_path);
            let records = store.load();
            println!("result store: {}", store.path().display());
            println!("records:      {}", records.len());
            match store.last_upc() {
                Some(upc) => println!("last UPC:     {upc}"),
                None => println!("last UPC:     (none — next crawl starts from row 0)"),
            }
        }
    }

    Ok(())
}

/// Honors `RUST_LOG` when set, otherwise the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
