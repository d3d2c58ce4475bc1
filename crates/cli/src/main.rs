mod config;
mod pages_cmd;
mod remote;
mod tags_cmd;
mod update_cmd;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trackingtags",
    version,
    about = "Generate feature tracking tags for a user and catalog page"
)]
struct Cli {
    /// Fetch the page catalog from this URL instead of the configured one
    #[arg(long)]
    catalog_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the pages available in the catalog
    Pages {
        /// Print pages as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remember a page as the current selection
    Select {
        /// Page id as shown by `trackingtags pages`
        id: String,
    },

    /// Generate the tracking tags for a user
    Tags(tags_cmd::TagsArgs),

    /// Show or set configuration
    Config {
        /// Set the page catalog URL
        #[arg(long)]
        catalog_url: Option<String>,

        /// Set the version manifest URL
        #[arg(long)]
        version_url: Option<String>,

        /// Set the request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Check whether a newer release is available
    CheckUpdate,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let catalog_url = cli.catalog_url.as_deref();

    let result = match cli.command {
        Commands::Pages { json } => pages_cmd::run_pages(catalog_url, json).await,
        Commands::Select { id } => pages_cmd::run_select(&id, catalog_url).await,
        Commands::Tags(args) => tags_cmd::run_tags(args, catalog_url).await,
        Commands::Config {
            catalog_url,
            version_url,
            timeout_secs,
        } => {
            if catalog_url.is_none() && version_url.is_none() && timeout_secs.is_none() {
                config::show_config()
            } else {
                config::set_config(catalog_url, version_url, timeout_secs)
            }
        }
        Commands::CheckUpdate => update_cmd::run_check_update().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
