mod browse;
mod render;

use clap::{Args, Parser, Subcommand};
use storefront_core::SortKey;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one page of the product listing
    Browse(BrowseArgs),
    /// Print the effective configuration with secrets redacted
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub(crate) struct BrowseArgs {
    /// Category to include (repeatable)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Brand to include (repeatable)
    #[arg(long = "brand", value_name = "BRAND")]
    pub brands: Vec<String>,

    /// price-asc, price-desc, title-asc, or title-desc
    #[arg(long, default_value = "price-asc")]
    pub sort: SortKey,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Overrides STOREFRONT_PAGE_SIZE
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Print the final listing state as JSON
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = storefront_core::load_app_config_from_env()?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Browse(args) => {
            let listed = browse::run_browse(&config, &args).await?;
            if !listed {
                std::process::exit(1);
            }
        }
        Commands::Config => println!("{config:#?}"),
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests;
