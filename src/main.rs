//! steam-price-compare - Cross-region Steam price comparison CLI
//!
//! Compares a game's price in one storefront region against another,
//! converting both sides to a common currency.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use steam_price_compare::commands::{
    CompareCommand, ConvertCommand, ParseCommand, PriceCommand, RateCommand,
};
use steam_price_compare::config::{AnnotationLayout, Config, OutputFormat};
use steam_price_compare::pricing::CurrencyCode;
use steam_price_compare::steam::Region;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "steam-price-compare",
    version,
    about = "Compare Steam prices across regions",
    long_about = "Compares Steam storefront prices between two regions (RU and KZ by default), converting both sides to rubles."
)]
struct Cli {
    /// Home storefront region
    #[arg(short, long, global = true, env = "STEAM_REGION")]
    region: Option<Region>,

    /// Region to compare against
    #[arg(long, global = true, env = "STEAM_COMPARE_REGION")]
    compare_region: Option<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "STEAM_PROXY")]
    proxy: Option<String>,

    /// Delay between storefront requests in milliseconds
    #[arg(long, global = true, env = "STEAM_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Annotation layout (inline or below)
    #[arg(long, global = true)]
    layout: Option<AnnotationLayout>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare products between the home and compare regions
    #[command(alias = "c")]
    Compare {
        /// App ids, `app/<id>`, `sub/<id>` or store URLs
        #[arg(required = true)]
        products: Vec<String>,

        /// Price text as displayed on the page, used as the reference
        #[arg(long)]
        price: Option<String>,
    },

    /// Show a product's price in each region
    #[command(alias = "p")]
    Price {
        /// App id, `app/<id>`, `sub/<id>` or store URL
        product: String,

        /// Regions to query (comma-separated)
        #[arg(long, value_delimiter = ',')]
        regions: Vec<Region>,
    },

    /// Show the exchange rate in use
    Rate {
        #[arg(long, default_value = "KZT")]
        from: CurrencyCode,

        #[arg(long, default_value = "RUB")]
        to: CurrencyCode,
    },

    /// Parse a displayed price
    Parse {
        /// Price text, e.g. "1 234,56 ₸"
        text: String,
    },

    /// Append ruble estimates to tenge amounts read from stdin
    Convert,

    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(region) = cli.compare_region {
        config.compare_region = region;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(layout) = cli.layout {
        config.layout = layout;
    }

    match cli.command {
        Commands::Compare { products, price } => {
            let cmd = CompareCommand::new(config);
            let output = cmd.execute(&products, price.as_deref()).await?;
            println!("{}", output);
        }

        Commands::Price { product, regions } => {
            let cmd = PriceCommand::new(config);
            let output = cmd.execute(&product, &regions).await?;
            println!("{}", output);
        }

        Commands::Rate { from, to } => {
            let cmd = RateCommand::new(config);
            let output = cmd.execute(from, to).await?;
            println!("{}", output);
        }

        Commands::Parse { text } => {
            let output = ParseCommand::new(config.format).execute(&text)?;
            println!("{}", output);
        }

        Commands::Convert => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input).context("Failed to read stdin")?;

            let cmd = ConvertCommand::new(config);
            let output = cmd.execute(&input).await?;
            println!("{}", output);
        }

        Commands::Regions => {
            println!("Supported Steam regions:\n");
            println!("{:<6} {:<20} {:<10}", "Code", "Country", "Currency");
            println!("{:-<6} {:-<20} {:-<10}", "", "", "");

            for region in Region::all() {
                println!(
                    "{:<6} {:<20} {:<10}",
                    region.code(),
                    region.name(),
                    region.currency().code()
                );
            }
        }
    }

    Ok(())
}
