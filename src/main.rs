//! covert-finder - Rank the cheapest Counter-Strike items on the Steam and CSFloat markets
//!
//! Browser-grade TLS fingerprints keep the market endpoints from throttling every request.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use covert_finder::commands::{LookupCommand, VariantsCommand};
use covert_finder::config::{Config, OutputFormat};
use covert_finder::market::{Currency, StatTrakMode, WearSelection};
use covert_finder::price::{PriceNormalizer, SeparatorRule};
use covert_finder::prompt;
use covert_finder::Selection;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "covert-finder",
    version,
    about = "Rank the cheapest Counter-Strike items on the Steam and CSFloat markets",
    long_about = "Prices a catalog of item names on the Steam Community Market or CSFloat, \
                  normalizes mixed-locale prices and prints the cheapest items."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Steam currency (usd, gbp, eur)
    #[arg(long, global = true)]
    currency: Option<Currency>,

    /// Delay between items in milliseconds
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Item catalog file, one base name per line
    #[arg(short, long, global = true)]
    items: Option<PathBuf>,

    /// Number of cheapest items to list
    #[arg(short, long, global = true)]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Do not write a JSON snapshot
    #[arg(long, global = true)]
    no_save: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LookupArgs {
    /// Wear: 1-5, fn/mw/ft/ww/bs, a full name, or "all" (prompted when omitted)
    #[arg(short, long)]
    wear: Option<WearSelection>,

    /// StatTrak: yes, no, only, both (prompted when omitted)
    #[arg(short, long)]
    stattrak: Option<StatTrakMode>,

    /// Minimum price filter
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price filter
    #[arg(long)]
    max_price: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up each catalog item on the Steam market
    #[command(alias = "p")]
    Prices(LookupArgs),

    /// Search every wear and StatTrak variant with one Steam request per item
    #[command(alias = "v")]
    Variants(LookupArgs),

    /// Look up each catalog item on CSFloat (USD)
    #[command(alias = "f")]
    Csfloat(LookupArgs),

    /// Normalize price strings and print the values
    Parse {
        /// Price strings such as "1 577,29€" or "$4.15"
        #[arg(required = true)]
        texts: Vec<String>,

        /// How a lone comma is read: strict or comma-decimal
        #[arg(long)]
        rule: Option<SeparatorRule>,
    },
}

/// Fills in the wear and StatTrak choices, prompting on stderr for missing ones.
fn resolve_selection(args: &LookupArgs, variants_menu: bool) -> Result<Selection> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stderr();

    let wear = match args.wear {
        Some(wear) => wear,
        None => prompt::prompt_wear(&mut input, &mut output, variants_menu)?,
    };

    let stattrak = match args.stattrak {
        Some(mode) => mode,
        None if variants_menu => prompt::prompt_stattrak_filter(&mut input, &mut output)?,
        None => prompt::prompt_stattrak_toggle(&mut input, &mut output)?,
    };

    Ok(Selection::new(wear, stattrak))
}

fn apply_lookup_args(config: &mut Config, args: &LookupArgs) {
    if args.min_price.is_some() {
        config.min_price = args.min_price;
    }
    if args.max_price.is_some() {
        config.max_price = args.max_price;
    }
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

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(items) = cli.items {
        config.item_file = items;
    }
    if let Some(top) = cli.top {
        config.top_n = top;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.no_save {
        config.save_snapshot = false;
    }

    match cli.command {
        Commands::Prices(args) => {
            apply_lookup_args(&mut config, &args);
            let selection = resolve_selection(&args, false)?;
            eprintln!("\nFetching prices from Steam Market...\n");

            let output = LookupCommand::new(config, selection).execute_steam().await?;
            println!("{}", output);
        }

        Commands::Variants(args) => {
            apply_lookup_args(&mut config, &args);
            let selection = resolve_selection(&args, true)?;
            eprintln!("\nFetching prices from Steam Market...\n");

            let output = VariantsCommand::new(config, selection).execute().await?;
            println!("{}", output);
        }

        Commands::Csfloat(args) => {
            apply_lookup_args(&mut config, &args);
            let selection = resolve_selection(&args, false)?;
            eprintln!("\nFetching prices from CSFloat...\n");

            let output = LookupCommand::new(config, selection).execute_csfloat().await?;
            println!("{}", output);
        }

        Commands::Parse { texts, rule } => {
            let normalizer = PriceNormalizer::new(rule.unwrap_or(config.separator_rule));

            for text in &texts {
                let value = normalizer.normalize_text(text);
                if value.is_finite() {
                    println!("{:>20} -> {}", text, value);
                } else {
                    println!("{:>20} -> unparseable", text);
                }
            }
        }
    }

    Ok(())
}
